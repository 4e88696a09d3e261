// SPDX-License-Identifier: MPL-2.0
//! The scheduling core.
//!
//! One [`Dispatcher`] per session owns the pool, the channels, the pending
//! backlog, and the outbound event buffer. Producers call [`Dispatcher::submit`]
//! and forget; the host calls [`Dispatcher::tick`] once per frame with the
//! unscaled frame delta and drains events afterwards.
//!
//! Per-request state machine:
//! `Requested → {Admitted | Queued} → Visible → Dismissing → Recycled`.

use std::collections::HashMap;
use std::time::Duration;

use crate::config::{defaults, Config};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle, DropReason, StaleKind};
use crate::domain::{ChannelKey, Kind, Request, RequestId};
use crate::error::{Error, Result};

use super::animator::{AnimationSignal, Animator, Timings, Tween};
use super::channel::Channel;
use super::events::EngineEvent;
use super::instance::{InstanceId, Phase};
use super::pool::{Pool, VisualResource};
use super::queue::PendingQueue;

/// Validated dispatcher construction parameters.
///
/// The default configures every channel key at the default capacity; a host
/// that wants a region to reject requests outright can remove it with
/// [`Settings::without_channel`].
#[derive(Debug, Clone)]
pub struct Settings {
    capacities: HashMap<ChannelKey, usize>,
    spacing: f32,
    timings: Timings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capacities: ChannelKey::ALL
                .iter()
                .map(|key| (*key, defaults::DEFAULT_CHANNEL_CAPACITY))
                .collect(),
            spacing: defaults::DEFAULT_STACK_SPACING,
            timings: Timings::default(),
        }
    }
}

impl Settings {
    /// Builds settings from a loaded [`Config`], clamping every value into
    /// its valid range.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let capacities = ChannelKey::ALL
            .iter()
            .map(|key| {
                let capacity = config
                    .capacities
                    .resolve(*key)
                    .clamp(1, defaults::MAX_CHANNEL_CAPACITY);
                (*key, capacity)
            })
            .collect();

        let timings = Timings {
            entry: positive_secs(config.entry_secs, defaults::DEFAULT_ENTRY_SECS),
            exit: positive_secs(config.exit_secs, defaults::DEFAULT_EXIT_SECS),
            reposition: positive_secs(config.reposition_secs, defaults::DEFAULT_REPOSITION_SECS),
            overshoot: config.overshoot.unwrap_or(defaults::DEFAULT_OVERSHOOT),
            slide_distance: config
                .slide_distance
                .filter(|distance| *distance > 0.0)
                .unwrap_or(defaults::DEFAULT_SLIDE_DISTANCE),
        };

        Self {
            capacities,
            spacing: config
                .stack_spacing
                .filter(|spacing| *spacing >= 0.0)
                .unwrap_or(defaults::DEFAULT_STACK_SPACING),
            timings,
        }
    }

    /// Overrides one channel's capacity, clamped to the valid range.
    #[must_use]
    pub fn with_capacity(mut self, key: ChannelKey, capacity: usize) -> Self {
        self.capacities
            .insert(key, capacity.clamp(1, defaults::MAX_CHANNEL_CAPACITY));
        self
    }

    /// Removes a channel entirely; requests targeting it are dropped with
    /// an `invalid_channel` diagnostic.
    #[must_use]
    pub fn without_channel(mut self, key: ChannelKey) -> Self {
        self.capacities.remove(&key);
        self
    }

    /// Overrides the stack spacing.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// Overrides the animation timings.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }
}

fn positive_secs(configured: Option<f32>, fallback: f32) -> Duration {
    let secs = configured.filter(|secs| *secs > 0.0).unwrap_or(fallback);
    Duration::from_secs_f32(secs)
}

/// Orchestrates admission, queueing, timers, animation, and recycling.
#[derive(Debug)]
pub struct Dispatcher {
    pool: Pool,
    channels: HashMap<ChannelKey, Channel>,
    pending: PendingQueue,
    animator: Animator,
    spacing: f32,
    clock: Duration,
    events: Vec<EngineEvent>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Dispatcher {
    /// Creates a dispatcher for one session.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let channels = settings
            .capacities
            .iter()
            .map(|(key, capacity)| (*key, Channel::new(*key, *capacity)))
            .collect();

        Self {
            pool: Pool::new(),
            channels,
            pending: PendingQueue::new(),
            animator: Animator::new(settings.timings),
            spacing: settings.spacing,
            clock: Duration::ZERO,
            events: Vec::new(),
            diagnostics: None,
        }
    }

    /// Creates a dispatcher straight from a loaded config file.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(Settings::from_config(config))
    }

    /// Attaches a diagnostics handle; silent drops are logged through it.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Registers the visual resource backing `kind`.
    pub fn register_visual(&mut self, kind: Kind, resource: VisualResource) {
        self.pool.register_visual(kind, resource);
    }

    /// Returns the accumulated engine time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock
    }

    // ==========================================================================
    // Producer API
    // ==========================================================================

    /// Submits a request. Fire-and-forget: a request that cannot be
    /// delivered is dropped with a diagnostic, never an error.
    ///
    /// Within capacity the request is admitted immediately; otherwise it
    /// joins the channel's FIFO backlog and surfaces once a slot frees up.
    pub fn submit(&mut self, request: Request) {
        let kind = request.kind();
        if let Err(error) = self.deliver(request) {
            let reason = match error {
                Error::ResourceUnavailable(_) => DropReason::ResourceUnavailable,
                Error::InvalidChannel(_) | Error::Config(_) => DropReason::InvalidChannel,
            };
            self.log(DiagnosticEventKind::RequestDropped { kind, reason });
        }
    }

    /// Begins dismissal of the instance currently showing `request_id`.
    ///
    /// A stale id (the request already expired, or its instance was
    /// recycled and reused) is a logged no-op.
    pub fn dismiss(&mut self, request_id: RequestId) {
        match self.instance_for(request_id) {
            Some(id) => self.begin_dismiss(id, StaleKind::ExplicitDismiss),
            None => self.log(DiagnosticEventKind::StaleOperation {
                operation: StaleKind::ExplicitDismiss,
            }),
        }
    }

    /// Begins dismissal of every active instance of `kind`, across all
    /// channels. Queued requests of the kind are left waiting.
    pub fn dismiss_kind(&mut self, kind: Kind) {
        let targets: Vec<InstanceId> = self
            .pool
            .iter()
            .filter(|(_, instance)| {
                instance.phase().is_dismissable()
                    && instance.request().map(Request::kind) == Some(kind)
            })
            .map(|(id, _)| id)
            .collect();

        for id in targets {
            self.begin_dismiss(id, StaleKind::ExplicitDismiss);
        }
    }

    /// Begins dismissal of every active instance and abandons all queued
    /// requests.
    pub fn dismiss_all(&mut self) {
        let targets: Vec<InstanceId> = self
            .pool
            .iter()
            .filter(|(_, instance)| instance.phase().is_dismissable())
            .map(|(id, _)| id)
            .collect();

        for id in targets {
            self.begin_dismiss(id, StaleKind::ExplicitDismiss);
        }

        let abandoned = self.pending.clear();
        if abandoned > 0 {
            let message = format!("dismiss_all abandoned {} queued requests", abandoned);
            self.log(DiagnosticEventKind::Warning { message });
        }
    }

    /// Reports a click on the notification showing `request_id`, invoking
    /// its callback if the request is still up. Stale ids are no-ops.
    pub fn click(&mut self, request_id: RequestId) {
        let Some(id) = self.instance_for(request_id) else {
            self.log(DiagnosticEventKind::StaleOperation {
                operation: StaleKind::Click,
            });
            return;
        };

        let instance = self.pool.get(id);
        if !instance.phase().is_dismissable() {
            return;
        }
        if let Some(action) = instance.request().and_then(Request::click_action) {
            action.invoke();
        }
    }

    // ==========================================================================
    // Cooperative step
    // ==========================================================================

    /// Advances the engine by `delta`.
    ///
    /// All animation and timer state moves here: entries settle, visible
    /// timers accumulate and expire, exits finish and recycle their
    /// instances, and each freed slot promotes exactly one queued request
    /// for its channel. The host must feed unscaled (real) time so
    /// notifications ignore gameplay pause and slow-motion.
    pub fn tick(&mut self, delta: Duration) {
        self.clock += delta;

        let mut expired: Vec<InstanceId> = Vec::new();
        let mut finished: Vec<InstanceId> = Vec::new();

        for (id, instance) in self.pool.iter_mut() {
            match self.animator.advance(instance, delta) {
                Some(AnimationSignal::EntrySettled { leftover }) => {
                    instance.set_phase(Phase::Visible {
                        shown_for: leftover,
                    });
                    if timer_expired(instance.request(), leftover) {
                        expired.push(id);
                    }
                }
                Some(AnimationSignal::ExitFinished) => finished.push(id),
                None => {
                    if let Phase::Visible { shown_for } = instance.phase() {
                        let shown_for = shown_for + delta;
                        instance.set_phase(Phase::Visible { shown_for });
                        if timer_expired(instance.request(), shown_for) {
                            expired.push(id);
                        }
                    }
                }
            }
        }

        for id in expired {
            self.begin_dismiss(id, StaleKind::TimerFire);
        }
        for id in finished {
            self.finalize_exit(id);
        }
    }

    /// Takes the buffered events, leaving the buffer empty.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // ==========================================================================
    // Queries
    // ==========================================================================

    /// Returns the number of active instances in `key`'s channel (zero for
    /// unconfigured channels).
    #[must_use]
    pub fn visible_count(&self, key: ChannelKey) -> usize {
        self.channels.get(&key).map_or(0, Channel::active_count)
    }

    /// Returns the number of requests queued for `key`.
    #[must_use]
    pub fn pending_count(&self, key: ChannelKey) -> usize {
        self.pending.len_for(key)
    }

    /// Returns the total queued backlog across all channels.
    #[must_use]
    pub fn total_pending(&self) -> usize {
        self.pending.total_len()
    }

    /// Returns the channel for `key`, if configured.
    #[must_use]
    pub fn channel(&self, key: ChannelKey) -> Option<&Channel> {
        self.channels.get(&key)
    }

    /// Returns the pool, for hosts that render instances directly.
    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Returns the ids of the requests showing in `key`, in stack order.
    #[must_use]
    pub fn visible_requests(&self, key: ChannelKey) -> Vec<RequestId> {
        self.channels.get(&key).map_or_else(Vec::new, |channel| {
            channel
                .active()
                .iter()
                .filter_map(|id| self.pool.get(*id).request().map(Request::id))
                .collect()
        })
    }

    /// Finds the instance currently bound to `request_id`.
    #[must_use]
    pub fn instance_for(&self, request_id: RequestId) -> Option<InstanceId> {
        self.pool
            .iter()
            .find(|(_, instance)| instance.is_bound_to(request_id))
            .map(|(id, _)| id)
    }

    // ==========================================================================
    // Internals
    // ==========================================================================

    /// Routes a request to its channel: admit within capacity, enqueue at
    /// capacity, fail on an unconfigured channel or a lease miss.
    fn deliver(&mut self, request: Request) -> Result<()> {
        let channel_key = request.channel();
        let channel = self
            .channels
            .get(&channel_key)
            .ok_or(Error::InvalidChannel(channel_key))?;

        if channel.is_full() {
            let backlog = self.pending.len_for(channel_key) + 1;
            self.log(DiagnosticEventKind::RequestQueued {
                kind: request.kind(),
                channel: channel_key,
                backlog,
            });
            self.pending.enqueue(channel_key, request, self.clock);
            return Ok(());
        }

        self.admit(channel_key, request)
    }

    /// Leases, configures, and admits an instance for `request`.
    ///
    /// The caller has already verified the channel exists and has capacity;
    /// only a lease failure can still reject the request.
    fn admit(&mut self, channel_key: ChannelKey, request: Request) -> Result<()> {
        let kind = request.kind();
        let instance_id = self.pool.lease(kind)?;

        let Some(offset) = self
            .channels
            .get(&channel_key)
            .map(|channel| channel.next_offset(self.spacing, |id| self.pool.get(id).height()))
        else {
            self.pool.reclaim(instance_id);
            return Err(Error::InvalidChannel(channel_key));
        };

        let request_id = request.id();
        let play_sound = request.play_sound();
        let slide_distance = self.animator.timings().slide_distance;
        self.pool
            .get_mut(instance_id)
            .bind(request, channel_key, offset, slide_distance);

        let admitted = self
            .channels
            .get_mut(&channel_key)
            .map_or(false, |channel| channel.try_admit(instance_id));
        if !admitted {
            self.pool.reclaim(instance_id);
            let message = format!("channel {} refused an admitted lease", channel_key);
            self.log(DiagnosticEventKind::Error { message });
            return Ok(());
        }

        self.events.push(EngineEvent::Shown {
            request: request_id,
            kind,
            channel: channel_key,
        });
        if play_sound {
            self.events.push(EngineEvent::SoundCue { kind });
        }
        Ok(())
    }

    /// Transitions an instance into its exit animation.
    ///
    /// Defensive: the instance must still be dismissable and still listed
    /// by its channel. A timer firing for an instance that was explicitly
    /// dismissed (or already recycled and reused) lands here and becomes a
    /// no-op.
    fn begin_dismiss(&mut self, id: InstanceId, origin: StaleKind) {
        let instance = self.pool.get(id);
        if !instance.phase().is_dismissable() {
            return;
        }

        let listed = instance
            .channel()
            .and_then(|key| self.channels.get(&key))
            .map_or(false, |channel| channel.contains(id));
        if !listed {
            self.log(DiagnosticEventKind::StaleOperation { operation: origin });
            return;
        }

        self.pool.get_mut(id).set_phase(Phase::Dismissing {
            elapsed: Duration::ZERO,
        });
    }

    /// Recycles an instance whose exit animation finished: reclaim the
    /// lease, remove it from its channel, close the gap, and promote one
    /// queued request for the freed slot.
    fn finalize_exit(&mut self, id: InstanceId) {
        let instance = self.pool.get(id);
        let channel_key = instance.channel();
        let recycled = instance
            .request()
            .map(|request| (request.id(), request.kind()));

        self.pool.reclaim(id);

        let Some(key) = channel_key else {
            return;
        };
        if let Some(channel) = self.channels.get_mut(&key) {
            channel.remove(id);
        }
        self.reposition_channel(key);

        if let Some((request_id, kind)) = recycled {
            self.events.push(EngineEvent::Dismissed {
                request: request_id,
                kind,
                channel: key,
            });
        }

        if let Some(request) = self.pending.try_dequeue_for(key) {
            let kind = request.kind();
            if self.admit(key, request).is_err() {
                // A promoted request hits the same lease-failure path as a
                // direct submission: dropped, logged, producer never told.
                self.log(DiagnosticEventKind::RequestDropped {
                    kind,
                    reason: DropReason::ResourceUnavailable,
                });
            }
        }
    }

    /// Recomputes stack offsets for a channel and starts reposition tweens
    /// where the slot moved.
    ///
    /// Entering instances are retargeted without a tween (their slide-in is
    /// still running); visible and dismissing instances glide to the new
    /// offset. Entry/exit state of unrelated instances is never touched.
    fn reposition_channel(&mut self, key: ChannelKey) {
        let Some(channel) = self.channels.get(&key) else {
            return;
        };

        let mut updates: Vec<(InstanceId, f32)> = Vec::with_capacity(channel.active_count());
        let mut cursor = 0.0;
        for id in channel.active() {
            updates.push((*id, cursor));
            cursor += self.pool.get(*id).height() + self.spacing;
        }

        let reposition = self.animator.timings().reposition;
        for (id, target) in updates {
            let instance = self.pool.get_mut(id);
            if (instance.stack_offset() - target).abs() <= f32::EPSILON {
                continue;
            }
            match instance.phase() {
                Phase::Entering { .. } => instance.retarget_stack(target),
                Phase::Visible { .. } | Phase::Dismissing { .. } => {
                    let tween = Tween::new(instance.stack_offset(), target, reposition);
                    instance.begin_reposition(tween);
                }
                Phase::Free => {}
            }
        }
    }

    fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.record(self.clock, kind);
        }
    }
}

fn timer_expired(request: Option<&Request>, shown_for: Duration) -> bool {
    request
        .and_then(|request| request.duration().timeout())
        .is_some_and(|timeout| shown_for >= timeout)
}
