// SPDX-License-Identifier: MPL-2.0
//! Pooled notification instances.
//!
//! An [`Instance`] is the mutable, reusable carrier for one visible
//! notification: a visual handle (opaque to the engine), the request that
//! currently occupies it, and the animation fields the [`Animator`]
//! (see [`super::animator`]) writes each tick.
//!
//! Lifecycle: `Free` (in pool, unbound) → `Entering` → `Visible` →
//! `Dismissing` → `Free` again. While admitted, an instance belongs to
//! exactly one channel's active list.

use std::time::Duration;

use crate::domain::{ChannelKey, Kind, Request, RequestId};

use super::animator::Tween;

/// Identifies a pooled instance slot.
///
/// Ids are handed out by the pool and stay stable across leases of the same
/// slot, so a reclaimed-then-released instance keeps its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(usize);

impl InstanceId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the slot index inside the pool.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Lifecycle phase of an instance, with the elapsed time driving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// In the pool, unbound.
    Free,
    /// Entry animation running.
    Entering { elapsed: Duration },
    /// Settled; auto-dismiss timer accumulating when the request has one.
    Visible { shown_for: Duration },
    /// Exit animation running.
    Dismissing { elapsed: Duration },
}

impl Phase {
    /// Returns true for phases that occupy a channel slot and accept
    /// dismissal (`Entering` or `Visible`).
    #[must_use]
    pub fn is_dismissable(self) -> bool {
        matches!(self, Phase::Entering { .. } | Phase::Visible { .. })
    }
}

/// Opaque handle to the visual resource an instance renders through.
///
/// The engine only toggles activation and reads the nominal card height for
/// stack layout; everything else is the host's concern.
#[derive(Debug, Clone)]
pub struct VisualHandle {
    asset_key: String,
    height: f32,
    active: bool,
}

impl VisualHandle {
    pub(crate) fn new(asset_key: String, height: f32) -> Self {
        Self {
            asset_key,
            height,
            active: false,
        }
    }

    /// Returns the asset key of the backing resource.
    #[must_use]
    pub fn asset_key(&self) -> &str {
        &self.asset_key
    }

    /// Returns the nominal card height used for stack offsets.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns whether the visual is currently activated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// A mutable, pooled notification instance.
#[derive(Debug)]
pub struct Instance {
    kind: Kind,
    visual: VisualHandle,
    request: Option<Request>,
    channel: Option<ChannelKey>,
    phase: Phase,
    slide: f32,
    opacity: f32,
    stack_offset: f32,
    reposition: Option<Tween>,
}

impl Instance {
    pub(crate) fn new(kind: Kind, visual: VisualHandle) -> Self {
        Self {
            kind,
            visual,
            request: None,
            channel: None,
            phase: Phase::Free,
            slide: 0.0,
            opacity: 0.0,
            stack_offset: 0.0,
            reposition: None,
        }
    }

    /// Binds a freshly leased instance to a request and starts its entry.
    ///
    /// The instance begins fully transparent at the off-screen slide
    /// distance; the animator brings it in on subsequent ticks.
    pub(crate) fn bind(
        &mut self,
        request: Request,
        channel: ChannelKey,
        stack_offset: f32,
        slide_distance: f32,
    ) {
        self.visual.active = true;
        self.request = Some(request);
        self.channel = Some(channel);
        self.phase = Phase::Entering {
            elapsed: Duration::ZERO,
        };
        self.slide = slide_distance;
        self.opacity = 0.0;
        self.stack_offset = stack_offset;
        self.reposition = None;
    }

    /// Unbinds the instance: deactivates the visual and clears every field
    /// carrying request content, so nothing leaks into the next lease.
    pub(crate) fn release(&mut self) {
        self.visual.active = false;
        self.request = None;
        self.channel = None;
        self.phase = Phase::Free;
        self.slide = 0.0;
        self.opacity = 0.0;
        self.stack_offset = 0.0;
        self.reposition = None;
    }

    /// Returns the kind this instance was leased for (free-list key).
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the visual handle.
    #[must_use]
    pub fn visual(&self) -> &VisualHandle {
        &self.visual
    }

    /// Returns the bound request, if any.
    #[must_use]
    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    /// Returns true when this instance currently carries `request_id`.
    #[must_use]
    pub fn is_bound_to(&self, request_id: RequestId) -> bool {
        self.request.as_ref().map(Request::id) == Some(request_id)
    }

    /// Returns the channel whose active list holds this instance.
    #[must_use]
    pub fn channel(&self) -> Option<ChannelKey> {
        self.channel
    }

    /// Returns the lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true when the instance sits unbound in the pool.
    #[must_use]
    pub fn is_free(&self) -> bool {
        matches!(self.phase, Phase::Free)
    }

    /// Returns the current slide displacement towards the entry edge
    /// (0 when settled).
    #[must_use]
    pub fn slide(&self) -> f32 {
        self.slide
    }

    /// Returns the current opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Returns the current stack offset from the channel anchor.
    #[must_use]
    pub fn stack_offset(&self) -> f32 {
        self.stack_offset
    }

    /// Returns the card height used for stacking.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.visual.height
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_slide(&mut self, slide: f32) {
        self.slide = slide;
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    pub(crate) fn set_stack_offset(&mut self, offset: f32) {
        self.stack_offset = offset;
    }

    /// Retargets the stack slot without a tween. Used while the instance is
    /// still entering: the entry slide keeps running, only the destination
    /// changes.
    pub(crate) fn retarget_stack(&mut self, offset: f32) {
        self.stack_offset = offset;
        self.reposition = None;
    }

    pub(crate) fn begin_reposition(&mut self, tween: Tween) {
        self.reposition = Some(tween);
    }

    pub(crate) fn reposition_mut(&mut self) -> Option<&mut Tween> {
        self.reposition.as_mut()
    }

    pub(crate) fn clear_reposition(&mut self) {
        self.reposition = None;
    }

    /// Returns true while a reposition tween is running.
    #[must_use]
    pub fn is_repositioning(&self) -> bool {
        self.reposition.is_some()
    }
}
