// SPDX-License-Identifier: MPL-2.0
//! Time-driven animation of instance position and opacity.
//!
//! The animator is pure: given an instance's phase and a time delta, it
//! writes the slide displacement, stack offset, and opacity fields and
//! reports when an entry or exit run completes. It never changes lifecycle
//! state itself; the dispatcher reacts to the returned signals.
//!
//! Entry uses an overshoot ease-out curve on position with a clamped linear
//! opacity ramp; exit is a linear mirror; repositioning is a separate,
//! shorter linear tween of the stack offset that leaves entry/exit state of
//! other instances untouched.

use std::time::Duration;

use crate::config::defaults;

use super::instance::{Instance, Phase};

/// Overshoot ease-out curve.
///
/// `t' = t - 1; eased = t'*t'*((k+1)*t' + k) + 1` for overshoot constant
/// `k`. Maps 0→0 and 1→1 and briefly exceeds 1 near the end, which makes
/// the card land with a small bounce. Applied to position only.
#[must_use]
pub fn ease_out_back(t: f32, overshoot: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * ((overshoot + 1.0) * t + overshoot) + 1.0
}

/// Clamped linear ramp used for opacity.
#[must_use]
pub fn linear_ramp(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// A linear interpolation between two stack offsets over a fixed duration.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    /// Creates a tween from `from` to `to` over `duration`.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub(crate) fn advance(&mut self, delta: Duration) {
        self.elapsed = (self.elapsed + delta).min(self.duration);
    }

    /// Returns the current interpolated value.
    #[must_use]
    pub fn value(&self) -> f32 {
        let t = fraction(self.elapsed, self.duration);
        self.from + (self.to - self.from) * t
    }

    /// Returns the destination value.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Returns true once the tween has reached its destination.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Animation timing parameters, validated at dispatcher construction.
#[derive(Debug, Clone)]
pub struct Timings {
    /// Entry slide/fade duration.
    pub entry: Duration,
    /// Exit slide/fade duration.
    pub exit: Duration,
    /// Stack reposition tween duration; shorter than entry.
    pub reposition: Duration,
    /// Overshoot constant `k` of the entry curve.
    pub overshoot: f32,
    /// Off-screen slide distance in layout units.
    pub slide_distance: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            entry: Duration::from_secs_f32(defaults::DEFAULT_ENTRY_SECS),
            exit: Duration::from_secs_f32(defaults::DEFAULT_EXIT_SECS),
            reposition: Duration::from_secs_f32(defaults::DEFAULT_REPOSITION_SECS),
            overshoot: defaults::DEFAULT_OVERSHOOT,
            slide_distance: defaults::DEFAULT_SLIDE_DISTANCE,
        }
    }
}

/// Signals returned from [`Animator::advance`] when a run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationSignal {
    /// Entry finished this tick; `leftover` is the part of the delta beyond
    /// the entry duration, which the visible timer should inherit.
    EntrySettled { leftover: Duration },
    /// Exit finished this tick; the instance is ready to be reclaimed.
    ExitFinished,
}

/// Stateless driver applying the configured timings to instances.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    timings: Timings,
}

impl Animator {
    /// Creates an animator with the given timings.
    #[must_use]
    pub fn new(timings: Timings) -> Self {
        Self { timings }
    }

    /// Returns the timing parameters.
    #[must_use]
    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Advances one instance by `delta`, writing its slide, stack offset,
    /// and opacity.
    ///
    /// The reposition tween runs independently of the phase, so a gap can
    /// close under an instance that is still fading out.
    pub fn advance(&self, instance: &mut Instance, delta: Duration) -> Option<AnimationSignal> {
        if let Some(tween) = instance.reposition_mut() {
            tween.advance(delta);
            let value = tween.value();
            let finished = tween.is_finished();
            instance.set_stack_offset(value);
            if finished {
                instance.clear_reposition();
            }
        }

        match instance.phase() {
            Phase::Entering { elapsed } => {
                let elapsed = elapsed + delta;
                let t = fraction(elapsed, self.timings.entry);
                instance.set_slide(self.timings.slide_distance * (1.0 - ease_out_back(t, self.timings.overshoot)));
                instance.set_opacity(linear_ramp(t));

                if elapsed >= self.timings.entry {
                    instance.set_slide(0.0);
                    instance.set_opacity(1.0);
                    Some(AnimationSignal::EntrySettled {
                        leftover: elapsed - self.timings.entry,
                    })
                } else {
                    instance.set_phase(Phase::Entering { elapsed });
                    None
                }
            }
            Phase::Dismissing { elapsed } => {
                let elapsed = elapsed + delta;
                let t = fraction(elapsed, self.timings.exit);
                instance.set_slide(self.timings.slide_distance * linear_ramp(t));
                instance.set_opacity(1.0 - linear_ramp(t));

                if elapsed >= self.timings.exit {
                    Some(AnimationSignal::ExitFinished)
                } else {
                    instance.set_phase(Phase::Dismissing { elapsed });
                    None
                }
            }
            Phase::Visible { .. } | Phase::Free => None,
        }
    }
}

fn fraction(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChannelKey, Kind, Request};
    use crate::engine::instance::VisualHandle;
    use crate::test_utils::{assert_relative_eq, F32_EPSILON};

    fn entering_instance() -> Instance {
        let mut instance =
            Instance::new(Kind::Standard, VisualHandle::new("cards/toast".into(), 64.0));
        instance.bind(Request::info("x"), ChannelKey::TopRight, 0.0, 320.0);
        instance
    }

    #[test]
    fn ease_out_back_hits_endpoints() {
        assert_relative_eq!(ease_out_back(0.0, 1.70158), 0.0, epsilon = F32_EPSILON);
        assert_relative_eq!(ease_out_back(1.0, 1.70158), 1.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn ease_out_back_overshoots_past_one() {
        let peak = (1..20)
            .map(|i| ease_out_back(i as f32 / 20.0, 1.70158))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn linear_ramp_clamps() {
        assert_eq!(linear_ramp(-0.5), 0.0);
        assert_eq!(linear_ramp(0.25), 0.25);
        assert_eq!(linear_ramp(1.5), 1.0);
    }

    #[test]
    fn entry_progresses_towards_settled() {
        let animator = Animator::default();
        let mut instance = entering_instance();

        let signal = animator.advance(&mut instance, Duration::from_millis(100));
        assert!(signal.is_none());
        assert!(instance.slide() < 320.0);
        assert!(instance.opacity() > 0.0);
    }

    #[test]
    fn entry_settles_with_leftover() {
        let animator = Animator::default();
        let mut instance = entering_instance();
        let past_entry = animator.timings().entry + Duration::from_millis(40);

        let signal = animator.advance(&mut instance, past_entry);

        assert_eq!(
            signal,
            Some(AnimationSignal::EntrySettled {
                leftover: Duration::from_millis(40)
            })
        );
        assert_eq!(instance.slide(), 0.0);
        assert_eq!(instance.opacity(), 1.0);
    }

    #[test]
    fn exit_fades_and_finishes() {
        let animator = Animator::default();
        let mut instance = entering_instance();
        instance.set_phase(Phase::Dismissing {
            elapsed: Duration::ZERO,
        });
        instance.set_slide(0.0);
        instance.set_opacity(1.0);

        let half_exit = animator.timings().exit / 2;
        let signal = animator.advance(&mut instance, half_exit);
        assert!(signal.is_none());
        assert!(instance.opacity() < 1.0);
        assert!(instance.slide() > 0.0);

        let signal = animator.advance(&mut instance, animator.timings().exit);
        assert_eq!(signal, Some(AnimationSignal::ExitFinished));
    }

    #[test]
    fn reposition_tween_runs_during_visible() {
        let animator = Animator::default();
        let mut instance = entering_instance();
        instance.set_phase(Phase::Visible {
            shown_for: Duration::ZERO,
        });
        instance.set_stack_offset(144.0);
        instance.begin_reposition(Tween::new(144.0, 72.0, animator.timings().reposition));

        animator.advance(&mut instance, animator.timings().reposition / 2);
        assert!(instance.stack_offset() < 144.0);
        assert!(instance.stack_offset() > 72.0);
        assert!(instance.is_repositioning());

        animator.advance(&mut instance, animator.timings().reposition);
        assert_relative_eq!(instance.stack_offset(), 72.0, epsilon = F32_EPSILON);
        assert!(!instance.is_repositioning());
    }

    #[test]
    fn tween_value_interpolates_linearly() {
        let mut tween = Tween::new(0.0, 100.0, Duration::from_secs(1));
        tween.advance(Duration::from_millis(250));
        assert_relative_eq!(tween.value(), 25.0, epsilon = 1e-3);
        assert!(!tween.is_finished());

        tween.advance(Duration::from_secs(2));
        assert_relative_eq!(tween.value(), 100.0, epsilon = F32_EPSILON);
        assert!(tween.is_finished());
    }

    #[test]
    fn visible_phase_is_untouched_by_animator() {
        let animator = Animator::default();
        let mut instance = entering_instance();
        instance.set_phase(Phase::Visible {
            shown_for: Duration::from_millis(500),
        });

        let signal = animator.advance(&mut instance, Duration::from_millis(16));
        assert!(signal.is_none());
        assert_eq!(
            instance.phase(),
            Phase::Visible {
                shown_for: Duration::from_millis(500)
            }
        );
    }
}
