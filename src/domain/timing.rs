// SPDX-License-Identifier: MPL-2.0
//! Display duration value object.

use std::time::Duration;

/// Display duration bounds in seconds.
pub mod duration_bounds {
    /// Minimum finite display duration.
    pub const MIN_SECS: f32 = 0.5;
    /// Maximum finite display duration.
    pub const MAX_SECS: f32 = 30.0;
    /// Default display duration.
    pub const DEFAULT_SECS: f32 = 4.0;
}

/// How long a notification stays visible once its entry animation settles.
///
/// A non-positive requested duration means the notification persists until
/// explicitly dismissed; finite values are clamped to the valid range
/// (0.5–30 seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayDuration(Option<Duration>);

impl DisplayDuration {
    /// Creates a display duration from seconds, clamping to the valid range.
    ///
    /// Values at or below zero yield a persistent duration.
    #[must_use]
    pub fn from_secs(secs: f32) -> Self {
        if secs <= 0.0 {
            return Self::persistent();
        }
        let clamped = secs.clamp(duration_bounds::MIN_SECS, duration_bounds::MAX_SECS);
        Self(Some(Duration::from_secs_f32(clamped)))
    }

    /// Creates a duration that never expires on its own.
    #[must_use]
    pub fn persistent() -> Self {
        Self(None)
    }

    /// Returns the auto-dismiss timeout, or `None` when persistent.
    #[must_use]
    pub fn timeout(self) -> Option<Duration> {
        self.0
    }

    /// Returns true when the notification stays up until explicit dismissal.
    #[must_use]
    pub fn is_persistent(self) -> bool {
        self.0.is_none()
    }
}

impl Default for DisplayDuration {
    fn default() -> Self {
        Self::from_secs(duration_bounds::DEFAULT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_mean_persistent() {
        assert!(DisplayDuration::from_secs(0.0).is_persistent());
        assert!(DisplayDuration::from_secs(-3.0).is_persistent());
    }

    #[test]
    fn finite_values_clamp_to_bounds() {
        let short = DisplayDuration::from_secs(0.1);
        assert_eq!(
            short.timeout(),
            Some(Duration::from_secs_f32(duration_bounds::MIN_SECS))
        );

        let long = DisplayDuration::from_secs(120.0);
        assert_eq!(
            long.timeout(),
            Some(Duration::from_secs_f32(duration_bounds::MAX_SECS))
        );
    }

    #[test]
    fn in_range_values_pass_through() {
        let duration = DisplayDuration::from_secs(5.0);
        assert_eq!(duration.timeout(), Some(Duration::from_secs_f32(5.0)));
        assert!(!duration.is_persistent());
    }

    #[test]
    fn default_uses_default_seconds() {
        assert_eq!(
            DisplayDuration::default().timeout(),
            Some(Duration::from_secs_f32(duration_bounds::DEFAULT_SECS))
        );
    }
}
