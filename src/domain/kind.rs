// SPDX-License-Identifier: MPL-2.0
//! Notification kinds and their default treatment.
//!
//! A kind categorizes a notification and determines which pool resource,
//! home channel, display duration, and sound cue it gets by default. The
//! defaults are exhaustive `match` arms so that a missing mapping for a new
//! kind is a compile error, not a silent runtime fallback.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::channel_key::ChannelKey;
use super::timing::DisplayDuration;

/// The category of a notification.
///
/// Determines the default visual resource, home channel, display duration,
/// and sound cue. Producers may override the channel and duration per
/// request; the kind itself is fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// General-purpose toast (info, success, warning, error).
    #[default]
    Standard,
    /// Achievements, quest completions, level-ups.
    Achievement,
    /// Combat reports and battle outcomes.
    Combat,
    /// System and alliance messages that should stay up until read.
    System,
    /// Resource gains and expenditures.
    Resource,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 5] = [
        Kind::Standard,
        Kind::Achievement,
        Kind::Combat,
        Kind::System,
        Kind::Resource,
    ];

    /// Returns the channel a request of this kind targets when the producer
    /// does not pick one explicitly.
    #[must_use]
    pub fn default_channel(self) -> ChannelKey {
        match self {
            Kind::Standard => ChannelKey::TopRight,
            Kind::Achievement => ChannelKey::TopCenter,
            Kind::Combat => ChannelKey::TopLeft,
            Kind::System => ChannelKey::TopCenter,
            Kind::Resource => ChannelKey::BottomRight,
        }
    }

    /// Returns the default display duration for this kind.
    ///
    /// System messages persist until explicitly dismissed.
    #[must_use]
    pub fn default_duration(self) -> DisplayDuration {
        match self {
            Kind::Standard => DisplayDuration::from_secs(4.0),
            Kind::Achievement => DisplayDuration::from_secs(6.0),
            Kind::Combat => DisplayDuration::from_secs(5.0),
            Kind::System => DisplayDuration::persistent(),
            Kind::Resource => DisplayDuration::from_secs(3.0),
        }
    }

    /// Returns the sound cue key emitted when a request of this kind asks
    /// for sound. The engine only emits the key; playback is the host's job.
    #[must_use]
    pub fn sound_cue(self) -> &'static str {
        match self {
            Kind::Standard => "notify_standard",
            Kind::Achievement => "notify_achievement",
            Kind::Combat => "notify_combat",
            Kind::System => "notify_system",
            Kind::Resource => "notify_resource",
        }
    }

    /// Returns the stable snake_case name used in config files, diagnostics
    /// exports, and log output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kind::Standard => "standard",
            Kind::Achievement => "achievement",
            Kind::Combat => "combat",
            Kind::System => "system",
            Kind::Resource => "resource",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
