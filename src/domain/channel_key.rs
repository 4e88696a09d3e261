// SPDX-License-Identifier: MPL-2.0
//! Channel keys and stacking geometry.
//!
//! A channel is a named screen region with its own capacity and stacking
//! order. The key also fixes the region's geometry: which way the stack
//! grows and which screen edge notifications slide in from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The screen edge a notification slides in from (and back out towards).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Identifies a screen region holding a stack of notifications.
///
/// Keys are stable: they appear in config files and diagnostics exports
/// under their snake_case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKey {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ChannelKey {
    /// All channel keys, in declaration order.
    pub const ALL: [ChannelKey; 5] = [
        ChannelKey::TopLeft,
        ChannelKey::TopCenter,
        ChannelKey::TopRight,
        ChannelKey::BottomLeft,
        ChannelKey::BottomRight,
    ];

    /// Returns true when the stack grows downward from its anchor.
    ///
    /// Top-anchored channels stack downward; bottom-anchored ones stack
    /// upward. Stack offsets are nonnegative distances from the anchor; the
    /// host applies the sign from [`ChannelKey::stack_direction`].
    #[must_use]
    pub fn grows_downward(self) -> bool {
        matches!(
            self,
            ChannelKey::TopLeft | ChannelKey::TopCenter | ChannelKey::TopRight
        )
    }

    /// Returns the sign applied to stack offsets: `1.0` grows down the
    /// screen, `-1.0` grows up.
    #[must_use]
    pub fn stack_direction(self) -> f32 {
        if self.grows_downward() {
            1.0
        } else {
            -1.0
        }
    }

    /// Returns the screen edge notifications in this channel slide in from.
    ///
    /// Side-anchored channels slide horizontally; center channels slide
    /// vertically from their anchoring edge.
    #[must_use]
    pub fn entry_edge(self) -> EntryEdge {
        match self {
            ChannelKey::TopLeft | ChannelKey::BottomLeft => EntryEdge::Left,
            ChannelKey::TopRight | ChannelKey::BottomRight => EntryEdge::Right,
            ChannelKey::TopCenter => EntryEdge::Top,
        }
    }

    /// Returns the stable snake_case name used in config files and exports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ChannelKey::TopLeft => "top_left",
            ChannelKey::TopCenter => "top_center",
            ChannelKey::TopRight => "top_right",
            ChannelKey::BottomLeft => "bottom_left",
            ChannelKey::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
