// SPDX-License-Identifier: MPL-2.0
//! Default values and bounds for engine configuration.

// =============================================================================
// Channels
// =============================================================================

/// Default maximum of simultaneously visible notifications per channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 3;

/// Upper bound on a configured channel capacity.
pub const MAX_CHANNEL_CAPACITY: usize = 8;

/// Default vertical gap between stacked cards, in layout units.
pub const DEFAULT_STACK_SPACING: f32 = 8.0;

// =============================================================================
// Animation
// =============================================================================

/// Default entry animation duration in seconds.
pub const DEFAULT_ENTRY_SECS: f32 = 0.3;

/// Default exit animation duration in seconds.
pub const DEFAULT_EXIT_SECS: f32 = 0.25;

/// Default stack reposition tween duration in seconds.
pub const DEFAULT_REPOSITION_SECS: f32 = 0.15;

/// Default overshoot constant for the entry ease-out-back curve.
pub const DEFAULT_OVERSHOOT: f32 = 1.701_58;

/// Default off-screen slide distance in layout units.
pub const DEFAULT_SLIDE_DISTANCE: f32 = 320.0;

// =============================================================================
// Diagnostics
// =============================================================================

/// Default diagnostics buffer capacity in events.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1_000;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;
