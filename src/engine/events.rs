// SPDX-License-Identifier: MPL-2.0
//! Events raised to collaborators.
//!
//! The dispatcher pushes these into a buffer the host drains once per tick
//! (analytics, sound playback, UI bookkeeping). Listeners exert no
//! backpressure: the engine never waits on, or reacts to, a subscriber.

use crate::domain::{ChannelKey, Kind, RequestId};

/// A lifecycle event emitted by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A request was admitted and its entry animation started.
    Shown {
        request: RequestId,
        kind: Kind,
        channel: ChannelKey,
    },
    /// A request's instance finished its exit and was recycled.
    Dismissed {
        request: RequestId,
        kind: Kind,
        channel: ChannelKey,
    },
    /// A request with the sound flag was admitted; the host should play
    /// the cue named by [`Kind::sound_cue`].
    SoundCue { kind: Kind },
}
