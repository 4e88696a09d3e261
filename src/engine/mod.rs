// SPDX-License-Identifier: MPL-2.0
//! The notification delivery engine.
//!
//! Components, leaves first: the [`Pool`] stores reusable instances keyed by
//! kind; a [`Channel`] is a screen region with a capacity-capped active list;
//! the [`PendingQueue`] buffers requests that arrived while their channel was
//! full; the [`Animator`] drives entry/exit/reposition interpolation from
//! accumulated tick time; and the [`Dispatcher`] orchestrates all of them.
//!
//! All state transitions happen either inside a producer call or inside
//! [`Dispatcher::tick`]: single-threaded cooperative stepping, no locks.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use notideck::domain::{Kind, Request};
//! use notideck::engine::{Dispatcher, Settings, VisualResource};
//!
//! let mut dispatcher = Dispatcher::new(Settings::default());
//! for kind in Kind::ALL {
//!     dispatcher.register_visual(kind, VisualResource::new("cards/toast", 72.0));
//! }
//!
//! dispatcher.submit(Request::success("Settlement upgraded"));
//! dispatcher.tick(Duration::from_millis(16));
//! assert!(!dispatcher.drain_events().is_empty());
//! ```

mod animator;
mod channel;
mod dispatcher;
mod events;
mod instance;
mod pool;
mod queue;

pub use animator::{ease_out_back, linear_ramp, AnimationSignal, Animator, Timings, Tween};
pub use channel::Channel;
pub use dispatcher::{Dispatcher, Settings};
pub use events::EngineEvent;
pub use instance::{Instance, InstanceId, Phase, VisualHandle};
pub use pool::{Pool, VisualResource};
pub use queue::{PendingEntry, PendingQueue};
