// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the silent half of the engine.
//!
//! The producer API is fire-and-forget: dropped requests, stale operations,
//! and abandoned backlogs never surface as errors. This module is where
//! those decisions leave a trace: a memory-bounded ring buffer of
//! timestamped events that can be exported as a JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with validated capacity
//! - [`DiagnosticEvent`]: Engine-time-stamped event with a tagged kind
//! - [`DiagnosticsRecorder`] / [`DiagnosticsHandle`]: owner and cloneable
//!   writer over the shared buffer (single-threaded and `Rc`-based; the
//!   engine is cooperative, so no channel or thread is involved)
//! - [`export`]: JSON report generation

mod buffer;
mod events;
pub mod export;
mod recorder;

pub use buffer::{capacity_bounds, BufferCapacity, CircularBuffer};
pub use events::{DiagnosticEvent, DiagnosticEventKind, DropReason, StaleKind};
pub use export::{DiagnosticReport, ExportError};
pub use recorder::{DiagnosticsHandle, DiagnosticsRecorder};
