// SPDX-License-Identifier: MPL-2.0
//! Event recording.
//!
//! The [`DiagnosticsRecorder`] owns the ring buffer; a [`DiagnosticsHandle`]
//! is a cheap clone the dispatcher (or any other component) writes through.
//! Both sides share the buffer via `Rc<RefCell<..>>`; the engine is
//! single-threaded cooperative, so no channel or lock is needed.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::buffer::{BufferCapacity, CircularBuffer};
use super::events::{DiagnosticEvent, DiagnosticEventKind};

type SharedBuffer = Rc<RefCell<CircularBuffer<DiagnosticEvent>>>;

/// Owns the diagnostic event buffer and hands out writer handles.
#[derive(Debug)]
pub struct DiagnosticsRecorder {
    buffer: SharedBuffer,
}

impl DiagnosticsRecorder {
    /// Creates a recorder retaining up to `capacity` events.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(CircularBuffer::new(capacity))),
        }
    }

    /// Returns a cloneable writer over the shared buffer.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            buffer: Rc::clone(&self.buffer),
        }
    }

    /// Returns the number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.borrow().len()
    }

    /// Returns true when no events are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }

    /// Returns a snapshot of the retained events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.buffer.borrow().iter().cloned().collect()
    }

    /// Drops all retained events.
    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Default for DiagnosticsRecorder {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

/// Cloneable writer over a recorder's buffer.
#[derive(Debug, Clone)]
pub struct DiagnosticsHandle {
    buffer: SharedBuffer,
}

impl DiagnosticsHandle {
    /// Records an event at the given engine time.
    pub fn record(&self, timestamp: Duration, kind: DiagnosticEventKind) {
        self.buffer
            .borrow_mut()
            .push(DiagnosticEvent::new(timestamp, kind));
    }

    /// Records a warning message.
    pub fn log_warning(&self, timestamp: Duration, message: impl Into<String>) {
        self.record(
            timestamp,
            DiagnosticEventKind::Warning {
                message: message.into(),
            },
        );
    }

    /// Records an error message.
    pub fn log_error(&self, timestamp: Duration, message: impl Into<String>) {
        self.record(
            timestamp,
            DiagnosticEventKind::Error {
                message: message.into(),
            },
        );
    }
}
