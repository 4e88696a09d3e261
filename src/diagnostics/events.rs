// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Every silent decision the dispatcher makes (dropping, queueing,
//! ignoring a stale operation) is captured as one of these events.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{ChannelKey, Kind};

/// Why a request was dropped instead of delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// No visual resource for the kind and no standard fallback.
    ResourceUnavailable,
    /// The target channel was not configured on the dispatcher.
    InvalidChannel,
}

/// Which operation found its instance already recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleKind {
    /// An auto-dismiss timer fired for an instance no longer listed.
    TimerFire,
    /// An explicit dismissal named a request that is no longer bound.
    ExplicitDismiss,
    /// A click named a request that is no longer bound.
    Click,
}

/// The type and associated data of a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A request was silently dropped. The only unrecoverable path in the
    /// engine; the producer is never told.
    RequestDropped { kind: Kind, reason: DropReason },

    /// A request arrived at a full channel and joined the backlog.
    RequestQueued {
        kind: Kind,
        channel: ChannelKey,
        /// Backlog length for the channel including this request.
        backlog: usize,
    },

    /// An operation referenced an instance that was already recycled;
    /// treated as a no-op.
    StaleOperation { operation: StaleKind },

    /// Non-critical condition worth a trace.
    Warning { message: String },

    /// Critical condition that caused an operation to fail.
    Error { message: String },
}

/// A diagnostic event stamped with engine time.
///
/// The timestamp is the dispatcher's accumulated tick time, not wall-clock
/// time, so replaying the same tick sequence reproduces the same trace.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// Engine time at which the event occurred.
    pub timestamp: Duration,
    /// The type and data of the event.
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event at the given engine time.
    #[must_use]
    pub fn new(timestamp: Duration, kind: DiagnosticEventKind) -> Self {
        Self { timestamp, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_event_serializes_with_tag_and_reason() {
        let kind = DiagnosticEventKind::RequestDropped {
            kind: Kind::Combat,
            reason: DropReason::ResourceUnavailable,
        };

        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(json.contains("\"type\":\"request_dropped\""));
        assert!(json.contains("\"reason\":\"resource_unavailable\""));
        assert!(json.contains("\"kind\":\"combat\""));
    }

    #[test]
    fn queued_event_round_trips() {
        let kind = DiagnosticEventKind::RequestQueued {
            kind: Kind::Resource,
            channel: ChannelKey::BottomRight,
            backlog: 4,
        };

        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        let back: DiagnosticEventKind =
            serde_json::from_str(&json).expect("deserialization should succeed");

        match back {
            DiagnosticEventKind::RequestQueued {
                kind,
                channel,
                backlog,
            } => {
                assert_eq!(kind, Kind::Resource);
                assert_eq!(channel, ChannelKey::BottomRight);
                assert_eq!(backlog, 4);
            }
            _ => panic!("expected RequestQueued variant"),
        }
    }

    #[test]
    fn stale_operation_names_the_operation() {
        let kind = DiagnosticEventKind::StaleOperation {
            operation: StaleKind::TimerFire,
        };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(json.contains("\"operation\":\"timer_fire\""));
    }

    #[test]
    fn event_keeps_engine_timestamp() {
        let event = DiagnosticEvent::new(
            Duration::from_millis(1234),
            DiagnosticEventKind::Warning {
                message: "backlog abandoned".to_string(),
            },
        );
        assert_eq!(event.timestamp, Duration::from_millis(1234));
    }
}
