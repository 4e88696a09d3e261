// SPDX-License-Identifier: MPL-2.0
//! JSON export of the diagnostic event log.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::Local;
use serde::Serialize;

use super::events::DiagnosticEventKind;
use super::recorder::DiagnosticsRecorder;

/// Errors that can occur during report export.
#[derive(Debug)]
pub enum ExportError {
    /// JSON serialization failed.
    Serialization(serde_json::Error),
    /// Writing the report file failed.
    Io(io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Serialization(e) => write!(f, "Serialization error: {}", e),
            ExportError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err)
    }
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        ExportError::Io(err)
    }
}

/// An event flattened for serialization: engine time in seconds plus the
/// tagged kind payload.
#[derive(Debug, Serialize)]
pub struct SerializableEvent {
    /// Engine time of the event in seconds.
    pub elapsed_secs: f64,
    #[serde(flatten)]
    kind: DiagnosticEventKind,
}

/// A complete diagnostic report.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Local wall-clock time the report was generated at (RFC 3339).
    pub generated_at: String,
    /// Accumulated engine time at export.
    pub engine_uptime_secs: f64,
    /// Number of events in the report.
    pub event_count: usize,
    /// The events, oldest first.
    pub events: Vec<SerializableEvent>,
}

impl DiagnosticReport {
    /// Builds a report from the recorder's current contents.
    #[must_use]
    pub fn from_recorder(recorder: &DiagnosticsRecorder, engine_uptime: Duration) -> Self {
        let events: Vec<SerializableEvent> = recorder
            .events()
            .into_iter()
            .map(|event| SerializableEvent {
                elapsed_secs: event.timestamp.as_secs_f64(),
                kind: event.kind,
            })
            .collect();

        Self {
            generated_at: Local::now().to_rfc3339(),
            engine_uptime_secs: engine_uptime.as_secs_f64(),
            event_count: events.len(),
            events,
        }
    }
}

/// Serializes the recorder's contents as pretty-printed JSON.
pub fn export_json(
    recorder: &DiagnosticsRecorder,
    engine_uptime: Duration,
) -> Result<String, ExportError> {
    let report = DiagnosticReport::from_recorder(recorder, engine_uptime);
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Writes the JSON report to `path`, creating parent directories.
pub fn export_to_file(
    recorder: &DiagnosticsRecorder,
    engine_uptime: Duration,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = export_json(recorder, engine_uptime)?;
    fs::write(path, json)?;
    Ok(())
}
