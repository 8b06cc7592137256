//! Scan Event Port
//!
//! Observable interface for script generation.
//! Drives verbose console output and the NDJSON event stream.

use chrono::{DateTime, Utc};

use crate::domain::DeployableEntry;

/// Event emitted while selecting a server, scanning and rendering
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// A server record matched the requested target
    ServerSelected { name: String, target: String },

    /// Scanning of a requested path started
    ScanStarted { path: String },

    /// File changed after the cutoff and will be deployed
    FileIncluded { entry: DeployableEntry },

    /// File was not modified after the cutoff
    FileUnchanged {
        path: String,
        modified: DateTime<Utc>,
    },

    /// Path is neither a file, a directory nor a wildcard pattern
    PathMissing { path: String },

    /// Directory exists but could not be listed
    DirectoryUnreadable { path: String, error: String },

    /// Directory is already being scanned higher up (symlink loop)
    CycleSkipped { path: String },

    /// Template was populated
    ScriptRendered { file_count: usize, bytes: usize },
}

/// Trait for receiving scan events
///
/// Implementations:
/// - ConsoleEventSink: verbosity-gated stderr lines
/// - JsonEventSink: NDJSON event stream
/// - NoopEventSink: silent operation
pub trait ScanEventSink {
    /// Handle a scan event
    fn on_event(&self, event: ScanEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl ScanEventSink for NoopEventSink {
    fn on_event(&self, _event: ScanEvent) {}
}

/// Test event sink that records all events
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingEventSink {
    pub events: std::cell::RefCell<Vec<ScanEvent>>,
}

#[cfg(test)]
impl RecordingEventSink {
    pub fn take(&self) -> Vec<ScanEvent> {
        self.events.take()
    }
}

#[cfg(test)]
impl ScanEventSink for RecordingEventSink {
    fn on_event(&self, event: ScanEvent) {
        self.events.borrow_mut().push(event);
    }
}
