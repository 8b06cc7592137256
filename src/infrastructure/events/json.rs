//! JSON Event Sink
//!
//! Outputs scan events as NDJSON for CI/automation consumption.

use std::cell::RefCell;
use std::io::{self, Write};

use crate::domain::ports::{ScanEvent, ScanEventSink};

/// Event sink that outputs NDJSON events
pub struct JsonEventSink {
    writer: RefCell<Box<dyn Write>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + 'static>(writer: W) -> Self {
        Self {
            writer: RefCell::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        let mut writer = self.writer.borrow_mut();
        let _ = writeln!(writer, "{}", event);
        let _ = writer.flush();
    }
}

/// JSON form of a scan event
pub fn event_json(event: &ScanEvent) -> serde_json::Value {
    match event {
        ScanEvent::ServerSelected { name, target } => serde_json::json!({
            "event": "server_selected",
            "name": name,
            "target": target,
        }),

        ScanEvent::ScanStarted { path } => serde_json::json!({
            "event": "scan_start",
            "path": path,
        }),

        ScanEvent::FileIncluded { entry } => serde_json::json!({
            "event": "file_included",
            "local": entry.local,
            "remote": entry.remote,
        }),

        ScanEvent::FileUnchanged { path, modified } => serde_json::json!({
            "event": "file_unchanged",
            "path": path,
            "modified": modified.to_rfc3339(),
        }),

        ScanEvent::PathMissing { path } => serde_json::json!({
            "event": "path_missing",
            "path": path,
        }),

        ScanEvent::DirectoryUnreadable { path, error } => serde_json::json!({
            "event": "directory_unreadable",
            "path": path,
            "error": error,
        }),

        ScanEvent::CycleSkipped { path } => serde_json::json!({
            "event": "cycle_skipped",
            "path": path,
        }),

        ScanEvent::ScriptRendered { file_count, bytes } => serde_json::json!({
            "event": "script_rendered",
            "file_count": file_count,
            "bytes": bytes,
        }),
    }
}

impl ScanEventSink for JsonEventSink {
    fn on_event(&self, event: ScanEvent) {
        self.write_event(event_json(&event));
    }
}
