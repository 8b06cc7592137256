//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for CI/automation
//! - ConsoleEventSink: human-readable stderr lines

mod console;
mod json;

pub use console::ConsoleEventSink;
pub use json::JsonEventSink;
