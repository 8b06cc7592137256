//! Domain Ports
//!
//! Interfaces the infrastructure layer implements.

pub mod scan_events;

pub use scan_events::{NoopEventSink, ScanEvent, ScanEventSink};
