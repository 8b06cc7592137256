//! Console Event Sink
//!
//! Human-readable progress on stderr, gated by verbosity.

use std::cell::RefCell;
use std::io::{self, Write};

use crate::config::Verbosity;
use crate::domain::ports::{ScanEvent, ScanEventSink};

pub struct ConsoleEventSink {
    verbosity: Verbosity,
    writer: RefCell<Box<dyn Write>>,
}

impl ConsoleEventSink {
    pub fn stderr(verbosity: Verbosity) -> Self {
        Self::with_writer(verbosity, io::stderr())
    }

    pub fn with_writer<W: Write + 'static>(verbosity: Verbosity, writer: W) -> Self {
        Self {
            verbosity,
            writer: RefCell::new(Box::new(writer)),
        }
    }

    /// Minimum verbosity at which `event` is printed
    fn level(event: &ScanEvent) -> Verbosity {
        match event {
            ScanEvent::PathMissing { .. }
            | ScanEvent::DirectoryUnreadable { .. }
            | ScanEvent::CycleSkipped { .. } => Verbosity::Normal,
            ScanEvent::ServerSelected { .. }
            | ScanEvent::ScanStarted { .. }
            | ScanEvent::FileIncluded { .. }
            | ScanEvent::ScriptRendered { .. } => Verbosity::Verbose,
            ScanEvent::FileUnchanged { .. } => Verbosity::Debug,
        }
    }

    fn render(event: &ScanEvent) -> String {
        match event {
            ScanEvent::ServerSelected { name, target } if name == target => {
                format!("🎯 Server: {}", name)
            }
            ScanEvent::ServerSelected { name, target } => {
                format!("🎯 Server: {} (alias '{}')", name, target)
            }
            ScanEvent::ScanStarted { path } => format!("📂 Scanning: {}", path),
            ScanEvent::FileIncluded { entry } if entry.remote.is_empty() => {
                format!("  + {}", entry.local)
            }
            ScanEvent::FileIncluded { entry } => format!("  + {} -> {}", entry.local, entry.remote),
            ScanEvent::FileUnchanged { path, modified } => {
                format!("  · {} (unchanged since {})", path, modified.to_rfc3339())
            }
            ScanEvent::PathMissing { path } => format!("⚠ Nothing to deploy at '{}'", path),
            ScanEvent::DirectoryUnreadable { path, error } => {
                format!("⚠ Could not read directory {}: {}", path, error)
            }
            ScanEvent::CycleSkipped { path } => {
                format!("⚠ Skipping {}: symbolic link loop", path)
            }
            ScanEvent::ScriptRendered { file_count, bytes } => {
                format!("✓ Rendered script: {} files, {} bytes", file_count, bytes)
            }
        }
    }
}

impl ScanEventSink for ConsoleEventSink {
    fn on_event(&self, event: ScanEvent) {
        if self.verbosity < Self::level(&event) {
            return;
        }
        let mut writer = self.writer.borrow_mut();
        let _ = writeln!(writer, "{}", Self::render(&event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeployableEntry;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    fn emit_all(sink: &ConsoleEventSink) {
        sink.on_event(ScanEvent::ServerSelected {
            name: "production".to_string(),
            target: "prod".to_string(),
        });
        sink.on_event(ScanEvent::FileIncluded {
            entry: DeployableEntry::new("site/a.txt", "site/"),
        });
        sink.on_event(ScanEvent::FileUnchanged {
            path: "site/b.txt".to_string(),
            modified: chrono::DateTime::from_timestamp(0, 0).unwrap(),
        });
        sink.on_event(ScanEvent::PathMissing {
            path: "gone".to_string(),
        });
    }

    #[test]
    fn normal_shows_only_warnings() {
        let buffer = SharedBuffer::default();
        emit_all(&ConsoleEventSink::with_writer(Verbosity::Normal, buffer.clone()));

        assert_eq!(buffer.text(), "⚠ Nothing to deploy at 'gone'\n");
    }

    #[test]
    fn verbose_shows_included_files() {
        let buffer = SharedBuffer::default();
        emit_all(&ConsoleEventSink::with_writer(Verbosity::Verbose, buffer.clone()));

        let text = buffer.text();
        assert!(text.contains("🎯 Server: production (alias 'prod')"));
        assert!(text.contains("  + site/a.txt -> site/"));
        assert!(!text.contains("site/b.txt"));
    }

    #[test]
    fn debug_shows_unchanged_files() {
        let buffer = SharedBuffer::default();
        emit_all(&ConsoleEventSink::with_writer(Verbosity::Debug, buffer.clone()));

        assert!(buffer
            .text()
            .contains("  · site/b.txt (unchanged since 1970-01-01T00:00:00+00:00)"));
    }

    #[test]
    fn quiet_shows_nothing() {
        let buffer = SharedBuffer::default();
        emit_all(&ConsoleEventSink::with_writer(Verbosity::Quiet, buffer.clone()));

        assert!(buffer.text().is_empty());
    }
}
