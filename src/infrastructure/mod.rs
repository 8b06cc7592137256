//! Infrastructure Layer
//!
//! Everything that touches the file system or writes output.

pub mod events;
pub mod fs;
pub mod scanner;
pub mod template;

pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::write_script;
pub use scanner::{get_deployable, Scanner};
pub use template::{populate_script, Template, TemplateData};
