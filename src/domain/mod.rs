//! Domain Layer
//!
//! Pure logic with no file system access.
//!
//! - `server` - server records and target matching
//! - `path` - Windows to shell path normalization
//! - `entry` - files selected for deployment
//! - `ports` - interfaces implemented by the infrastructure layer

pub mod entry;
pub mod path;
pub mod ports;
pub mod server;

pub use entry::DeployableEntry;
pub use path::{clean_drive_letter, to_unix_path};
pub use server::{is_right_server, ServerRecord};
