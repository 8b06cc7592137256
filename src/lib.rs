//! deployto - deployment script generator
//!
//! Finds the files changed since the last deploy, matches the requested
//! server from `deploy-to.json`, and renders a bash script from a template
//! with `[[KEY]]` placeholders.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{generate, parse_since, GenerateOptions, GeneratedScript};
pub use config::{DeployConfig, Verbosity};
pub use domain::{clean_drive_letter, is_right_server, to_unix_path, DeployableEntry, ServerRecord};
pub use error::{DeployError, DeployResult};
pub use infrastructure::{get_deployable, populate_script, Scanner, Template, TemplateData};
