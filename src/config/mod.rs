//! Configuration for deployto
//!
//! Loads `deploy-to.json`:
//!
//! ```json
//! {
//!   "template": "deploy-to.tmpl.sh",
//!   "paths": ["site", "*.php"],
//!   "servers": [
//!     { "name": "production", "aliases": ["prod", "live"], "host": "example.org" }
//!   ]
//! }
//! ```

mod loader;
mod types;


pub use loader::{
    apply_env_overrides, load_with_warnings, locate_config, locate_config_with, with_env_overrides,
    ConfigWarning, CONFIG_FILE_NAME,
};
pub use types::{DeployConfig, OutputConfig, Verbosity, DEFAULT_TEMPLATE};
