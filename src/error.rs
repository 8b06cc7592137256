//! Error types for deployto
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for deployto operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for deployto operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// Script template could not be resolved to an existing file
    #[error("could not find bash script template file at \"{path}\"")]
    TemplateNotFound { path: PathBuf },

    /// Config file does not exist
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Config file exists but is unusable
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// No server record matches the requested target
    #[error("no server named or aliased '{target}' in config")]
    UnknownServer { target: String },

    /// Cutoff time could not be parsed
    #[error("invalid timestamp '{value}' - expected unix seconds or RFC 3339")]
    InvalidTimestamp { value: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
