//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::ServerRecord;
use crate::error::DeployResult;

use super::loader::{self, ConfigWarning};

/// Template used when the config names none
pub const DEFAULT_TEMPLATE: &str = "deploy-to.tmpl.sh";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeployConfig {
    /// Bash script template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Local directory remote paths are computed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<PathBuf>,

    /// Paths scanned when none are given on the command line
    #[serde(default)]
    pub paths: Vec<String>,

    #[serde(default)]
    pub servers: Vec<ServerRecord>,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Level for a `-v` count, starting from `self`
    pub fn raised_by(self, count: u8) -> Self {
        match (self, count) {
            (level, 0) => level,
            (Verbosity::Quiet | Verbosity::Normal, 1) => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

impl DeployConfig {
    /// Load configuration from a JSON file, discarding warnings
    pub fn load(path: &Path) -> DeployResult<Self> {
        Ok(loader::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> DeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// First server whose name or aliases match `target`
    pub fn find_server(&self, target: &str) -> Option<&ServerRecord> {
        self.servers.iter().find(|s| s.is_right_server(target))
    }

    /// Configured template, or the default name
    pub fn template_path(&self) -> PathBuf {
        self.template
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE))
    }

    /// Make relative `template` and `base` relative to `dir`
    pub fn resolve_relative_to(mut self, dir: &Path) -> Self {
        if let Some(template) = self.template.take() {
            self.template = Some(anchor(dir, template));
        }
        if let Some(base) = self.base.take() {
            self.base = Some(anchor(dir, base));
        }
        self
    }
}

fn anchor(dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        dir.join(path)
    }
}
