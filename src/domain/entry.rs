//! Deployable Entry

use serde::Serialize;

/// A changed file that needs shipping to the remote server.
///
/// `local` is the shell-ready local path, `remote` the remote directory
/// relative to the deploy root (empty for files in the root itself).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployableEntry {
    pub local: String,
    pub remote: String,
}

impl DeployableEntry {
    pub fn new(local: impl Into<String>, remote: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            remote: remote.into(),
        }
    }
}
