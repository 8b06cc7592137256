//! Template Populator
//!
//! Fills `[[KEY]]` placeholders in a bash script template.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::{DeployError, DeployResult};

/// Placeholder key to substitution value.
///
/// Keys are matched case-insensitively: `name` fills `[[NAME]]`.
pub type TemplateData = BTreeMap<String, String>;

const OPEN: &str = "[[";
const CLOSE: &str = "]]";

/// A loaded script template
#[derive(Debug, Clone)]
pub struct Template {
    contents: String,
}

impl Template {
    /// Load the template at `path`.
    ///
    /// A path that does not resolve to a regular file is a setup error the
    /// caller must handle before doing any other work.
    pub fn load(path: &Path) -> DeployResult<Self> {
        if !path.is_file() {
            return Err(DeployError::TemplateNotFound {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            contents: fs::read_to_string(path)?,
        })
    }

    /// Template from in-memory text
    pub fn from_string(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    /// Replace every `[[KEY]]` with its value in a single pass.
    ///
    /// Unknown placeholders stay verbatim. Values are inserted as-is and
    /// never re-scanned, so a value containing `[[OTHER]]` is not expanded.
    pub fn populate(&self, data: &TemplateData) -> String {
        let tokens: HashMap<String, &str> = data
            .iter()
            .map(|(key, value)| (format!("{OPEN}{}{CLOSE}", key.to_uppercase()), value.as_str()))
            .collect();

        let mut out = String::with_capacity(self.contents.len());
        let mut rest = self.contents.as_str();

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            rest = &rest[start..];

            let token_len = rest[OPEN.len()..]
                .find(CLOSE)
                .map(|end| OPEN.len() + end + CLOSE.len());

            match token_len.and_then(|len| tokens.get(&rest[..len]).map(|value| (len, value))) {
                Some((len, value)) => {
                    out.push_str(value);
                    rest = &rest[len..];
                }
                None => {
                    // Not a known token; emit one bracket so nested `[[[[KEY]]` still matches
                    out.push('[');
                    rest = &rest[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Load the template at `path` and populate it with `data`.
pub fn populate_script(path: &Path, data: &TemplateData) -> DeployResult<String> {
    Ok(Template::load(path)?.populate(data))
}
