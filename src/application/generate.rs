//! Generate Use Case
//!
//! Selects the server, scans for changed files and renders the deployment
//! script. Nothing is executed or uploaded.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::DeployConfig;
use crate::domain::ports::{ScanEvent, ScanEventSink};
use crate::domain::{clean_drive_letter, to_unix_path, DeployableEntry, ServerRecord};
use crate::error::{DeployError, DeployResult};
use crate::infrastructure::{Scanner, Template, TemplateData};

/// Inputs for one script generation
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Server name or alias
    pub target: String,
    /// Paths to scan; empty means the config's `paths`, then `.`
    pub paths: Vec<String>,
    /// Only files modified after this instant are deployed
    pub since: DateTime<Utc>,
    /// Local directory remote paths are relative to
    pub base: PathBuf,
    /// Directory the script runs from; local paths are written relative
    /// to it. `None` means `base`.
    pub working_dir: Option<PathBuf>,
    /// Template override; `None` uses the config
    pub template: Option<PathBuf>,
    /// Timestamp written into the script
    pub generated_at: DateTime<Utc>,
}

impl GenerateOptions {
    pub fn new(target: impl Into<String>, base: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            paths: Vec::new(),
            since: DateTime::<Utc>::UNIX_EPOCH,
            base: base.into(),
            working_dir: None,
            template: None,
            generated_at: Utc::now(),
        }
    }

    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = since;
        self
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(working_dir.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }
}

/// Result of a generation
#[derive(Debug, Clone)]
pub struct GeneratedScript {
    /// Name of the selected server record
    pub server: String,
    pub entries: Vec<DeployableEntry>,
    pub script: String,
}

/// Render the deployment script for `options.target`.
///
/// Fails before scanning when the server is unknown or the template is
/// missing. Scan problems never fail; they are reported to `events`.
pub fn generate(
    config: &DeployConfig,
    options: &GenerateOptions,
    events: &dyn ScanEventSink,
) -> DeployResult<GeneratedScript> {
    let server = config
        .find_server(&options.target)
        .ok_or_else(|| DeployError::UnknownServer {
            target: options.target.clone(),
        })?;
    events.on_event(ScanEvent::ServerSelected {
        name: server.name.clone(),
        target: options.target.clone(),
    });

    let template_path = options
        .template
        .clone()
        .unwrap_or_else(|| config.template_path());
    let template = Template::load(&template_path)?;

    let paths: Vec<&str> = if !options.paths.is_empty() {
        options.paths.iter().map(String::as_str).collect()
    } else if !config.paths.is_empty() {
        config.paths.iter().map(String::as_str).collect()
    } else {
        vec!["."]
    };

    let mut scanner = Scanner::new(&options.base, options.since).with_events(events);
    if let Some(working_dir) = &options.working_dir {
        scanner = scanner.with_working_dir(working_dir);
    }
    let entries: Vec<DeployableEntry> = paths
        .into_iter()
        .flat_map(|path| scanner.deployable(path))
        .collect();

    let data = build_template_data(server, options, &entries);
    let script = template.populate(&data);
    events.on_event(ScanEvent::ScriptRendered {
        file_count: entries.len(),
        bytes: script.len(),
    });

    Ok(GeneratedScript {
        server: server.name.clone(),
        entries,
        script,
    })
}

/// Placeholder values for a deployment.
///
/// Scalar deployment fields of the server come first; computed keys
/// (`name`, `target`, `base`, `files`, `file_count`, `since`,
/// `generated_at`) override fields of the same name.
pub fn build_template_data(
    server: &ServerRecord,
    options: &GenerateOptions,
    entries: &[DeployableEntry],
) -> TemplateData {
    let mut data: TemplateData = server
        .fields
        .iter()
        .filter_map(|(key, value)| field_text(value).map(|text| (key.clone(), text)))
        .collect();

    data.insert("name".to_string(), server.name.clone());
    data.insert("target".to_string(), options.target.clone());
    data.insert(
        "base".to_string(),
        clean_drive_letter(&to_unix_path(&options.base.to_string_lossy())),
    );
    data.insert("files".to_string(), render_files(entries));
    data.insert("file_count".to_string(), entries.len().to_string());
    data.insert("since".to_string(), options.since.to_rfc3339());
    data.insert("generated_at".to_string(), options.generated_at.to_rfc3339());
    data
}

/// One `<local> <remote>` line per entry; the root remote is `./`.
fn render_files(entries: &[DeployableEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let remote = if entry.remote.is_empty() {
                "./".to_string()
            } else {
                to_unix_path(&entry.remote)
            };
            format!("{} {}", entry.local, remote)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(" ")),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse a cutoff given as unix seconds or RFC 3339.
pub fn parse_since(value: &str) -> DeployResult<DateTime<Utc>> {
    let trimmed = value.trim();
    let invalid = || DeployError::InvalidTimestamp {
        value: value.to_string(),
    };

    if let Ok(seconds) = trimmed.parse::<i64>() {
        return DateTime::from_timestamp(seconds, 0).ok_or_else(invalid);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| invalid())
}
