//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeployError, DeployResult};

use super::types::{DeployConfig, Verbosity};

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "deploy-to.json";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// Relative `template` and `base` paths are anchored at the config file's
/// directory. Every server record must have a non-empty name.
pub fn load_with_warnings(path: &Path) -> DeployResult<(DeployConfig, Vec<ConfigWarning>)> {
    if !path.is_file() {
        return Err(DeployError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;

    let invalid = |message: String| DeployError::InvalidConfig {
        file: path.to_path_buf(),
        message,
    };

    let mut unknown_paths: Vec<String> = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(&content);
    let config: DeployConfig = serde_ignored::deserialize(&mut deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(e.to_string()))?;
    deserializer.end().map_err(|e| invalid(e.to_string()))?;

    if let Some(index) = config.servers.iter().position(|s| s.name.trim().is_empty()) {
        return Err(invalid(format!("server #{} has an empty name", index + 1)));
    }

    let warnings = unknown_paths
        .into_iter()
        .map(|unknown| {
            let key = unknown
                .rsplit_once('.')
                .map_or(unknown.as_str(), |(_, key)| key)
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&unknown),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok((config.resolve_relative_to(dir), warnings))
}

/// Pick the config file to load.
///
/// Order: explicit path, `DEPLOYTO_CONFIG`, `./deploy-to.json`, then
/// `<user config dir>/deployto/deploy-to.json`. Falls back to the working
/// directory path so the caller reports a clear "not found".
pub fn locate_config(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    locate_config_with(
        explicit,
        cwd,
        |key| std::env::var(key).ok(),
        dirs::config_dir(),
    )
}

/// `locate_config` with the environment and user config dir injected
pub fn locate_config_with(
    explicit: Option<&Path>,
    cwd: &Path,
    get_env: impl Fn(&str) -> Option<String>,
    user_config_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(path) = get_env("DEPLOYTO_CONFIG").filter(|v| !v.is_empty()) {
        return cwd.join(path);
    }

    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return local;
    }

    user_config_dir
        .map(|dir| dir.join("deployto").join(CONFIG_FILE_NAME))
        .filter(|user| user.is_file())
        .unwrap_or(local)
}

/// Apply environment variable overrides (DEPLOYTO_* prefix)
pub fn with_env_overrides(config: DeployConfig) -> DeployConfig {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `get_env`
pub fn apply_env_overrides(
    mut config: DeployConfig,
    get_env: impl Fn(&str) -> Option<String>,
) -> DeployConfig {
    // DEPLOYTO_TEMPLATE
    if let Some(template) = get_env("DEPLOYTO_TEMPLATE").filter(|v| !v.is_empty()) {
        config.template = Some(PathBuf::from(template));
    }

    // DEPLOYTO_BASE
    if let Some(base) = get_env("DEPLOYTO_BASE").filter(|v| !v.is_empty()) {
        config.base = Some(PathBuf::from(base));
    }

    // DEPLOYTO_VERBOSITY
    if let Some(verbosity) = get_env("DEPLOYTO_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    config
}

/// Line (1-based) where `key` is written as an object key.
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    let quoted = format!("\"{key}\"");
    content
        .lines()
        .enumerate()
        .find(|(_, line)| {
            line.match_indices(&quoted).any(|(at, _)| {
                line[at + quoted.len()..].trim_start().starts_with(':')
            })
        })
        .map(|(index, _)| index + 1)
}

/// Closest known key for an unknown config path such as `output.verbosty`.
fn suggest_key(unknown_path: &str) -> Option<String> {
    const TOP_LEVEL: &[&str] = &["template", "base", "paths", "servers", "output"];
    const OUTPUT: &[&str] = &["verbosity"];

    let (known, key) = match unknown_path.rsplit_once('.') {
        Some(("output", key)) => (OUTPUT, key),
        Some(_) => return None,
        None => (TOP_LEVEL, unknown_path),
    };

    // Allow one edit for short keys, two otherwise
    let limit = if key.chars().count() <= 4 { 1 } else { 2 };
    known
        .iter()
        .map(|candidate| (edit_distance(key, candidate), *candidate))
        .filter(|(distance, _)| *distance <= limit)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.to_string())
}

/// Levenshtein distance over chars, one row at a time.
fn edit_distance(from: &str, to: &str) -> usize {
    let to: Vec<char> = to.chars().collect();
    let mut row: Vec<usize> = (0..=to.len()).collect();

    for (i, a) in from.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, b) in to.iter().enumerate() {
            let substitute = diagonal + usize::from(a != *b);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[to.len()]
}
