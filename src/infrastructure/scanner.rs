//! Change-Set Scanner
//!
//! Walks files, directories and `*.ext` patterns depth-first and collects
//! every file modified after a cutoff.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::ports::{NoopEventSink, ScanEvent, ScanEventSink};
use crate::domain::{clean_drive_letter, to_unix_path, DeployableEntry};

/// Collects deployable files relative to a fixed base directory.
///
/// Relative input paths are resolved against `base`, and `base` is
/// stripped from paths when computing the remote directory. Local paths
/// are written as seen from the working directory, which defaults to
/// `base` itself.
pub struct Scanner<'a> {
    base: PathBuf,
    base_prefix: String,
    local_prefix: String,
    cutoff: DateTime<Utc>,
    events: &'a dyn ScanEventSink,
}

impl Scanner<'static> {
    pub fn new(base: impl Into<PathBuf>, cutoff: DateTime<Utc>) -> Self {
        let base = base.into();
        let mut base_prefix = unix_separators(&base.to_string_lossy());
        if !base_prefix.ends_with('/') {
            base_prefix.push('/');
        }

        Self {
            base,
            base_prefix,
            local_prefix: String::new(),
            cutoff,
            events: &NoopEventSink,
        }
    }
}

impl<'a> Scanner<'a> {
    /// Report scan progress to `events`
    pub fn with_events<'b>(self, events: &'b dyn ScanEventSink) -> Scanner<'b> {
        Scanner {
            base: self.base,
            base_prefix: self.base_prefix,
            local_prefix: self.local_prefix,
            cutoff: self.cutoff,
            events,
        }
    }

    /// Write local paths relative to `cwd` instead of the base.
    ///
    /// A base outside `cwd` makes local paths absolute.
    pub fn with_working_dir(mut self, cwd: &Path) -> Self {
        let relative = if self.base.is_absolute() {
            self.base.strip_prefix(cwd).unwrap_or(self.base.as_path())
        } else {
            self.base.as_path()
        };

        let mut prefix = unix_separators(&relative.to_string_lossy());
        if prefix == "." {
            prefix.clear();
        }
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }
        self.local_prefix = prefix;
        self
    }

    /// Every file under `path` modified strictly after the cutoff.
    ///
    /// `path` may name a file, a directory or a `*.ext` pattern. Anything
    /// else yields no entries. Children are visited in name order.
    pub fn deployable(&self, path: &str) -> Vec<DeployableEntry> {
        self.events.on_event(ScanEvent::ScanStarted {
            path: path.to_string(),
        });

        let mut output = Vec::new();
        let mut ancestors = Vec::new();
        self.collect(path, &mut ancestors, &mut output);
        output
    }

    fn collect(&self, path: &str, ancestors: &mut Vec<PathBuf>, output: &mut Vec<DeployableEntry>) {
        let real = self.resolve(path);

        match fs::metadata(&real) {
            Ok(meta) if meta.is_file() => self.check_file(path, &meta, output),
            Ok(meta) if meta.is_dir() => {
                let prefix = if path.ends_with('/') {
                    path.to_string()
                } else {
                    format!("{path}/")
                };
                self.collect_children(&real, &prefix, &|_: &str| true, ancestors, output);
            }
            _ => match split_wildcard(path) {
                Some((dir, ext)) => {
                    let real_dir = if dir.is_empty() {
                        self.base.clone()
                    } else {
                        self.resolve(dir)
                    };
                    self.collect_children(
                        &real_dir,
                        dir,
                        &|name: &str| name.ends_with(ext),
                        ancestors,
                        output,
                    );
                }
                None => self.events.on_event(ScanEvent::PathMissing {
                    path: path.to_string(),
                }),
            },
        }
    }

    /// List `dir` and recurse into every child accepted by `keep`.
    fn collect_children(
        &self,
        dir: &Path,
        prefix: &str,
        keep: &dyn Fn(&str) -> bool,
        ancestors: &mut Vec<PathBuf>,
        output: &mut Vec<DeployableEntry>,
    ) {
        let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        if ancestors.contains(&canonical) {
            self.events.on_event(ScanEvent::CycleSkipped {
                path: prefix.trim_end_matches('/').to_string(),
            });
            return;
        }

        let children = match list_children(dir) {
            Ok(children) => children,
            Err(e) => {
                self.events.on_event(ScanEvent::DirectoryUnreadable {
                    path: dir.display().to_string(),
                    error: e.to_string(),
                });
                return;
            }
        };

        ancestors.push(canonical);
        for name in children.iter().filter(|name| keep(name.as_str())) {
            self.collect(&format!("{prefix}{name}"), ancestors, output);
        }
        ancestors.pop();
    }

    fn check_file(&self, path: &str, meta: &fs::Metadata, output: &mut Vec<DeployableEntry>) {
        // Platforms without mtime support never report changes
        let Ok(modified) = meta.modified() else {
            return;
        };
        let modified = DateTime::<Utc>::from(modified);

        // Whole seconds on both sides
        if modified.timestamp() > self.cutoff.timestamp() {
            let entry = DeployableEntry::new(
                clean_drive_letter(&to_unix_path(&self.local_path(path))),
                self.remote_dir(path),
            );
            self.events.on_event(ScanEvent::FileIncluded {
                entry: entry.clone(),
            });
            output.push(entry);
        } else {
            self.events.on_event(ScanEvent::FileUnchanged {
                path: path.to_string(),
                modified,
            });
        }
    }

    fn local_path(&self, path: &str) -> String {
        if Path::new(path).is_absolute() {
            path.to_string()
        } else {
            format!("{}{path}", self.local_prefix)
        }
    }

    /// Directory part of `path` (with trailing slash) relative to the base.
    fn remote_dir(&self, path: &str) -> String {
        let path = unix_separators(path);
        let relative = path
            .strip_prefix(self.base_prefix.as_str())
            .unwrap_or(&path);
        let dir = match relative.rfind('/') {
            Some(i) => &relative[..=i],
            None => "",
        };
        dir.trim().to_string()
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base.join(p)
        }
    }
}

/// Convenience wrapper: scan `path` under `base` without event reporting.
pub fn get_deployable(base: &Path, path: &str, cutoff: DateTime<Utc>) -> Vec<DeployableEntry> {
    Scanner::new(base, cutoff).deployable(path)
}

/// Split `dir/*.ext` into (`dir/`, `.ext`).
///
/// The last segment must be exactly `*.` followed by ASCII letters (either
/// case); `app*.js` or `*.min.js` are not patterns. A pattern with no
/// directory part yields an empty prefix.
fn split_wildcard(path: &str) -> Option<(&str, &str)> {
    let (dir, last) = match path.rfind('/') {
        Some(i) => path.split_at(i + 1),
        None => ("", path),
    };

    let ext = last.strip_prefix('*')?;
    let letters = ext.strip_prefix('.')?;
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    Some((dir, ext))
}

fn unix_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Child names of `dir`, sorted. Names that are not valid UTF-8 are skipped.
fn list_children(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    Ok(names)
}
