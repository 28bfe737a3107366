//! Async file discovery and reading.
//!
//! Corpus directories are walked with `async-walkdir` and filtered through
//! glob patterns matched against each file's path relative to the walk root.
//! Results are sorted so every build sees files in the same order.

use async_walkdir::WalkDir;
use futures::StreamExt;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

/// Default include pattern for corpus discovery.
pub const DEFAULT_INCLUDE: &str = "**/*.md";

/// Options for discovering files.
#[derive(Debug, Clone)]
pub struct FindOptions {
    /// Glob patterns matched against paths relative to the search base.
    /// A file is included when any pattern matches.
    pub patterns: Vec<Pattern>,
    /// Maximum directory depth to search (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self::markdown()
    }
}

impl FindOptions {
    /// Options matching markdown files at any depth.
    pub fn markdown() -> Self {
        Self {
            // The literal is a valid pattern; the fallback is unreachable.
            patterns: Pattern::new(DEFAULT_INCLUDE).into_iter().collect(),
            max_depth: None,
        }
    }

    /// Replace the include patterns.
    ///
    /// Fails with a configuration error if any pattern is not valid glob
    /// syntax.
    pub fn with_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        self.patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|e| {
                    Error::config(format!("Invalid include pattern '{}': {e}", p.as_ref()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// Set maximum search depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Returns true if the relative path matches any include pattern.
    pub fn matches(&self, relative: &Path) -> bool {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.patterns
            .iter()
            .any(|p| p.matches_path_with(relative, options))
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

/// Find all files matching `options` below `base_path`.
///
/// Entries the walker cannot read are logged and skipped; a missing base
/// directory is an error. The result is sorted by relative path.
pub async fn find_all_files(base_path: &Path, options: &FindOptions) -> Result<Vec<FileInfo>> {
    let meta = fs::metadata(base_path)
        .await
        .map_err(|e| Error::io_with_path(e, base_path))?;
    if !meta.is_dir() {
        return Err(Error::invalid_data(format!(
            "Content path is not a directory: {}",
            base_path.display()
        )));
    }

    let mut files = Vec::new();
    let mut walker = WalkDir::new(base_path);

    while let Some(entry_result) = walker.next().await {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {e}", base_path.display());
                continue;
            }
        };
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();

        if let Some(max_depth) = options.max_depth {
            if relative_path.components().count() > max_depth {
                continue;
            }
        }

        if !options.matches(&relative_path) {
            continue;
        }

        files.push(FileInfo {
            path: path.to_path_buf(),
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::debug!("Discovered {} files under {}", files.len(), base_path.display());
    Ok(files)
}

/// Read a file's contents as UTF-8.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Expand a leading `~` (and `~user`) in a configured path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
