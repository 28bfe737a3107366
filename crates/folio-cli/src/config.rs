//! Configuration for the `folio` CLI.
//!
//! [`FolioConfig`] loads from a TOML file, environment variables, and
//! defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `FOLIO_CONFIG` environment variable
//! 3. XDG default: `~/.config/folio/config.toml`
//! 4. Built-in defaults
//!
//! Individual keys can be overridden with `FOLIO_CONTENT_*` and
//! `FOLIO_INDEX_*` environment variables.

use std::path::PathBuf;

use confyg::{Confygery, env};
use folio_content::DEFAULT_SEPARATOR;
use folio_core::util::files::DEFAULT_INCLUDE;
use folio_core::{Error, Result, expand_path};
use folio_index::{CorpusBuilder, DEFAULT_CONCURRENCY};
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FOLIO_CONFIG";

/// Prefix for per-key environment overrides.
pub const ENV_PREFIX: &str = "FOLIO";

/// Default number of related documents per document.
pub const DEFAULT_RELATED_LIMIT: usize = 5;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the `folio` CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Where and how to read the corpus.
    pub content: ContentConfig,

    /// Index and export settings.
    pub index: IndexConfig,
}

/// Corpus discovery and parsing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content directory. `~` is expanded.
    pub path: Option<String>,

    /// Glob patterns, relative to `path`, selecting source files.
    pub include: Vec<String>,

    /// Line separating documents bundled in one file.
    pub separator: String,

    /// Files read and parsed at once.
    pub concurrency: usize,
}

/// Index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Related documents kept per document.
    pub related_limit: usize,

    /// Default output file for `build`. `~` is expanded.
    pub output: Option<String>,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: None,
            include: vec![DEFAULT_INCLUDE.to_string()],
            separator: DEFAULT_SEPARATOR.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            related_limit: DEFAULT_RELATED_LIMIT,
            output: None,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl FolioConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A missing config file is not an error; defaults apply.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("content");
        env_opts.add_section("index");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(expand_path(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(expand_path(&path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// The content directory, preferring `override_path` over the config.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if neither is set.
    pub fn content_path(&self, override_path: Option<&str>) -> Result<PathBuf> {
        override_path
            .or(self.content.path.as_deref())
            .map(expand_path)
            .ok_or_else(|| {
                Error::config(
                    "No content directory: pass --content or set content.path in the config file",
                )
            })
    }

    /// The default `build` output file, if configured.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.index.output.as_deref().map(expand_path)
    }

    /// A corpus builder using these settings.
    pub fn corpus_builder(&self, content_override: Option<&str>) -> Result<CorpusBuilder> {
        Ok(CorpusBuilder::new(self.content_path(content_override)?)
            .with_include(self.content.include.iter().cloned())
            .with_separator(self.content.separator.clone())
            .with_concurrency(self.content.concurrency))
    }
}

// ============================================================================
// Tests
// ============================================================================
