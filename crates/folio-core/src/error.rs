//! Error types for Folio operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all Folio crates. Content-level parse failures have their own type
//! in `folio-content`; this one covers I/O, configuration, and everything
//! that can stop an operation outright.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Folio operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error, optionally tagged with the path that caused it.
    #[error("I/O error{}: {source}", path_suffix(.path))]
    Io {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Path involved in the failed operation, if known.
        path: Option<PathBuf>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse error (JSON, TOML, or other structured input).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A higher-level operation failed.
    #[error("Operation failed: {0}")]
    Operation(String),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" at {}", p.display()),
        None => String::new(),
    }
}

impl Error {
    /// Create an I/O error without path context.
    pub fn io(source: std::io::Error) -> Self {
        Self::Io { source, path: None }
    }

    /// Create an I/O error tagged with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            source,
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Returns true if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The path associated with this error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::io(source)
    }
}

/// Result type alias using Folio's Error type.
pub type Result<T> = std::result::Result<T, Error>;
