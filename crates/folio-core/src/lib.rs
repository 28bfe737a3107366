//! Folio Core: shared errors, identifiers, and file utilities.
//!
//! This crate provides the foundational types used across all Folio crates.
//! It has no internal Folio dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: File discovery and ID utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::files::{FileInfo, FindOptions, expand_path, find_all_files, read_file};
pub use util::ids::{is_slug, slugify};
