//! Utility modules for identifiers and file discovery.
//!
//! # Modules
//!
//! - [`files`]: Async corpus discovery and reading
//! - [`ids`]: Slug derivation for document identifiers

pub mod files;
pub mod ids;
