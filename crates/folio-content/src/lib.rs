//! Document splitting, frontmatter parsing, and the `Document` model.
//!
//! This crate turns raw corpus text into validated [`Document`] values. It
//! does no I/O; callers hand it strings.
//!
//! # Modules
//!
//! - [`splitter`]: Split files that bundle several articles
//! - [`frontmatter`]: Locate and parse the `---` delimited YAML block
//! - [`document`]: The `Document` model, validation, and serialization
//! - [`error`]: Per-document content errors
//!
//! # Example
//!
//! ```rust
//! use folio_content::{parse_document, split_documents, DEFAULT_SEPARATOR};
//!
//! let file = "---\ntitle: One\ndescription: d\ndate: 2025-03-07\n---\nFirst\n\
//!             <!-- folio:split -->\n\
//!             ---\ntitle: Two\ndescription: d\ndate: 2025-06-28\n---\nSecond\n";
//!
//! let docs: Vec<_> = split_documents(file, DEFAULT_SEPARATOR)
//!     .map(parse_document)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(docs.len(), 2);
//! assert_eq!(docs[1].id, "two");
//! ```

#![doc = include_str!("../README.md")]

pub mod document;
pub mod error;
pub mod frontmatter;
pub mod splitter;

mod proptests;

pub use document::{DATE_FORMAT, Document, UNCATEGORIZED, from_frontmatter, parse_document};
pub use error::{ContentError, ContentResult};
pub use frontmatter::{Frontmatter, extract_frontmatter};
pub use splitter::{DEFAULT_SEPARATOR, Splitter, split_documents};
