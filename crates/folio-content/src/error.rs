//! Content errors raised while parsing a single document.
//!
//! These are per-document failures: the builder records them and moves on to
//! the rest of the corpus.

use thiserror::Error;

/// Result alias for document-level parsing.
pub type ContentResult<T> = std::result::Result<T, ContentError>;

/// Reasons a raw document cannot become a [`Document`](crate::Document).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    /// The document does not begin with a `---` line.
    #[error("missing frontmatter: document does not start with a `---` line")]
    MissingFrontmatter,

    /// An opening `---` line was found but no closing one follows it.
    #[error("unterminated frontmatter: no closing `---` line after the opening marker")]
    UnterminatedFrontmatter,

    /// The delimited block is not a YAML key/value mapping.
    #[error("malformed frontmatter: {0}")]
    MalformedFrontmatter(String),

    /// A field is missing, empty, or has the wrong shape.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        /// Frontmatter key that failed validation.
        field: String,
        /// What went wrong.
        reason: String,
    },
}

impl ContentError {
    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFrontmatter => "missing_frontmatter",
            Self::UnterminatedFrontmatter => "unterminated_frontmatter",
            Self::MalformedFrontmatter(_) => "malformed_frontmatter",
            Self::InvalidField { .. } => "invalid_field",
        }
    }
}
