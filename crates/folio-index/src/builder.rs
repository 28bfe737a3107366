//! Corpus build orchestration.
//!
//! [`CorpusBuilder`] walks a content directory, reads and parses every
//! matching file concurrently, and registers the resulting documents in a
//! [`ContentIndex`]. Failures in a single file or document never stop the
//! build; they are collected as [`Issue`]s in the [`BuildReport`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use folio_index::CorpusBuilder;
//!
//! # async fn run() -> folio_core::Result<()> {
//! let (index, report) = CorpusBuilder::new("content")
//!     .with_concurrency(4)
//!     .build()
//!     .await?;
//!
//! println!("Indexed {} documents", report.documents_indexed);
//! for issue in &report.issues {
//!     eprintln!("{issue}");
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_content::{ContentError, DEFAULT_SEPARATOR, Document, parse_document, split_documents};
use folio_core::util::files::DEFAULT_INCLUDE;
use folio_core::{Error, FileInfo, FindOptions, Result, find_all_files, read_file};
use futures::StreamExt;
use serde::Serialize;

use crate::ContentIndex;
use crate::registry::DocumentRegistry;

/// Default number of files processed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 8;

// ============================================================================
// Issues and reports
// ============================================================================

/// A problem found in one file or one bundled document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "IssueRecord")]
pub struct Issue {
    /// File path relative to the content root.
    pub source: PathBuf,
    /// 1-based position of the document within a bundled file.
    pub position: Option<usize>,
    /// What went wrong.
    pub kind: IssueKind,
}

/// Kinds of build issues.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// The file could not be read (missing permissions, not UTF-8, ...).
    Read {
        /// Underlying error message.
        message: String,
    },
    /// A document failed to parse.
    Parse(ContentError),
    /// A document reused an id seen earlier in the same build. The later
    /// document was kept.
    DuplicateId {
        /// The shared id.
        id: String,
        /// Location of the replaced document.
        previous: String,
    },
}

impl IssueKind {
    /// Short machine-readable kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Parse(e) => e.kind(),
            Self::DuplicateId { .. } => "duplicate_id",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { message } => write!(f, "unreadable file: {message}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::DuplicateId { id, previous } => {
                write!(f, "duplicate id `{id}` replaces the document from {previous}")
            }
        }
    }
}

impl Issue {
    /// Human-readable location: the source path, plus the document position
    /// for bundled files.
    pub fn location(&self) -> String {
        location(&self.source, self.position)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.kind)
    }
}

fn location(source: &Path, position: Option<usize>) -> String {
    match position {
        Some(n) => format!("{} (document {n})", source.display()),
        None => source.display().to_string(),
    }
}

/// Flat serialized form of an [`Issue`].
#[derive(Serialize)]
struct IssueRecord {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
    kind: &'static str,
    message: String,
}

impl From<Issue> for IssueRecord {
    fn from(issue: Issue) -> Self {
        Self {
            source: issue.source.display().to_string(),
            position: issue.position,
            kind: issue.kind.name(),
            message: issue.kind.to_string(),
        }
    }
}

/// Summary of a corpus build.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    /// Files matched by the include patterns.
    pub files_scanned: usize,
    /// Files that could not be read.
    pub files_failed: usize,
    /// Documents that parsed successfully.
    pub documents_parsed: usize,
    /// Documents in the final registry.
    pub documents_indexed: usize,
    /// Every problem found, in file order.
    pub issues: Vec<Issue>,
}

impl BuildReport {
    /// Returns true if the build found no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

// ============================================================================
// CorpusBuilder
// ============================================================================

/// Parsed contents of one file.
struct FileOutcome {
    source: PathBuf,
    documents: std::result::Result<Vec<(Option<usize>, folio_content::ContentResult<Document>)>, String>,
}

/// Builds a [`ContentIndex`] from a directory of markdown files.
#[derive(Debug, Clone)]
pub struct CorpusBuilder {
    content_path: PathBuf,
    include: Vec<String>,
    separator: String,
    concurrency: usize,
}

impl CorpusBuilder {
    /// Create a builder for the given content directory.
    pub fn new(content_path: impl Into<PathBuf>) -> Self {
        Self {
            content_path: content_path.into(),
            include: vec![DEFAULT_INCLUDE.to_string()],
            separator: DEFAULT_SEPARATOR.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Replace the content directory.
    pub fn with_content_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.content_path = path.into();
        self
    }

    /// Replace the include glob patterns.
    pub fn with_include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the sentinel line separating bundled documents.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set how many files are read and parsed at once (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The content directory this builder reads.
    pub fn content_path(&self) -> &Path {
        &self.content_path
    }

    /// Discover, read, and parse the corpus.
    ///
    /// Files are processed concurrently but their results are applied in
    /// sorted path order, so when two documents share an id the one from
    /// the later path (or later in the same file) wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory is missing, an include
    /// pattern is invalid, or a worker task panics. Per-file and
    /// per-document problems are reported in the [`BuildReport`] instead.
    pub async fn build(&self) -> Result<(ContentIndex, BuildReport)> {
        let options = FindOptions::markdown().with_patterns(&self.include)?;
        log::info!("Building index from {}", self.content_path.display());

        let files = find_all_files(&self.content_path, &options).await?;
        let separator: Arc<str> = Arc::from(self.separator.as_str());

        let mut report = BuildReport {
            files_scanned: files.len(),
            ..Default::default()
        };

        let mut outcomes = futures::stream::iter(files)
            .map(|file| {
                let separator = Arc::clone(&separator);
                tokio::spawn(process_file(file, separator))
            })
            .buffered(self.concurrency);

        let mut registry = DocumentRegistry::new();
        let mut origins: HashMap<String, String> = HashMap::new();

        while let Some(joined) = outcomes.next().await {
            let outcome =
                joined.map_err(|e| Error::operation(format!("file worker failed: {e}")))?;
            apply(outcome, &mut registry, &mut origins, &mut report);
        }

        report.documents_indexed = registry.len();
        for issue in &report.issues {
            log::warn!("{issue}");
        }
        log::info!(
            "Indexed {} documents from {} files ({} issues)",
            report.documents_indexed,
            report.files_scanned,
            report.issues.len()
        );

        Ok((ContentIndex::from_registry(registry), report))
    }
}

/// Read, split, and parse one file.
async fn process_file(file: FileInfo, separator: Arc<str>) -> FileOutcome {
    let text = match read_file(&file.path).await {
        Ok(text) => text,
        Err(e) => {
            return FileOutcome {
                source: file.relative_path,
                documents: Err(e.to_string()),
            };
        }
    };

    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    let segments: Vec<&str> = split_documents(text, &separator).collect();
    let bundled = segments.len() > 1;
    let documents = segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| (bundled.then_some(i + 1), parse_document(segment)))
        .collect();

    FileOutcome {
        source: file.relative_path,
        documents: Ok(documents),
    }
}

/// Register one file's documents, recording issues as they arise.
fn apply(
    outcome: FileOutcome,
    registry: &mut DocumentRegistry,
    origins: &mut HashMap<String, String>,
    report: &mut BuildReport,
) {
    let FileOutcome { source, documents } = outcome;

    let documents = match documents {
        Ok(documents) => documents,
        Err(message) => {
            report.files_failed += 1;
            report.issues.push(Issue {
                source,
                position: None,
                kind: IssueKind::Read { message },
            });
            return;
        }
    };

    for (position, parsed) in documents {
        let document = match parsed {
            Ok(document) => document,
            Err(e) => {
                report.issues.push(Issue {
                    source: source.clone(),
                    position,
                    kind: IssueKind::Parse(e),
                });
                continue;
            }
        };
        report.documents_parsed += 1;

        let id = document.id.clone();
        match registry.upsert(document) {
            Ok(Some(_)) => {
                let previous = origins
                    .insert(id.clone(), location(&source, position))
                    .unwrap_or_default();
                report.issues.push(Issue {
                    source: source.clone(),
                    position,
                    kind: IssueKind::DuplicateId { id, previous },
                });
            }
            Ok(None) => {
                origins.insert(id, location(&source, position));
            }
            Err(e) => {
                report.issues.push(Issue {
                    source: source.clone(),
                    position,
                    kind: IssueKind::Parse(ContentError::invalid_field("title", e.to_string())),
                });
            }
        }
    }
}
