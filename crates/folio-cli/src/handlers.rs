//! Handlers for the corpus commands: `build`, `validate`, and the queries.
//!
//! Every handler builds the index fresh from the content directory; nothing
//! is cached between runs.

use std::path::PathBuf;

use folio_content::Document;
use folio_core::{Error, Result};
use folio_index::{BuildReport, ContentIndex, IndexExport};

use crate::config::FolioConfig;

// ============================================================================
// Option types
// ============================================================================

/// Options for `build`.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Content directory override.
    pub content: Option<String>,
    /// Output file; falls back to `index.output`, then stdout.
    pub output: Option<String>,
    /// Related documents per document; falls back to `index.related_limit`.
    pub related_limit: Option<usize>,
}

/// Corpus queries.
#[derive(Debug, Clone)]
pub enum Query {
    /// One document by id.
    Show(String),
    /// Documents in a category.
    Category(String),
    /// Documents with a tag.
    Tag(String),
    /// Documents related to an id.
    Related {
        /// Query document id.
        id: String,
        /// Maximum results; falls back to `index.related_limit`.
        limit: Option<usize>,
    },
}

// ============================================================================
// Handlers
// ============================================================================

async fn load_index(
    config: &FolioConfig,
    content: Option<&str>,
) -> Result<(ContentIndex, BuildReport)> {
    config.corpus_builder(content)?.build().await
}

/// Build the index and write its JSON export.
///
/// Skipped documents are logged as warnings; they do not fail the build.
/// Returns the output path, or `None` when the JSON went to stdout.
pub async fn handle_build(config: &FolioConfig, options: BuildOptions) -> Result<Option<PathBuf>> {
    let (index, report) = load_index(config, options.content.as_deref()).await?;

    let related_limit = options.related_limit.unwrap_or(config.index.related_limit);
    let export = IndexExport::from_index(&index, related_limit).with_issues(report.issues);

    let output = options
        .output
        .as_deref()
        .map(folio_core::expand_path)
        .or_else(|| config.output_path());

    match output {
        Some(path) => {
            export.write_to(&path)?;
            log::info!(
                "Wrote {} documents to {}",
                export.document_count,
                path.display()
            );
            Ok(Some(path))
        }
        None => {
            println!("{}", export.to_json_pretty()?);
            Ok(None)
        }
    }
}

/// Check the corpus, printing every issue.
///
/// # Errors
///
/// Fails if any file or document has a problem, so the process exits
/// non-zero.
pub async fn handle_validate(config: &FolioConfig, content: Option<&str>) -> Result<()> {
    let (_, report) = load_index(config, content).await?;

    for issue in &report.issues {
        println!("  {issue}");
    }
    println!(
        "\nSummary: {} file(s), {} document(s) indexed, {} issue(s)",
        report.files_scanned,
        report.documents_indexed,
        report.issues.len()
    );

    if report.is_clean() {
        println!("Corpus is valid.");
        Ok(())
    } else {
        Err(Error::operation(format!(
            "Validation failed with {} issue(s)",
            report.issues.len()
        )))
    }
}

/// Run a query against a freshly built index.
pub async fn handle_query(config: &FolioConfig, content: Option<&str>, query: Query) -> Result<()> {
    let (index, _) = load_index(config, content).await?;
    let output = render_query(&index, query, config.index.related_limit)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Render a query result as text.
///
/// `show` renders the document as JSON; listings render one line per
/// document. An empty listing renders as an empty string.
pub fn render_query(index: &ContentIndex, query: Query, default_limit: usize) -> Result<String> {
    match query {
        Query::Show(id) => {
            let doc = index
                .get(&id)
                .ok_or_else(|| Error::not_found(format!("document '{id}'")))?;
            serde_json::to_string_pretty(doc)
                .map_err(|e| Error::operation(format!("Failed to serialize document: {e}")))
        }
        Query::Category(name) => Ok(listing(index.by_category(&name))),
        Query::Tag(name) => Ok(listing(index.by_tag(&name))),
        Query::Related { id, limit } => {
            if index.get(&id).is_none() {
                log::warn!("Unknown document '{id}'");
            }
            let related = index.related_to(&id, limit.unwrap_or(default_limit));
            Ok(listing(related.into_iter().map(|r| r.document)))
        }
    }
}

fn listing<'a>(docs: impl IntoIterator<Item = &'a Document>) -> String {
    docs.into_iter()
        .map(|d| format!("{}  {}  {}", d.date, d.id, d.title))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================
