//! JSON export of a built index.
//!
//! The export is a self-contained snapshot: every document, both taxonomy
//! mappings, and the precomputed related-content lists. Loading an export
//! back rebuilds the registry and taxonomy from the documents alone.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use folio_content::Document;
use folio_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::ContentIndex;
use crate::builder::Issue;
use crate::registry::DocumentRegistry;
use crate::taxonomy::recency_order;

/// Serializable snapshot of a [`ContentIndex`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexExport {
    /// When the export was produced.
    pub generated_at: DateTime<Utc>,
    /// Version of the tool that produced it.
    pub generator_version: String,
    /// Number of documents.
    pub document_count: usize,
    /// All documents, newest first.
    pub documents: Vec<Document>,
    /// Category name to document ids, newest first.
    pub categories: BTreeMap<String, Vec<String>>,
    /// Tag name to document ids, newest first.
    pub tags: BTreeMap<String, Vec<String>>,
    /// Document id to related document ids, best match first.
    pub related: BTreeMap<String, Vec<String>>,
    /// Problems found while building, if any.
    #[serde(default, skip_deserializing, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl IndexExport {
    /// Snapshot `index`, computing up to `related_limit` related ids per
    /// document.
    pub fn from_index(index: &ContentIndex, related_limit: usize) -> Self {
        let taxonomy = index.taxonomy();

        let mut documents: Vec<Document> = index.all().cloned().collect();
        documents.sort_by(recency_order);

        let related = documents
            .iter()
            .map(|doc| {
                let ids = crate::related::related_to(
                    index.registry(),
                    &taxonomy,
                    &doc.id,
                    related_limit,
                )
                .into_iter()
                .map(|r| r.document.id.clone())
                .collect();
                (doc.id.clone(), ids)
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            document_count: documents.len(),
            documents,
            categories: taxonomy.category_map().clone(),
            tags: taxonomy.tag_map().clone(),
            related,
            issues: Vec::new(),
        }
    }

    /// Attach build issues to the export.
    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = issues;
        self
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::operation(format!("Failed to serialize index: {e}")))
    }

    /// Write the export as JSON to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path.as_ref(), json).map_err(|e| Error::io_with_path(e, path.as_ref()))
    }

    /// Rebuild a live index from the exported documents.
    ///
    /// The taxonomy is recomputed rather than trusted from the file.
    pub fn into_index(self) -> ContentIndex {
        ContentIndex::from_registry(self.documents.into_iter().collect::<DocumentRegistry>())
    }
}

/// Load an export from a JSON file.
pub fn load_export(path: impl AsRef<Path>) -> Result<IndexExport> {
    let json = std::fs::read_to_string(path.as_ref())
        .map_err(|e| Error::io_with_path(e, path.as_ref()))?;
    load_export_from_str(&json)
}

/// Load an export from a JSON string.
pub fn load_export_from_str(json: &str) -> Result<IndexExport> {
    serde_json::from_str(json).map_err(|e| Error::parse(format!("Failed to parse index JSON: {e}")))
}
