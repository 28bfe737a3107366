//! Document registry, taxonomy index, and related-content resolution.
//!
//! This crate turns parsed documents into a queryable corpus:
//!
//! - [`DocumentRegistry`]: documents keyed by id, last write wins
//! - [`TaxonomyIndex`] / [`Taxonomy`]: category and tag indices published as
//!   immutable snapshots
//! - [`related_to`]: ranked related-content lookup
//! - [`CorpusBuilder`]: concurrent discovery and parsing of a content tree
//! - [`IndexExport`]: JSON snapshot of a built index
//!
//! [`ContentIndex`] ties the registry and taxonomy together and keeps the
//! taxonomy in step with every registry change.

#![doc = include_str!("../README.md")]

pub mod builder;
pub mod export;
pub mod registry;
pub mod related;
pub mod taxonomy;

mod proptests;

use std::sync::Arc;

use folio_content::Document;
use folio_core::Result;

// Re-exports
pub use builder::{BuildReport, CorpusBuilder, DEFAULT_CONCURRENCY, Issue, IssueKind};
pub use export::{IndexExport, load_export, load_export_from_str};
pub use registry::DocumentRegistry;
pub use related::{RelatedDocument, related_to};
pub use taxonomy::{Taxonomy, TaxonomyIndex, recency_order};

/// A registry plus the taxonomy derived from it.
///
/// Every mutation rebuilds and republishes the taxonomy. Other tasks can
/// hold the [`Taxonomy`] handle from [`ContentIndex::taxonomy_handle`] and
/// read snapshots while the owner keeps mutating.
#[derive(Debug, Default)]
pub struct ContentIndex {
    registry: DocumentRegistry,
    taxonomy: Arc<Taxonomy>,
}

impl ContentIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index an existing registry, building the taxonomy once.
    pub fn from_registry(registry: DocumentRegistry) -> Self {
        let taxonomy = Arc::new(Taxonomy::from_documents(registry.all()));
        Self { registry, taxonomy }
    }

    /// Insert or replace a document and republish the taxonomy.
    ///
    /// Returns the replaced document, if any.
    pub fn upsert(&mut self, document: Document) -> Result<Option<Document>> {
        let previous = self.registry.upsert(document)?;
        self.taxonomy.rebuild(self.registry.all());
        Ok(previous)
    }

    /// Remove a document and republish the taxonomy.
    pub fn remove(&mut self, id: &str) -> Option<Document> {
        let removed = self.registry.remove(id)?;
        self.taxonomy.rebuild(self.registry.all());
        Some(removed)
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.registry.get(id)
    }

    /// Iterate over all documents in unspecified order.
    pub fn all(&self) -> impl Iterator<Item = &Document> + Clone {
        self.registry.all()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Documents in a category, newest first.
    pub fn by_category(&self, category: &str) -> Vec<&Document> {
        self.resolve(self.taxonomy().by_category(category))
    }

    /// Documents carrying a tag, newest first.
    pub fn by_tag(&self, tag: &str) -> Vec<&Document> {
        self.resolve(self.taxonomy().by_tag(tag))
    }

    /// Up to `limit` documents related to `id`, best match first.
    pub fn related_to(&self, id: &str, limit: usize) -> Vec<RelatedDocument<'_>> {
        related_to(&self.registry, &self.taxonomy(), id, limit)
    }

    /// The current taxonomy snapshot.
    pub fn taxonomy(&self) -> Arc<TaxonomyIndex> {
        self.taxonomy.snapshot()
    }

    /// Shared handle to the published taxonomy.
    pub fn taxonomy_handle(&self) -> Arc<Taxonomy> {
        Arc::clone(&self.taxonomy)
    }

    /// The underlying registry.
    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    fn resolve(&self, ids: &[String]) -> Vec<&Document> {
        ids.iter().filter_map(|id| self.registry.get(id)).collect()
    }
}
