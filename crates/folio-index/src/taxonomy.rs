//! Category and tag indices.
//!
//! [`TaxonomyIndex`] is an immutable value: two inverted indices from
//! category and tag to document ids, newest first. It is derived from the
//! registry and never edited in place.
//!
//! [`Taxonomy`] publishes the current index. A rebuild constructs a complete
//! new `TaxonomyIndex` and then swaps the `Arc` under a short write lock, so
//! readers see either the old snapshot or the new one, never a partial one.
//! A reader holding an older `Arc` keeps a consistent, if stale, view.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use folio_content::Document;
use serde::{Deserialize, Serialize};

/// Listing order: date descending, then id ascending.
pub fn recency_order(a: &Document, b: &Document) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id))
}

// ============================================================================
// TaxonomyIndex
// ============================================================================

/// Inverted indices from category and tag to document ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyIndex {
    categories: BTreeMap<String, Vec<String>>,
    tags: BTreeMap<String, Vec<String>>,
}

impl TaxonomyIndex {
    /// Build both indices from the full document set.
    ///
    /// Pure and idempotent: the same documents always produce the same
    /// index, regardless of iteration order. When several documents share an
    /// id, the last one yielded is indexed.
    pub fn build<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let by_id: HashMap<&str, &Document> = documents
            .into_iter()
            .map(|doc| (doc.id.as_str(), doc))
            .collect();
        let mut ordered: Vec<&Document> = by_id.into_values().collect();
        ordered.sort_by(|a, b| recency_order(a, b));

        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut tags: BTreeMap<String, Vec<String>> = BTreeMap::new();

        // Pushing in recency order keeps every list sorted.
        for doc in ordered {
            categories
                .entry(doc.category.clone())
                .or_default()
                .push(doc.id.clone());
            for tag in &doc.tags {
                tags.entry(tag.clone()).or_default().push(doc.id.clone());
            }
        }

        Self { categories, tags }
    }

    /// Ids in a category, newest first. Empty for unknown categories.
    pub fn by_category(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ids carrying a tag, newest first. Empty for unknown tags.
    pub fn by_tag(&self, tag: &str) -> &[String] {
        self.tags.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    /// Category names with their document counts, alphabetically.
    pub fn categories(&self) -> impl Iterator<Item = (&str, usize)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v.len()))
    }

    /// Tag names with their document counts, alphabetically.
    pub fn tags(&self) -> impl Iterator<Item = (&str, usize)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.len()))
    }

    /// The full category mapping.
    pub fn category_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    /// The full tag mapping.
    pub fn tag_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.tags
    }

    /// Returns true if no documents were indexed.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ============================================================================
// Taxonomy (published snapshot)
// ============================================================================

/// Holder of the current [`TaxonomyIndex`] snapshot.
#[derive(Debug, Default)]
pub struct Taxonomy {
    current: RwLock<Arc<TaxonomyIndex>>,
}

impl Taxonomy {
    /// Create a holder with an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a holder publishing an index built from `documents`.
    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        Self {
            current: RwLock::new(Arc::new(TaxonomyIndex::build(documents))),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<TaxonomyIndex> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Build a new index from `documents` and publish it.
    ///
    /// The index is built before the lock is taken; the lock only covers the
    /// pointer swap. Returns the newly published snapshot.
    pub fn rebuild<'a, I>(&self, documents: I) -> Arc<TaxonomyIndex>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let next = Arc::new(TaxonomyIndex::build(documents));
        self.publish(Arc::clone(&next));
        log::debug!(
            "Published taxonomy snapshot: {} categories, {} tags",
            next.categories.len(),
            next.tags.len()
        );
        next
    }

    /// Replace the current snapshot.
    pub fn publish(&self, index: Arc<TaxonomyIndex>) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = index;
    }
}
