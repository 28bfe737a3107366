//! In-memory document registry.
//!
//! The registry owns every parsed [`Document`] for the life of the process.
//! It is rebuilt from the source files on startup; nothing is persisted.

use std::collections::HashMap;

use folio_content::Document;
use folio_core::{Error, Result, is_slug};

/// Documents keyed by id.
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    documents: HashMap<String, Document>,
}

impl DocumentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document by id.
    ///
    /// Returns the document previously stored under the same id, if any.
    /// Replacing with different content (a new title, say) is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the document id is empty or not in
    /// slug form.
    pub fn upsert(&mut self, document: Document) -> Result<Option<Document>> {
        if !is_slug(&document.id) {
            return Err(Error::invalid_data(format!(
                "document `{}` has id `{}`, which is not a slug",
                document.title, document.id
            )));
        }
        Ok(self.documents.insert(document.id.clone(), document))
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Returns true if a document with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Remove a document by id.
    pub fn remove(&mut self, id: &str) -> Option<Document> {
        self.documents.remove(id)
    }

    /// Iterate over all documents in unspecified order.
    ///
    /// The iterator is `Clone`, and calling `all()` again starts over.
    pub fn all(&self) -> impl Iterator<Item = &Document> + Clone {
        self.documents.values()
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if no documents are registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<Document> for DocumentRegistry {
    /// Collect documents, skipping any whose id is not a slug. Later documents
    /// replace earlier ones with the same id.
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut registry = Self::new();
        for document in iter {
            if let Err(e) = registry.upsert(document) {
                log::warn!("Skipping document: {e}");
            }
        }
        registry
    }
}
