//! Related-content resolution.
//!
//! Candidates are every document listed under the queried document's
//! category or any of its tags in the taxonomy snapshot. They are ranked by:
//!
//! 1. same category first
//! 2. more shared tags first
//! 3. newer first
//! 4. id ascending

use std::cmp::Ordering;
use std::collections::HashSet;

use folio_content::Document;
use serde::Serialize;

use crate::registry::DocumentRegistry;
use crate::taxonomy::TaxonomyIndex;

/// A document related to a query document, with the evidence for the match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDocument<'a> {
    /// The related document.
    pub document: &'a Document,
    /// Whether it shares the query document's category.
    pub same_category: bool,
    /// Number of tags shared with the query document.
    pub shared_tags: usize,
}

impl RelatedDocument<'_> {
    fn rank(&self, other: &Self) -> Ordering {
        other
            .same_category
            .cmp(&self.same_category)
            .then_with(|| other.shared_tags.cmp(&self.shared_tags))
            .then_with(|| crate::taxonomy::recency_order(self.document, other.document))
    }
}

/// Up to `limit` documents related to `id`, best match first.
///
/// An unknown id, a document with no relations, or a `limit` of zero all
/// give an empty list. Ids in the snapshot that are no longer registered
/// are skipped.
pub fn related_to<'r>(
    registry: &'r DocumentRegistry,
    taxonomy: &TaxonomyIndex,
    id: &str,
    limit: usize,
) -> Vec<RelatedDocument<'r>> {
    let Some(source) = registry.get(id) else {
        log::debug!("No related content for unknown document `{id}`");
        return Vec::new();
    };
    if limit == 0 {
        return Vec::new();
    }

    let candidate_ids = taxonomy
        .by_category(&source.category)
        .iter()
        .chain(source.tags.iter().flat_map(|tag| taxonomy.by_tag(tag)));

    let mut seen: HashSet<&str> = HashSet::new();
    let mut related: Vec<RelatedDocument<'r>> = Vec::new();
    for candidate_id in candidate_ids {
        if candidate_id == &source.id || !seen.insert(candidate_id.as_str()) {
            continue;
        }
        let Some(document) = registry.get(candidate_id) else {
            continue;
        };

        let same_category = document.category == source.category;
        let shared_tags = source.shared_tag_count(document);
        // The snapshot may predate an upsert that changed this document.
        if !same_category && shared_tags == 0 {
            continue;
        }

        related.push(RelatedDocument {
            document,
            same_category,
            shared_tags,
        });
    }

    related.sort_by(|a, b| a.rank(b));
    related.truncate(limit);
    related
}
