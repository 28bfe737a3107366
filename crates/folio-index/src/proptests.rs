//! Property-based tests for the taxonomy and related-content lookups.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{DocumentRegistry, TaxonomyIndex, recency_order, related_to};
    use chrono::NaiveDate;
    use folio_content::Document;
    use proptest::prelude::*;

    const TITLES: &[&str] = &[
        "Lambda Cold Starts",
        "Lambda Costs",
        "S3 Lifecycle",
        "Raft Basics",
        "Kafka Partitions",
        "DynamoDB Streams",
        "Cloud Run",
        "Workers",
    ];
    const CATEGORIES: &[&str] = &["AWS", "GCP", "Distributed Systems"];
    const TAGS: &[&str] = &["lambda", "serverless", "cost", "raft", "kafka", "s3"];

    prop_compose! {
        fn arb_document()(
            title in prop::sample::select(TITLES),
            day in 1u32..=28,
            category in prop::sample::select(CATEGORIES),
            tags in prop::sample::subsequence(TAGS, 0..=3),
        ) -> Document {
            Document::new(title, "desc", NaiveDate::from_ymd_opt(2025, 1, day).unwrap())
                .with_category(category)
                .with_tags(tags)
        }
    }

    // Titles repeat, so corpora also exercise same-id replacement.
    fn arb_corpus() -> impl Strategy<Value = DocumentRegistry> {
        prop::collection::vec(arb_document(), 0..12)
            .prop_map(|docs| docs.into_iter().collect())
    }

    proptest! {
        #[test]
        fn test_membership_is_exact(registry in arb_corpus()) {
            let index = TaxonomyIndex::build(registry.all());

            for doc in registry.all() {
                for (category, ids) in index.category_map() {
                    let hits = ids.iter().filter(|id| **id == doc.id).count();
                    prop_assert_eq!(hits, usize::from(*category == doc.category));
                }
                for (tag, ids) in index.tag_map() {
                    let hits = ids.iter().filter(|id| **id == doc.id).count();
                    prop_assert_eq!(hits, usize::from(doc.tags.contains(tag)));
                }
            }

            let listed: usize = index.category_map().values().map(Vec::len).sum();
            prop_assert_eq!(listed, registry.len());
        }

        #[test]
        fn test_lists_are_newest_first(registry in arb_corpus()) {
            let index = TaxonomyIndex::build(registry.all());

            for ids in index.category_map().values().chain(index.tag_map().values()) {
                for pair in ids.windows(2) {
                    let (a, b) = (registry.get(&pair[0]).unwrap(), registry.get(&pair[1]).unwrap());
                    prop_assert!(recency_order(a, b).is_lt());
                }
            }
        }

        #[test]
        fn test_related_never_self_or_over_limit(
            registry in arb_corpus(),
            pick in any::<prop::sample::Index>(),
            limit in 0usize..6,
        ) {
            let index = TaxonomyIndex::build(registry.all());
            let ids: Vec<&str> = registry.all().map(|d| d.id.as_str()).collect();
            prop_assume!(!ids.is_empty());
            let source = registry.get(ids[pick.index(ids.len())]).unwrap();

            let related = related_to(&registry, &index, &source.id, limit);

            prop_assert!(related.len() <= limit);
            let mut seen = HashSet::new();
            for r in &related {
                prop_assert_ne!(&r.document.id, &source.id);
                prop_assert!(seen.insert(r.document.id.as_str()));
                prop_assert!(r.same_category || r.shared_tags > 0);
            }
        }
    }
}
