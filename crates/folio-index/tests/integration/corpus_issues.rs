//! Broken files and documents are reported without stopping the build.

use std::path::PathBuf;

use folio_content::ContentError;
use folio_index::{CorpusBuilder, IssueKind};

use crate::common::{Corpus, article, bundle};

#[tokio::test]
async fn test_unterminated_document_excluded() {
    let corpus = Corpus::new();
    corpus.write(
        "mixed.md",
        &bundle(&[
            article("Good One", "2025-01-01", "Notes", &["x"]),
            "---\ntitle: Never Closed\ndate: 2025-01-02\n\nbody\n".to_string(),
            article("Good Two", "2025-01-03", "Notes", &["x"]),
        ]),
    );

    let (index, report) = CorpusBuilder::new(corpus.path()).build().await.unwrap();

    assert_eq!(index.len(), 2);
    assert!(index.get("never-closed").is_none());
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].position, Some(2));
    assert_eq!(
        report.issues[0].kind,
        IssueKind::Parse(ContentError::UnterminatedFrontmatter)
    );
}

#[tokio::test]
async fn test_missing_and_invalid_fields_reported() {
    let corpus = Corpus::new();
    corpus.write("plain.md", "# No frontmatter here\n");
    corpus.write(
        "bad-date.md",
        "---\ntitle: Bad Date\ndescription: d\ndate: someday\n---\nbody\n",
    );
    corpus.write("ok.md", &article("Fine", "2025-02-02", "Notes", &[]));

    let (index, report) = CorpusBuilder::new(corpus.path()).build().await.unwrap();

    assert_eq!(index.len(), 1);
    let kinds: Vec<_> = report
        .issues
        .iter()
        .map(|i| (i.source.clone(), i.kind.name()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (PathBuf::from("bad-date.md"), "invalid_field"),
            (PathBuf::from("plain.md"), "missing_frontmatter"),
        ]
    );
}

#[tokio::test]
async fn test_duplicate_slug_last_wins() {
    let corpus = Corpus::new();
    corpus.write("a.md", &article("Hello World", "2025-01-01", "First", &[]));
    corpus.write("b.md", &article("Hello, World!", "2025-01-01", "Second", &[]));

    let (index, report) = CorpusBuilder::new(corpus.path()).build().await.unwrap();

    assert_eq!(index.len(), 1);
    let doc = index.get("hello-world").unwrap();
    assert_eq!(doc.title, "Hello, World!");
    assert!(index.by_category("First").is_empty());
    assert_eq!(report.issues.len(), 1);
    assert!(matches!(
        &report.issues[0].kind,
        IssueKind::DuplicateId { id, previous } if id == "hello-world" && previous == "a.md"
    ));
}

#[tokio::test]
async fn test_non_utf8_file_reported() {
    let corpus = Corpus::new();
    corpus.write("ok.md", &article("Fine", "2025-02-02", "Notes", &[]));
    std::fs::write(corpus.path().join("binary.md"), [0xc3, 0x28, 0xa0, 0xa1]).unwrap();

    let (index, report) = CorpusBuilder::new(corpus.path()).build().await.unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(report.files_failed, 1);
    assert_eq!(report.issues[0].kind.name(), "read");
    assert!(report.issues[0].to_string().starts_with("binary.md: unreadable file"));
}
