//! Building a corpus, exporting it, and loading the export back.

use folio_index::{CorpusBuilder, IndexExport, load_export};

use crate::common::{Corpus, article};

#[tokio::test]
async fn test_export_then_reload() {
    let corpus = Corpus::new();
    corpus
        .write("a.md", &article("Alpha", "2025-01-01", "Notes", &["x"]))
        .write("b.md", &article("Beta", "2025-01-02", "Notes", &["x", "y"]))
        .write("broken.md", "---\ntitle: Broken\n");

    let (index, report) = CorpusBuilder::new(corpus.path()).build().await.unwrap();
    let export = IndexExport::from_index(&index, 3).with_issues(report.issues.clone());

    let out = tempfile::TempDir::new().unwrap();
    let path = out.path().join("index.json");
    export.write_to(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["documentCount"], 2);
    assert_eq!(json["issues"][0]["source"], "broken.md");
    assert_eq!(json["related"]["alpha"][0], "beta");

    let reloaded = load_export(&path).unwrap().into_index();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.by_tag("y").len(), 1);
}
