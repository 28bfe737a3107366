//! Bundled files holding several articles.

use folio_index::CorpusBuilder;

use crate::common::{Corpus, article, bundle};

#[tokio::test]
async fn test_bundled_lambda_articles_are_related() {
    let corpus = Corpus::new();
    corpus.write(
        "aws/lambda.md",
        &bundle(&[
            article("Lambda Cold Starts", "2025-03-07", "AWS", &["lambda", "serverless"]),
            article("Lambda Costs", "2025-06-28", "AWS", &["lambda", "cost"]),
        ]),
    );
    corpus.write(
        "gcp/run.md",
        &article("Cloud Run", "2025-07-01", "GCP", &["serverless"]),
    );

    let (index, report) = CorpusBuilder::new(corpus.path()).build().await.unwrap();

    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    assert_eq!(report.files_scanned, 2);
    assert_eq!(index.len(), 3);

    let aws: Vec<_> = index.by_category("AWS").iter().map(|d| d.id.clone()).collect();
    assert_eq!(aws, vec!["lambda-costs", "lambda-cold-starts"]);

    let related = index.related_to("lambda-cold-starts", 5);
    assert_eq!(related[0].document.id, "lambda-costs");
    assert!(related[0].same_category);
    assert_eq!(related[1].document.id, "cloud-run");
}

#[tokio::test]
async fn test_doubled_and_trailing_separators_ignored() {
    let corpus = Corpus::new();
    let text = format!(
        "<!-- folio:split -->\n{}<!-- folio:split -->\n\n<!-- folio:split -->\n{}<!-- folio:split -->\n",
        article("One", "2025-01-01", "Notes", &[]),
        article("Two", "2025-01-02", "Notes", &[]),
    );
    corpus.write("notes.md", &text);

    let (index, report) = CorpusBuilder::new(corpus.path()).build().await.unwrap();

    assert!(report.is_clean());
    assert_eq!(index.len(), 2);
}

#[tokio::test]
async fn test_body_preserved_across_split() {
    let corpus = Corpus::new();
    corpus.write(
        "a.md",
        &bundle(&[
            article("First", "2025-01-01", "Notes", &[]),
            article("Second", "2025-01-02", "Notes", &[]),
        ]),
    );

    let (index, _) = CorpusBuilder::new(corpus.path()).build().await.unwrap();

    assert_eq!(index.get("first").unwrap().body, "\n# First\n\nBody text.\n");
    assert_eq!(index.get("second").unwrap().body, "\n# Second\n\nBody text.\n");
}

#[tokio::test]
async fn test_byte_order_mark_before_leading_separator() {
    let corpus = Corpus::new();
    let text = format!(
        "\u{feff}<!-- folio:split -->\n{}",
        bundle(&[
            article("One", "2025-01-01", "Notes", &[]),
            article("Two", "2025-01-02", "Notes", &[]),
        ])
    );
    corpus.write("notes.md", &text);
    corpus.write("single.md", &format!("\u{feff}{}", article("Three", "2025-01-03", "Notes", &[])));

    let (index, report) = CorpusBuilder::new(corpus.path()).build().await.unwrap();

    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    assert_eq!(index.len(), 3);
}
