//! Common fixtures for pipeline integration tests.

use std::path::Path;

use folio_content::DEFAULT_SEPARATOR;
use tempfile::TempDir;

/// A temporary content directory.
pub struct Corpus {
    pub dir: TempDir,
}

impl Corpus {
    /// Creates an empty corpus directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Path of the content root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file relative to the content root, creating parents.
    pub fn write(&self, name: &str, content: &str) -> &Self {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(path, content).expect("write fixture");
        self
    }
}

/// Frontmatter plus body for one article.
pub fn article(title: &str, date: &str, category: &str, tags: &[&str]) -> String {
    format!(
        "---\ntitle: {title}\ndescription: Notes on {title}\ndate: {date}\ncategory: {category}\ntags: [{}]\n---\n\n# {title}\n\nBody text.\n",
        tags.join(", ")
    )
}

/// Joins articles with the default separator line.
pub fn bundle(articles: &[String]) -> String {
    articles.join(&format!("{DEFAULT_SEPARATOR}\n"))
}
