//! Splitting bundled files into individual documents.
//!
//! Some source files concatenate several articles, each with its own
//! frontmatter, separated by a sentinel line:
//!
//! ```markdown
//! ---
//! title: First
//! ---
//! Body one.
//! <!-- folio:split -->
//! ---
//! title: Second
//! ---
//! Body two.
//! ```
//!
//! A sentinel line is any line whose trimmed content equals the sentinel.
//! Segments that are empty or only whitespace are dropped, so leading,
//! trailing, and doubled sentinels are harmless.

/// Default sentinel line separating bundled documents.
pub const DEFAULT_SEPARATOR: &str = "<!-- folio:split -->";

/// Lazy iterator over the documents bundled in one file.
///
/// `Splitter` borrows the input and is `Clone`, so a sequence can be
/// restarted from any point; splitting the same input twice yields the
/// same segments.
#[derive(Debug, Clone)]
pub struct Splitter<'a> {
    rest: Option<&'a str>,
    sentinel: &'a str,
}

/// Split `text` on lines equal to `sentinel`.
///
/// A blank sentinel disables splitting: the whole input is one document.
///
/// # Example
///
/// ```rust
/// use folio_content::split_documents;
///
/// let text = "one\n<!-- folio:split -->\ntwo\n";
/// let docs: Vec<&str> = split_documents(text, "<!-- folio:split -->").collect();
/// assert_eq!(docs, vec!["one\n", "two\n"]);
/// ```
pub fn split_documents<'a>(text: &'a str, sentinel: &'a str) -> Splitter<'a> {
    Splitter {
        rest: Some(text),
        sentinel: sentinel.trim(),
    }
}

impl<'a> Splitter<'a> {
    /// Cut the next raw segment off `text`, returning it and what remains.
    fn cut(&self, text: &'a str) -> (&'a str, Option<&'a str>) {
        if self.sentinel.is_empty() {
            return (text, None);
        }

        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            if line.trim() == self.sentinel {
                return (&text[..offset], Some(&text[offset + line.len()..]));
            }
            offset += line.len();
        }

        (text, None)
    }
}

impl<'a> Iterator for Splitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.rest?;
            let (segment, rest) = self.cut(text);
            self.rest = rest;
            if !segment.trim().is_empty() {
                return Some(segment);
            }
        }
    }
}

impl std::iter::FusedIterator for Splitter<'_> {}
