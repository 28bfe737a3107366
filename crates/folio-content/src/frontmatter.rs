//! YAML frontmatter extraction.
//!
//! Frontmatter is metadata at the start of a document, delimited by `---`
//! lines:
//!
//! ```markdown
//! ---
//! title: Cold Starts in AWS Lambda
//! date: 2025-03-07
//! tags: [lambda, serverless]
//! ---
//!
//! The body of the article starts here.
//! ```
//!
//! A leading byte-order mark and whitespace before the opening marker are
//! ignored. The body is
//! everything after the closing marker line, byte for byte.
//!
//! # Usage
//!
//! ```rust
//! use folio_content::extract_frontmatter;
//!
//! let raw = "---\ntitle: Test\n---\nBody";
//! let fm = extract_frontmatter(raw).unwrap();
//!
//! assert_eq!(fm.get_str("title"), Some("Test"));
//! assert_eq!(fm.body(), "Body");
//! ```

use serde_yaml::{Mapping, Value};

use crate::error::{ContentError, ContentResult};

/// Marker line opening and closing the frontmatter block.
pub const DELIMITER: &str = "---";

/// Parsed frontmatter mapping plus the body that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter<'a> {
    mapping: Mapping,
    body: &'a str,
}

impl<'a> Frontmatter<'a> {
    /// The frontmatter key/value mapping.
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Look up a raw YAML value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.mapping.get(key)
    }

    /// Look up a string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Keys present in the frontmatter, in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.mapping.iter().filter_map(|(k, _)| k.as_str())
    }

    /// Body content after the closing delimiter.
    pub fn body(&self) -> &'a str {
        self.body
    }
}

const BOM: char = '\u{feff}';

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Extract YAML frontmatter from a raw document.
///
/// # Errors
///
/// - [`ContentError::MissingFrontmatter`] if the input, after any byte-order
///   mark and leading whitespace, does not begin with a `---` line
/// - [`ContentError::UnterminatedFrontmatter`] if no closing `---` line follows
/// - [`ContentError::MalformedFrontmatter`] if the block is not a YAML mapping
///
/// An empty block (`---` immediately followed by `---`) yields an empty
/// mapping.
pub fn extract_frontmatter(raw: &str) -> ContentResult<Frontmatter<'_>> {
    let text = raw.strip_prefix(BOM).unwrap_or(raw).trim_start();

    let mut lines = text.split_inclusive('\n');
    let opening = lines.next().ok_or(ContentError::MissingFrontmatter)?;
    if !is_delimiter(opening) {
        return Err(ContentError::MissingFrontmatter);
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    let mut closing = None;
    for line in lines {
        if is_delimiter(line) {
            closing = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }

    let (yaml_end, body_start) = closing.ok_or_else(|| {
        log::debug!("Frontmatter opening delimiter found but no closing delimiter");
        ContentError::UnterminatedFrontmatter
    })?;

    let yaml = &text[yaml_start..yaml_end];
    let body = &text[body_start..];

    let mapping = match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(Value::Null) => Mapping::new(),
        Ok(other) => {
            return Err(ContentError::MalformedFrontmatter(format!(
                "expected key/value pairs, found {}",
                describe(&other)
            )));
        }
        Err(e) => return Err(ContentError::MalformedFrontmatter(e.to_string())),
    };

    Ok(Frontmatter { mapping, body })
}

/// Human-readable name of a YAML value's shape.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Basic extraction tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_extract_valid_frontmatter() {
        let raw = "---\ntitle: Test Document\ncategory: AWS\n---\n\n# Content";
        let fm = extract_frontmatter(raw).unwrap();

        assert_eq!(fm.get_str("title"), Some("Test Document"));
        assert_eq!(fm.get_str("category"), Some("AWS"));
        assert_eq!(fm.body(), "\n# Content");
    }

    #[test]
    fn test_extract_leading_whitespace() {
        let raw = "\n\n  ---\ntitle: Padded\n---\nBody";
        let fm = extract_frontmatter(raw).unwrap();
        assert_eq!(fm.get_str("title"), Some("Padded"));
        assert_eq!(fm.body(), "Body");
    }

    #[test]
    fn test_extract_byte_order_mark() {
        let raw = "\u{feff}---\ntitle: Saved by Notepad\n---\nBody";
        let fm = extract_frontmatter(raw).unwrap();
        assert_eq!(fm.get_str("title"), Some("Saved by Notepad"));
        assert_eq!(fm.body(), "Body");
    }

    #[test]
    fn test_extract_crlf() {
        let raw = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let fm = extract_frontmatter(raw).unwrap();
        assert_eq!(fm.get_str("title"), Some("Windows"));
        assert_eq!(fm.body(), "Body\r\n");
    }

    #[test]
    fn test_extract_empty_frontmatter() {
        let fm = extract_frontmatter("---\n---\nBody content").unwrap();
        assert!(fm.mapping().is_empty());
        assert_eq!(fm.body(), "Body content");
    }

    #[test]
    fn test_extract_closing_at_eof() {
        let fm = extract_frontmatter("---\ntitle: T\n---").unwrap();
        assert_eq!(fm.get_str("title"), Some("T"));
        assert_eq!(fm.body(), "");
    }

    #[test]
    fn test_keys_in_source_order() {
        let fm = extract_frontmatter("---\nb: 1\na: 2\nc: 3\n---\n").unwrap();
        assert_eq!(fm.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    // ------------------------------------------------------------------------
    // Error tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_missing_frontmatter() {
        let err = extract_frontmatter("# Just Markdown").unwrap_err();
        assert_eq!(err, ContentError::MissingFrontmatter);
    }

    #[test]
    fn test_empty_input_is_missing() {
        assert_eq!(
            extract_frontmatter("").unwrap_err(),
            ContentError::MissingFrontmatter
        );
        assert_eq!(
            extract_frontmatter("   \n").unwrap_err(),
            ContentError::MissingFrontmatter
        );
    }

    #[test]
    fn test_opening_marker_must_be_whole_line() {
        assert_eq!(
            extract_frontmatter("--- title: x\n---\n").unwrap_err(),
            ContentError::MissingFrontmatter
        );
        assert_eq!(
            extract_frontmatter("----\ntitle: x\n----\n").unwrap_err(),
            ContentError::MissingFrontmatter
        );
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let raw = "---\ntitle: Incomplete\n\nNo closing delimiter";
        assert_eq!(
            extract_frontmatter(raw).unwrap_err(),
            ContentError::UnterminatedFrontmatter
        );
    }

    #[test]
    fn test_only_opening_delimiter() {
        assert_eq!(
            extract_frontmatter("---").unwrap_err(),
            ContentError::UnterminatedFrontmatter
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let raw = "---\n{{invalid: yaml: here}}\n---\n\nBody";
        assert!(matches!(
            extract_frontmatter(raw).unwrap_err(),
            ContentError::MalformedFrontmatter(_)
        ));
    }

    #[test]
    fn test_non_mapping_yaml() {
        let raw = "---\n- just\n- a list\n---\nBody";
        let err = extract_frontmatter(raw).unwrap_err();
        assert_eq!(
            err,
            ContentError::MalformedFrontmatter("expected key/value pairs, found a list".into())
        );
    }

    // ------------------------------------------------------------------------
    // Edge cases
    // ------------------------------------------------------------------------

    #[test]
    fn test_dashes_in_body_untouched() {
        let raw = "---\ntitle: Test\n---\nIntro\n---\nMore after a rule";
        let fm = extract_frontmatter(raw).unwrap();
        assert_eq!(fm.body(), "Intro\n---\nMore after a rule");
    }

    #[test]
    fn test_inline_dashes_not_closing() {
        let raw = "---\ntitle: a --- b\n---\nBody";
        let fm = extract_frontmatter(raw).unwrap();
        assert_eq!(fm.get_str("title"), Some("a --- b"));
    }

    #[test]
    fn test_unicode() {
        let raw = "---\ntitle: 分散システム\n---\n本文";
        let fm = extract_frontmatter(raw).unwrap();
        assert_eq!(fm.get_str("title"), Some("分散システム"));
        assert_eq!(fm.body(), "本文");
    }
}
