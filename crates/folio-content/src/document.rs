//! The `Document` model and its frontmatter schema.
//!
//! A document is one article: validated metadata plus the raw markdown body.
//! [`parse_document`] is the only way raw text becomes a `Document`;
//! [`Document::to_markdown`] writes one back in the same format.
//!
//! # Frontmatter schema
//!
//! | key                | required | shape                         |
//! |--------------------|----------|-------------------------------|
//! | `title`            | yes      | non-empty string              |
//! | `description`      | yes      | non-empty string              |
//! | `date`             | yes      | `YYYY-MM-DD` (or RFC 3339)    |
//! | `category`         | no       | string, default `uncategorized` |
//! | `tags`             | no       | list of strings               |
//! | `featured`         | no       | boolean, default `false`      |
//! | `affiliateSection` | no       | string, passed through        |

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate};
use folio_core::slugify;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{ContentError, ContentResult};
use crate::frontmatter::{DELIMITER, Frontmatter, describe, extract_frontmatter};

/// Category assigned to documents that do not declare one.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Date format used in frontmatter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const KNOWN_KEYS: &[&str] = &[
    "title",
    "description",
    "date",
    "category",
    "tags",
    "featured",
    "affiliateSection",
];

/// A single parsed article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Slug derived from the title.
    pub id: String,
    /// Article title.
    pub title: String,
    /// Short summary.
    pub description: String,
    /// Publication date.
    pub date: NaiveDate,
    /// The one category this document belongs to.
    pub category: String,
    /// Tag set; ordered for deterministic output.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Whether the article is featured.
    #[serde(default)]
    pub featured: bool,
    /// Opaque affiliate block, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_section: Option<String>,
    /// Raw markdown body.
    #[serde(default)]
    pub body: String,
}

impl Document {
    /// Create a document with the required fields; the id is derived from
    /// the title and the category defaults to [`UNCATEGORIZED`].
    pub fn new(title: impl Into<String>, description: impl Into<String>, date: NaiveDate) -> Self {
        let title = title.into();
        Self {
            id: slugify(&title),
            title,
            description: description.into(),
            date,
            category: UNCATEGORIZED.to_string(),
            tags: BTreeSet::new(),
            featured: false,
            affiliate_section: None,
            body: String::new(),
        }
    }

    /// Set the category, trimmed; a blank category means [`UNCATEGORIZED`].
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = normalize_category(category.as_ref());
        self
    }

    /// Set the tags, trimmed; blanks are dropped and duplicates collapse.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = tags
            .into_iter()
            .filter_map(|tag| normalize_tag(tag.as_ref()))
            .collect();
        self
    }

    /// Mark the document as featured.
    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Attach an affiliate section.
    pub fn with_affiliate_section(mut self, section: impl Into<String>) -> Self {
        self.affiliate_section = Some(section.into());
        self
    }

    /// Set the markdown body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Number of tags shared with `other`.
    pub fn shared_tag_count(&self, other: &Document) -> usize {
        self.tags.intersection(&other.tags).count()
    }

    /// Serialize back to frontmatter + body.
    ///
    /// `parse_document(&doc.to_markdown())` reproduces `doc` for any document
    /// whose fields satisfy the schema.
    pub fn to_markdown(&self) -> ContentResult<String> {
        let fields = FrontmatterFields {
            title: &self.title,
            description: &self.description,
            date: self.date.format(DATE_FORMAT).to_string(),
            category: &self.category,
            tags: self.tags.iter().map(String::as_str).collect(),
            featured: self.featured,
            affiliate_section: self.affiliate_section.as_deref(),
        };
        let yaml = serde_yaml::to_string(&fields)
            .map_err(|e| ContentError::MalformedFrontmatter(e.to_string()))?;
        let yaml = yaml.strip_prefix("---\n").unwrap_or(&yaml);

        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{}", self.body))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrontmatterFields<'a> {
    title: &'a str,
    description: &'a str,
    date: String,
    category: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    affiliate_section: Option<&'a str>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a raw document (frontmatter + body) into a [`Document`].
///
/// # Example
///
/// ```rust
/// use folio_content::parse_document;
///
/// let raw = "---\ntitle: Lambda Cold Starts\ndescription: Why they happen\n\
///            date: 2025-03-07\ncategory: AWS\ntags: [lambda, serverless]\n---\nBody";
/// let doc = parse_document(raw).unwrap();
///
/// assert_eq!(doc.id, "lambda-cold-starts");
/// assert!(doc.tags.contains("lambda"));
/// assert!(!doc.featured);
/// ```
pub fn parse_document(raw: &str) -> ContentResult<Document> {
    let fm = extract_frontmatter(raw)?;
    from_frontmatter(&fm)
}

/// Build a [`Document`] from already-extracted frontmatter.
pub fn from_frontmatter(fm: &Frontmatter<'_>) -> ContentResult<Document> {
    let title = required_text(fm, "title")?;
    let id = slugify(&title);
    if id.is_empty() {
        return Err(ContentError::invalid_field(
            "title",
            format!("`{title}` contains no letters or digits to build an id from"),
        ));
    }

    for key in fm.keys().filter(|k| !KNOWN_KEYS.contains(k)) {
        log::debug!("Ignoring unknown frontmatter key `{key}` in `{id}`");
    }

    Ok(Document {
        id,
        title,
        description: required_text(fm, "description")?,
        date: parse_date(fm)?,
        category: parse_category(fm)?,
        tags: parse_tags(fm)?,
        featured: parse_featured(fm)?,
        affiliate_section: parse_affiliate_section(fm)?,
        body: fm.body().to_string(),
    })
}

/// The text of a YAML string; `None` for every other value.
///
/// Numbers and booleans are rejected rather than re-rendered: YAML has
/// already normalized them (`1.50` reads as `1.5`, `0x1F` as `31`), so their
/// source text is gone.
fn scalar_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        _ => None,
    }
}

fn expected_text(found: &Value) -> String {
    match found {
        Value::Number(_) | Value::Bool(_) => {
            format!("expected text, found {}; quote the value", describe(found))
        }
        other => format!("expected text, found {}", describe(other)),
    }
}

/// Trimmed category, or [`UNCATEGORIZED`] when blank.
fn normalize_category(category: &str) -> String {
    match category.trim() {
        "" => UNCATEGORIZED.to_string(),
        text => text.to_string(),
    }
}

/// Trimmed tag, or `None` when blank.
fn normalize_tag(tag: &str) -> Option<String> {
    match tag.trim() {
        "" => None,
        text => Some(text.to_string()),
    }
}

fn required_text(fm: &Frontmatter<'_>, key: &str) -> ContentResult<String> {
    let value = fm
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ContentError::invalid_field(key, "required field is missing"))?;
    let text = scalar_text(value)
        .ok_or_else(|| ContentError::invalid_field(key, expected_text(value)))?
        .trim();
    if text.is_empty() {
        return Err(ContentError::invalid_field(key, "must not be empty"));
    }
    Ok(text.to_string())
}

/// Returns true for exactly `DDDD-DD-DD`; chrono alone also accepts
/// unpadded months and days.
fn is_iso_date_shape(raw: &str) -> bool {
    raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_date(fm: &Frontmatter<'_>) -> ContentResult<NaiveDate> {
    let raw = required_text(fm, "date")?;

    let date = if is_iso_date_shape(&raw) {
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).ok()
    } else {
        DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|dt| dt.date_naive())
    };
    date.ok_or_else(|| {
        ContentError::invalid_field("date", format!("expected YYYY-MM-DD, got `{raw}`"))
    })
}

fn parse_category(fm: &Frontmatter<'_>) -> ContentResult<String> {
    match fm.get("category") {
        None | Some(Value::Null) => Ok(UNCATEGORIZED.to_string()),
        Some(Value::Sequence(_)) => Err(ContentError::invalid_field(
            "category",
            "expected a single category, found a list",
        )),
        Some(value) => scalar_text(value)
            .map(normalize_category)
            .ok_or_else(|| ContentError::invalid_field("category", expected_text(value))),
    }
}

fn parse_tags(fm: &Frontmatter<'_>) -> ContentResult<BTreeSet<String>> {
    let items = match fm.get("tags") {
        None | Some(Value::Null) => return Ok(BTreeSet::new()),
        Some(Value::Sequence(items)) => items,
        Some(other) => {
            return Err(ContentError::invalid_field(
                "tags",
                format!("expected a list, found {}", describe(other)),
            ));
        }
    };

    let mut tags = BTreeSet::new();
    for item in items {
        let tag = scalar_text(item).ok_or_else(|| {
            ContentError::invalid_field("tags", format!("list entries: {}", expected_text(item)))
        })?;
        tags.extend(normalize_tag(tag));
    }
    Ok(tags)
}

fn parse_featured(fm: &Frontmatter<'_>) -> ContentResult<bool> {
    match fm.get("featured") {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ContentError::invalid_field(
            "featured",
            format!("expected true or false, found {}", describe(other)),
        )),
    }
}

fn parse_affiliate_section(fm: &Frontmatter<'_>) -> ContentResult<Option<String>> {
    match fm.get("affiliateSection") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ContentError::invalid_field(
            "affiliateSection",
            format!("expected a string, found {}", describe(other)),
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================
