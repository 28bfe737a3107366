//! Identifier utilities.
//!
//! Documents are keyed by a slug derived from their title. Category and tag
//! keys are kept verbatim; only document ids go through [`slugify`].

/// Derive a URL-safe slug from a title.
///
/// 1. Lowercases the input
/// 2. Collapses every run of non-alphanumeric characters into one `-`
/// 3. Strips leading and trailing `-`
///
/// Unicode letters and digits are kept, so non-Latin titles still produce
/// meaningful slugs.
///
/// # Examples
///
/// ```
/// use folio_core::util::ids::slugify;
///
/// assert_eq!(slugify("AWS Lambda: Cold Starts"), "aws-lambda-cold-starts");
/// assert_eq!(slugify("  C++ & Rust!  "), "c-rust");
/// assert_eq!(slugify("Déjà Vu"), "déjà-vu");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    // Lowercasing can expand to combining marks, so filter after mapping.
    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Returns true if `id` is already in slug form.
pub fn is_slug(id: &str) -> bool {
    !id.is_empty() && slugify(id) == id
}
