//! Anchor slug generation.
//!
//! Pure function for deriving URL-safe anchors from heading text.
//! No side effects.

/// Derive a URL-safe anchor slug from a display string.
///
/// Lowercases the input and keeps ASCII alphanumerics plus the middle dot
/// `·`, which appears inside API declarations and must survive into the
/// anchor. Every run of other characters collapses to a single `-`;
/// leading and trailing separators are dropped.
///
/// Idempotent: a valid slug passes through unchanged.
///
/// # Example
/// ```ignore
/// assert_eq!(slugify("Garbage Collection"), "garbage-collection");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '·' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}
