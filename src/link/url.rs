//! URL resolution for dotted section identifiers.
//!
//! Maps a legacy `section[.chapter[.item]]` identifier plus a new anchor
//! slug onto a relative URL, using the configured section map.

use crate::config::SectionMap;
use thiserror::Error;

/// Errors from resolving a dotted section identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("empty section identifier")]
    EmptyId,

    /// The original tool silently produced an empty base path here;
    /// every identifier must map to a configured section.
    #[error("unknown section prefix `{0}` (not in the [sections] map)")]
    UnknownSection(String),

    #[error("malformed chapter number in `{0}`")]
    BadChapter(String),
}

/// Resolve an old dotted identifier and a new slug to a relative URL.
///
/// - `2.5.3` + `garbage-collection` → `/02_basic_concepts/ch05#garbage-collection`
/// - `3` + `the-language` → `/03_the_language/intro#the-language`
///
/// A single-component identifier points at the section intro page; any
/// deeper identifier points at its chapter page, with the chapter number
/// zero-padded to two digits.
pub fn resolve(old_id: &str, slug: &str, sections: &SectionMap) -> Result<String, UrlError> {
    let mut components = old_id.split('.');
    let section = match components.next() {
        Some(s) if !s.is_empty() => s,
        _ => return Err(UrlError::EmptyId),
    };

    let base = sections
        .get(section)
        .ok_or_else(|| UrlError::UnknownSection(section.to_string()))?;

    match components.next() {
        None => Ok(format!("{base}/intro#{slug}")),
        Some(chapter) => {
            let chapter: u32 = chapter
                .parse()
                .map_err(|_| UrlError::BadChapter(old_id.to_string()))?;
            Ok(format!("{base}/ch{chapter:02}#{slug}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> SectionMap {
        crate::config::test_parse_config("").sections
    }

    #[test]
    fn test_item_identifier() {
        assert_eq!(
            resolve("2.5.3", "garbage-collection", &sections()).unwrap(),
            "/02_basic_concepts/ch05#garbage-collection"
        );
    }

    #[test]
    fn test_section_identifier() {
        assert_eq!(
            resolve("3", "the-language", &sections()).unwrap(),
            "/03_the_language/intro#the-language"
        );
    }

    #[test]
    fn test_chapter_identifier() {
        assert_eq!(
            resolve("5.6", "aux-lib-io", &sections()).unwrap(),
            "/05_aux_lib/ch06#aux-lib-io"
        );
    }

    #[test]
    fn test_two_digit_chapter() {
        // The Go original took the chapter from a single byte offset and
        // mangled anything past chapter 9
        assert_eq!(
            resolve("6.12", "os-library", &sections()).unwrap(),
            "/06_standard_lib/ch12#os-library"
        );
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            resolve("42.1", "nope", &sections()),
            Err(UrlError::UnknownSection("42".to_string()))
        );
    }

    #[test]
    fn test_malformed_inputs() {
        assert_eq!(resolve("", "x", &sections()), Err(UrlError::EmptyId));
        assert_eq!(resolve(".5", "x", &sections()), Err(UrlError::EmptyId));
        assert_eq!(
            resolve("2.x.3", "x", &sections()),
            Err(UrlError::BadChapter("2.x.3".to_string()))
        );
    }
}
