//! Index-file loaders.
//!
//! Builds the [`LinkTable`] from the flat text indexes produced during the
//! manual split. Two formats exist:
//!
//! - **Sections**: `old_id display_name` per line, split on the first
//!   space. The URL is computed from the section map.
//! - **API declaration**: `[declaration] old_id` per line, split on the
//!   last `]`. The URL comes from a separate authoritative path table
//!   (`[declaration] path` per line).
//!
//! Any malformed line is fatal and reported with its file and line number.

use crate::config::SectionMap;
use crate::link::{LinkRecord, LinkTable, slug::slugify, url};
use crate::log;
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::{fs, path::Path};
use thiserror::Error;

/// Errors from parsing index files.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("{file}:{line}: expected `old_id display_name`, found no space in {content:?}")]
    MissingSeparator {
        file: String,
        line: usize,
        content: String,
    },

    #[error("{file}:{line}: expected `[declaration] ...`, found no bracket in {content:?}")]
    MissingBracket {
        file: String,
        line: usize,
        content: String,
    },

    #[error("{file}:{line}: {source}")]
    Url {
        file: String,
        line: usize,
        source: url::UrlError,
    },

    #[error("no path table entry for anchor `{slug}` (old id `{old_id}`)")]
    MissingPath { slug: String, old_id: String },
}

/// Load the section index (`old_id display_name` per line).
///
/// Slugs come from the display name, URLs from the section map.
pub fn load_section_index(path: &Path, sections: &SectionMap) -> Result<LinkTable> {
    let content = read_index(path)?;
    let file = display_name_of(path);

    let mut table = LinkTable::new();
    for (n, raw) in numbered_lines(&content) {
        let (old_id, name) = raw.split_once(' ').ok_or_else(|| LoadError::MissingSeparator {
            file: file.clone(),
            line: n,
            content: raw.to_string(),
        })?;

        let slug = slugify(name);
        let url = url::resolve(old_id, &slug, sections).map_err(|source| LoadError::Url {
            file: file.clone(),
            line: n,
            source,
        })?;

        warn_duplicate(
            table.insert(LinkRecord {
                old_id: old_id.to_string(),
                slug,
                display_name: Some(name.to_string()),
                url,
            }),
            old_id,
            &file,
        );
    }

    Ok(table)
}

/// Load the API index plus its authoritative path table.
///
/// Slugs come from the declarations; URLs are `<path>#<slug>` with the
/// path taken from the table. A slug without a path entry is an error.
pub fn load_api_index(index_path: &Path, paths_path: &Path) -> Result<LinkTable> {
    let paths = load_path_table(paths_path)?;

    let content = read_index(index_path)?;
    let file = display_name_of(index_path);

    let mut table = LinkTable::new();
    for (n, raw) in numbered_lines(&content) {
        let (declaration, old_id) = split_declaration(raw, &file, n)?;
        let slug = slugify(declaration);

        let path = paths.get(&slug).ok_or_else(|| LoadError::MissingPath {
            slug: slug.clone(),
            old_id: old_id.to_string(),
        })?;

        warn_duplicate(
            table.insert(LinkRecord {
                old_id: old_id.to_string(),
                slug: slug.clone(),
                display_name: None,
                url: format!("{path}#{slug}"),
            }),
            old_id,
            &file,
        );
    }

    Ok(table)
}

/// Load the `[declaration] path` table, keyed by declaration slug.
fn load_path_table(path: &Path) -> Result<FxHashMap<String, String>> {
    let content = read_index(path)?;
    let file = display_name_of(path);

    let mut paths = FxHashMap::default();
    for (n, raw) in numbered_lines(&content) {
        let (declaration, target) = split_declaration(raw, &file, n)?;
        paths.insert(slugify(declaration), target.to_string());
    }

    Ok(paths)
}

/// Split a `[declaration] rest` line on its last `]`.
fn split_declaration<'a>(raw: &'a str, file: &str, line: usize) -> Result<(&'a str, &'a str)> {
    let missing = || LoadError::MissingBracket {
        file: file.to_string(),
        line,
        content: raw.to_string(),
    };

    let end = raw.rfind(']').ok_or_else(&missing)?;
    let declaration = raw[..end].strip_prefix('[').ok_or_else(&missing)?;
    let rest = raw[end + 1..].trim();
    Ok((declaration, rest))
}

fn read_index(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read index file {}", path.display()))
}

/// Non-empty lines with 1-based numbers for diagnostics.
fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty())
}

fn warn_duplicate(was_duplicate: bool, old_id: &str, file: &str) {
    if was_duplicate {
        log!("warning"; "duplicate id `{}` in {}, keeping the later entry", old_id, file);
    }
}

fn display_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_index(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn sections() -> SectionMap {
        crate::config::test_parse_config("").sections
    }

    #[test]
    fn test_section_index() {
        let index = write_index("2.5.3 Garbage Collection\n3 The Language\n");
        let table = load_section_index(index.path(), &sections()).unwrap();

        assert_eq!(table.len(), 2);
        let gc = table.get("2.5.3").unwrap();
        assert_eq!(gc.slug, "garbage-collection");
        assert_eq!(gc.display_name.as_deref(), Some("Garbage Collection"));
        assert_eq!(gc.url, "/02_basic_concepts/ch05#garbage-collection");

        let lang = table.get("3").unwrap();
        assert_eq!(lang.url, "/03_the_language/intro#the-language");
    }

    #[test]
    fn test_section_index_skips_blank_lines() {
        let index = write_index("\n2.5.3 Garbage Collection\n\n");
        let table = load_section_index(index.path(), &sections()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_section_index_missing_separator() {
        let index = write_index("2.5.3 Garbage Collection\nmalformed\n");
        let err = load_section_index(index.path(), &sections()).unwrap_err();
        let err = err.downcast::<LoadError>().unwrap();
        assert!(matches!(err, LoadError::MissingSeparator { line: 2, .. }));
    }

    #[test]
    fn test_section_index_unknown_section() {
        let index = write_index("42.1 Answer\n");
        let err = load_section_index(index.path(), &sections()).unwrap_err();
        let err = err.downcast::<LoadError>().unwrap();
        assert!(matches!(
            err,
            LoadError::Url {
                source: url::UrlError::UnknownSection(_),
                ..
            }
        ));
    }

    #[test]
    fn test_missing_index_file() {
        let err = load_section_index(Path::new("/nonexistent/input.txt"), &sections());
        assert!(err.is_err());
    }

    #[test]
    fn test_api_index() {
        let index = write_index("[lua_setgcthreshold (value)] lua_setgcthreshold\n");
        let paths = write_index("[lua_setgcthreshold (value)] /04_API/ch05\n");
        let table = load_api_index(index.path(), paths.path()).unwrap();

        let rec = table.get("lua_setgcthreshold").unwrap();
        assert_eq!(rec.slug, "lua-setgcthreshold-value");
        assert_eq!(rec.url, "/04_API/ch05#lua-setgcthreshold-value");
        assert!(rec.display_name.is_none());
    }

    #[test]
    fn test_api_index_missing_bracket() {
        let index = write_index("lua_setgcthreshold\n");
        let paths = write_index("");
        let err = load_api_index(index.path(), paths.path()).unwrap_err();
        let err = err.downcast::<LoadError>().unwrap();
        assert!(matches!(err, LoadError::MissingBracket { line: 1, .. }));
    }

    #[test]
    fn test_api_index_missing_path_entry() {
        let index = write_index("[lua_unlisted ()] lua_unlisted\n");
        let paths = write_index("[lua_other ()] /04_API/ch01\n");
        let err = load_api_index(index.path(), paths.path()).unwrap_err();
        let err = err.downcast::<LoadError>().unwrap();
        assert!(matches!(err, LoadError::MissingPath { .. }));
    }

    #[test]
    fn test_declaration_with_bracket_inside() {
        // Split happens on the LAST bracket
        let (decl, rest) = split_declaration("[t[i] access] table_access", "f", 1).unwrap();
        assert_eq!(decl, "t[i] access");
        assert_eq!(rest, "table_access");
    }
}
