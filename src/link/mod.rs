//! Link records and the old-id lookup table.
//!
//! A [`LinkRecord`] maps one legacy anchor identifier to its new slug and
//! resolved URL. Records are built once at startup by the input loader and
//! consumed read-only during the tree walk.

pub mod slug;
pub mod url;

use rustc_hash::FxHashMap;

/// One legacy anchor and everything needed to rewrite it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Legacy identifier, e.g. `2.5.3` or `lua_setgcthreshold`
    pub old_id: String,
    /// New anchor slug, e.g. `garbage-collection`
    pub slug: String,
    /// Original heading text, e.g. `Garbage Collection`.
    /// Only present for the sections format; drives `[§id]` display rewriting.
    pub display_name: Option<String>,
    /// Resolved relative URL, e.g. `/02_basic_concepts/ch05#garbage-collection`
    pub url: String,
}

/// Read-only table of link records, keyed by old identifier.
///
/// Keeps insertion order so the rewrite pass is deterministic.
#[derive(Debug, Default)]
pub struct LinkTable {
    records: Vec<LinkRecord>,
    index: FxHashMap<String, usize>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. A duplicate old id replaces the earlier record
    /// in place (last one wins); returns whether it was a duplicate.
    pub fn insert(&mut self, record: LinkRecord) -> bool {
        match self.index.get(&record.old_id) {
            Some(&pos) => {
                self.records[pos] = record;
                true
            }
            None => {
                self.index.insert(record.old_id.clone(), self.records.len());
                self.records.push(record);
                false
            }
        }
    }

    /// Look up a record by old identifier.
    pub fn get(&self, old_id: &str) -> Option<&LinkRecord> {
        self.index.get(old_id).map(|&pos| &self.records[pos])
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LinkRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(old_id: &str, url: &str) -> LinkRecord {
        LinkRecord {
            old_id: old_id.to_string(),
            slug: String::new(),
            display_name: None,
            url: url.to_string(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = LinkTable::new();
        assert!(!table.insert(record("2.5.3", "/02_basic_concepts/ch05#gc")));
        assert!(!table.insert(record("3", "/03_the_language/intro#lang")));

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("2.5.3").map(|r| r.url.as_str()),
            Some("/02_basic_concepts/ch05#gc")
        );
        assert!(table.get("9.9").is_none());
    }

    #[test]
    fn test_duplicate_replaces() {
        let mut table = LinkTable::new();
        table.insert(record("2.5", "/old"));
        assert!(table.insert(record("2.5", "/new")));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("2.5").map(|r| r.url.as_str()), Some("/new"));
    }

    #[test]
    fn test_iteration_order() {
        let mut table = LinkTable::new();
        for id in ["3", "1", "2"] {
            table.insert(record(id, "/x"));
        }
        let ids: Vec<_> = table.iter().map(|r| r.old_id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }
}
