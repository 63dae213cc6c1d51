//! Tree walking and in-place link rewriting.
//!
//! Walks the documentation tree, selects files by extension and replaces
//! every known old-style link pattern:
//!
//! - `(#<old_id>)` → `(<url>)` (anchor targets, both variants)
//! - `[§<old_id>]` → `[<display_name>]` (display text, sections variant)
//!
//! Files whose content would not change are left untouched, so a second
//! run over rewritten output is a no-op. Any read or write failure aborts
//! the run; files already rewritten stay rewritten.

use crate::link::LinkTable;
use crate::{debug, log};
use anyhow::{Context, Result};
use jwalk::WalkDir;
use std::{fs, path::Path};

/// Everything the walker needs, constructed once per run.
pub struct RewriteContext<'a> {
    /// Old-id lookup table, read-only during the walk
    pub table: &'a LinkTable,
    /// Also rewrite `[§id]` display references (sections variant)
    pub rewrite_display: bool,
    /// File extensions to select (without the dot)
    pub extensions: &'a [String],
    /// Report without writing
    pub dry_run: bool,
}

/// Counters reported after the walk.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Files matching the extension filter
    pub files_seen: usize,
    /// Files whose content changed
    pub files_changed: usize,
    /// `(#id)` anchor targets replaced
    pub links_rewritten: usize,
    /// `[§id]` display references replaced
    pub names_rewritten: usize,
}

/// Walk `root` and rewrite every matching file in place.
///
/// The walk order is sorted so logs and failures are deterministic.
pub fn rewrite_tree(root: &Path, ctx: &RewriteContext) -> Result<RewriteStats> {
    let mut stats = RewriteStats::default();

    let entries = WalkDir::new(root)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file());

    for entry in entries {
        let path = entry.path();
        if !matches_extension(&path, ctx.extensions) {
            continue;
        }
        stats.files_seen += 1;
        rewrite_file(&path, ctx, &mut stats)?;
    }

    Ok(stats)
}

/// Rewrite one file in place, if any pattern matches.
fn rewrite_file(path: &Path, ctx: &RewriteContext, stats: &mut RewriteStats) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let (rewritten, links, names) = rewrite_content(&content, ctx);
    if links == 0 && names == 0 {
        debug!("rewrite"; "unchanged: {}", path.display());
        return Ok(());
    }

    stats.files_changed += 1;
    stats.links_rewritten += links;
    stats.names_rewritten += names;
    log!("rewrite"; "{} ({} link{})", path.display(), links + names,
        if links + names == 1 { "" } else { "s" });

    if ctx.dry_run {
        return Ok(());
    }

    // Same path as the read, so the original permission bits survive
    fs::write(path, rewritten).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Apply all substitutions to one document. Pure; returns the rewritten
/// content plus the anchor and display replacement counts.
///
/// Replacements are literal, so ids that prefix each other cannot collide:
/// the closing delimiter is part of the pattern (`(#2.5)` never matches
/// inside `(#2.5.3)`).
pub fn rewrite_content(content: &str, ctx: &RewriteContext) -> (String, usize, usize) {
    let mut result = content.to_string();
    let mut links = 0;
    let mut names = 0;

    for record in ctx.table.iter() {
        let old = format!("(#{})", record.old_id);
        let count = result.matches(&old).count();
        if count > 0 {
            result = result.replace(&old, &format!("({})", record.url));
            links += count;
        }

        if ctx.rewrite_display
            && let Some(name) = &record.display_name
        {
            let old = format!("[§{}]", record.old_id);
            let count = result.matches(&old).count();
            if count > 0 {
                result = result.replace(&old, &format!("[{name}]"));
                names += count;
            }
        }
    }

    (result, links, names)
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}
