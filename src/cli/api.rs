//! Api command - rewrite API reference anchors.

use anyhow::{Context, Result};

use crate::config::RelinkConfig;
use crate::input::load_api_index;
use crate::rewrite::{RewriteContext, rewrite_tree};
use crate::debug;

/// Run the api command: `(#lua_gc)` → path-table URL. Display text is
/// left alone; only heading references change.
pub fn run_api(config: &RelinkConfig) -> Result<()> {
    let table = load_api_index(&config.input.api_index, &config.input.api_paths)
        .with_context(|| format!("loading {}", config.input.api_index.display()))?;
    debug!("input"; "{} link records from {}", table.len(), config.input.api_index.display());

    let ctx = RewriteContext {
        table: &table,
        rewrite_display: false,
        extensions: &config.walk.extensions,
        dry_run: config.dry_run,
    };

    let stats = rewrite_tree(config.get_root(), &ctx)?;
    super::log_summary(&stats, config.dry_run);
    Ok(())
}
