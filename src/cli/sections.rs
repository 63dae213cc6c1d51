//! Sections command - rewrite section-numbered crosslinks.

use anyhow::{Context, Result};

use crate::config::RelinkConfig;
use crate::input::load_section_index;
use crate::rewrite::{RewriteContext, rewrite_tree};
use crate::debug;

/// Run the sections command: `(#2.5.3)` → resolved URL, `[§2.5.3]` → heading text.
pub fn run_sections(config: &RelinkConfig) -> Result<()> {
    let table = load_section_index(&config.input.sections, &config.sections)
        .with_context(|| format!("loading {}", config.input.sections.display()))?;
    debug!("input"; "{} link records from {}", table.len(), config.input.sections.display());

    let ctx = RewriteContext {
        table: &table,
        rewrite_display: true,
        extensions: &config.walk.extensions,
        dry_run: config.dry_run,
    };

    let stats = rewrite_tree(config.get_root(), &ctx)?;
    super::log_summary(&stats, config.dry_run);
    Ok(())
}
