//! Command-line interface definitions.

pub mod api;
pub mod sections;

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::log;
use crate::rewrite::RewriteStats;

/// Relink documentation link rewriter CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: relink.toml)
    #[arg(short = 'C', long, default_value = "relink.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite section-numbered crosslinks (`(#2.5.3)` and `[§2.5.3]`)
    #[command(visible_alias = "s")]
    Sections {
        #[command(flatten)]
        args: RewriteArgs,

        /// Index file with `old_id display_name` lines (default: input.txt)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Rewrite API reference anchors (`(#lua_gc)`) from a declaration index
    #[command(visible_alias = "a")]
    Api {
        #[command(flatten)]
        args: RewriteArgs,

        /// Index file with `[declaration] old_id` lines (default: api_orig_index.txt)
        #[arg(long, value_hint = clap::ValueHint::FilePath)]
        index: Option<PathBuf>,

        /// Path table with `[declaration] path` lines (default: input_api.txt)
        #[arg(long, value_hint = clap::ValueHint::FilePath)]
        paths: Option<PathBuf>,
    },
}

/// Shared rewrite arguments for both subcommands
#[derive(clap::Args, Debug, Clone)]
pub struct RewriteArgs {
    /// Root of the documentation tree to rewrite (default: current directory)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Report what would change without writing any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Log the end-of-run summary shared by both subcommands.
pub(crate) fn log_summary(stats: &RewriteStats, dry_run: bool) {
    let verb = if dry_run { "would rewrite" } else { "rewrote" };
    log!(
        "rewrite";
        "{} {} link(s) in {} of {} file(s)",
        verb,
        stats.links_rewritten + stats.names_rewritten,
        stats.files_changed,
        stats.files_seen
    );
}

#[allow(unused)]
impl Cli {
    pub const fn is_sections(&self) -> bool {
        matches!(self.command, Commands::Sections { .. })
    }
    pub const fn is_api(&self) -> bool {
        matches!(self.command, Commands::Api { .. })
    }
}
