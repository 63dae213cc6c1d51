//! Relink - cross-reference link rewriter for documentation trees.

#![allow(dead_code)]

mod cli;
mod config;
mod input;
mod link;
mod logger;
mod rewrite;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::RelinkConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = RelinkConfig::load(&cli)?;

    match &cli.command {
        Commands::Sections { .. } => cli::sections::run_sections(&config),
        Commands::Api { .. } => cli::api::run_api(&config),
    }
}
