//! Tool configuration management for `relink.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                           |
//! |--------------|---------------------------------------------------|
//! | `[input]`    | Index file names (sections, api_index, api_paths) |
//! | `[walk]`     | File selection during the tree walk               |
//! | `[sections]` | Top-level section number → base path map          |
//!
//! The config file is optional; without one the defaults reproduce the
//! layout of the reference-manual migration the tool was written for.
//! The loaded config is passed down explicitly; the link table and the
//! section map never live in process globals.

use crate::{
    cli::{Cli, Commands, RewriteArgs},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Map from top-level section number ("2") to URL base path ("/02_basic_concepts").
///
/// Ordered so that logs and error listings are deterministic.
pub type SectionMap = BTreeMap<String, String>;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing relink.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelinkConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Root of the documentation tree to rewrite (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Report what would change without writing (internal use only)
    #[serde(skip)]
    pub dry_run: bool,

    /// Index file names
    #[serde(default)]
    pub input: InputConfig,

    /// File selection during the tree walk
    #[serde(default)]
    pub walk: WalkConfig,

    /// Section number → base path map used by the URL resolver
    #[serde(default = "default_sections")]
    pub sections: SectionMap,
}

/// Index file locations, resolved relative to the tree root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Section index: one `old_id display_name` per line
    pub sections: PathBuf,
    /// API declaration index: one `[declaration] old_id` per line
    pub api_index: PathBuf,
    /// API path table: one `[declaration] path` per line
    pub api_paths: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sections: PathBuf::from("input.txt"),
            api_index: PathBuf::from("api_orig_index.txt"),
            api_paths: PathBuf::from("input_api.txt"),
        }
    }
}

/// File selection during the tree walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// File extensions to rewrite (without the dot)
    pub extensions: Vec<String>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
        }
    }
}

/// Section map of the reference manual the original migration targeted.
fn default_sections() -> SectionMap {
    [
        ("1", "/01_intro"),
        ("2", "/02_basic_concepts"),
        ("3", "/03_the_language"),
        ("4", "/04_API"),
        ("5", "/05_aux_lib"),
        ("6", "/06_standard_lib"),
        ("7", "/07_standalone"),
        ("8", "/08_incompatibilities"),
        ("9", "/09_complete_syntax"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Default for RelinkConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            dry_run: false,
            input: InputConfig::default(),
            walk: WalkConfig::default(),
            sections: default_sections(),
        }
    }
}

impl RelinkConfig {
    /// Load configuration from CLI arguments.
    ///
    /// The config file is optional: when `-C`/`relink.toml` does not exist
    /// the built-in defaults apply. CLI options override file values.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = cwd.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.config_path = config_path;
        config.finalize(cli);
        Ok(config)
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let args = match &cli.command {
            Commands::Sections { args, .. } | Commands::Api { args, .. } => args,
        };
        self.apply_rewrite_args(args);
        self.apply_command_options(cli);

        // Resolve index paths relative to the tree root
        self.input.sections = self.root.join(&self.input.sections);
        self.input.api_index = self.root.join(&self.input.api_index);
        self.input.api_paths = self.root.join(&self.input.api_paths);
    }

    /// Apply shared rewrite arguments from CLI.
    fn apply_rewrite_args(&mut self, args: &RewriteArgs) {
        crate::logger::set_verbose(args.verbose);
        self.dry_run = args.dry_run;
        self.root = args
            .root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Sections { input, .. } => {
                Self::update_option(&mut self.input.sections, input.as_ref());
            }
            Commands::Api { index, paths, .. } => {
                Self::update_option(&mut self.input.api_index, index.as_ref());
                Self::update_option(&mut self.input.api_paths, paths.as_ref());
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse config from TOML, panicking on unknown fields (catches typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> RelinkConfig {
    let (parsed, ignored) = RelinkConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
