//! Subcommand implementations.

pub mod autocorrect;
pub mod init;
pub mod lint;
pub mod output;
pub mod rules;

use crate::config_resolver::ConfigSource;
use anyhow::{Context, Result};
use std::path::Path;
use stylint_core::{Config, Linter};

/// Loads the configuration a resolved source points at.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Builds a linter running the built-in rules the configuration enables.
pub fn build_linter(path: &Path, exclude: Vec<String>, config: Config) -> Result<Linter> {
    let rules = stylint_rules::registry().configured_rules(&config);
    Linter::builder()
        .root(path)
        .excludes(exclude)
        .rules(rules)
        .config(config)
        .build()
        .context("Failed to build linter")
}
