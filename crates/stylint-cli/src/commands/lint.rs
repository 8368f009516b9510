//! Lint command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use super::{build_linter, load_config, output};
use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the lint command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let mut config = load_config(source)?;

    if let Some(filter) = rules_filter {
        config.only_rules = Some(
            filter
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
        );
    }

    let fail_on = config.fail_on();
    let linter = build_linter(path, exclude, config)?;

    tracing::info!(
        "Linting {} with {} rules",
        path.display(),
        linter.rules().len()
    );

    let result = linter.lint().context("Lint failed")?;

    output::print(&result, format)?;

    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}
