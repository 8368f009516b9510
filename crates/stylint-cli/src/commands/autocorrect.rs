//! Autocorrect command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use super::{build_linter, load_config};
use crate::config_resolver::ConfigSource;

/// Runs the autocorrect command.
pub fn run(path: &Path, exclude: Vec<String>, source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;
    let linter = build_linter(path, exclude, config)?;

    let correctable = linter
        .rules()
        .iter()
        .filter(|r| r.as_correctable().is_some())
        .count();
    tracing::info!(
        "Correcting {} with {} correctable rules",
        path.display(),
        correctable
    );

    let report = linter.correct().context("Autocorrect failed")?;

    for correction in &report.corrections {
        println!("{correction}");
    }
    println!("{}", report.summary());

    if !report.is_persisted() {
        for failure in &report.failures {
            eprintln!("{}: {}", failure.file.display(), failure.message);
        }
        bail!("Failed to write {} file(s)", report.failures.len());
    }

    Ok(())
}
