//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_NAME: &str = "stylint.toml";

const DEFAULT_CONFIG: &str = r#"# stylint configuration

# Rules that never run
disabled_rules = []

# Opt-in rules to enable (see `stylint rules`)
opt_in_rules = []

# Severity at which `stylint lint` exits with an error: "info", "warning", "error"
fail_on = "error"

[analyzer]
# Root directory to lint (default: current directory)
# root = "./Sources"

# Glob patterns to exclude
exclude = [
    "**/.build/**",
    "**/Pods/**",
    "**/Carthage/**",
]

# File extensions to lint
extensions = ["swift"]

# Per-rule configuration, keyed by rule identifier
[rules]
# Warning threshold first, then error threshold
line_length = [120, 200]

# Per-rule severity overrides
[severity]
# statement_position = "error"
"#;

/// Runs the init command, writing the config into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure rules");
    println!("  2. Run: stylint lint");

    Ok(())
}
