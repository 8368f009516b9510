//! stylint CLI tool.
//!
//! Usage:
//! ```bash
//! stylint lint [OPTIONS] [PATH]
//! stylint autocorrect [PATH]
//! stylint rules
//! stylint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Style linter and autocorrector for Swift sources
#[derive(Parser)]
#[command(name = "stylint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "STYLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report style violations
    Lint {
        /// File or directory to lint (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated identifiers)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Rewrite files to fix violations of correctable rules
    Autocorrect {
        /// File or directory to correct (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules
    Rules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Annotated source snippets.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lint {
            path,
            format,
            rules,
            exclude,
        } => {
            let source = config_resolver::resolve(project_dir(&path), cli.config.as_deref());
            commands::lint::run(&path, format, rules, exclude, &source)
        }
        Commands::Autocorrect { path, exclude } => {
            let source = config_resolver::resolve(project_dir(&path), cli.config.as_deref());
            commands::autocorrect::run(&path, exclude, &source)
        }
        Commands::Rules => {
            commands::rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(Path::new("."), force),
    }
}

/// Directory searched for a project config: the path itself, or the parent
/// of a single file.
fn project_dir(path: &Path) -> &Path {
    if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path
    }
}
