//! Configuration types for stylint.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Top-level configuration for stylint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rules that never run, even if listed elsewhere.
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    /// Opt-in rules to enable.
    #[serde(default)]
    pub opt_in_rules: Vec<String>,

    /// When set, only these rules run (opt-in rules included).
    #[serde(default)]
    pub only_rules: Option<Vec<String>>,

    /// Severity threshold for a failing run (default: "error").
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configuration values, keyed by rule identifier.
    ///
    /// Each value is handed untouched to the rule's configuration decoder.
    #[serde(default)]
    pub rules: BTreeMap<String, toml::Value>,

    /// Per-rule severity overrides, keyed by rule identifier.
    #[serde(default)]
    pub severity: HashMap<String, Severity>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule may run, given whether it is an opt-in rule.
    #[must_use]
    pub fn is_rule_enabled(&self, identifier: &str, opt_in: bool) -> bool {
        if self.disabled_rules.iter().any(|r| r == identifier) {
            return false;
        }
        if let Some(only) = &self.only_rules {
            return only.iter().any(|r| r == identifier);
        }
        !opt_in || self.opt_in_rules.iter().any(|r| r == identifier)
    }

    /// Gets the configuration value for a rule.
    #[must_use]
    pub fn rule_config(&self, identifier: &str) -> Option<&toml::Value> {
        self.rules.get(identifier)
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, identifier: &str) -> Option<Severity> {
        self.severity.get(identifier).copied()
    }

    /// Returns the severity at which a run fails.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// File extensions to analyze, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_excludes(),
            extensions: default_extensions(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_excludes() -> Vec<String> {
    vec!["**/.build/**".to_string(), "**/Pods/**".to_string()]
}

fn default_extensions() -> Vec<String> {
    vec!["swift".to_string()]
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
