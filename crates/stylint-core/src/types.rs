//! Core types for violations, corrections, and results.

use crate::description::RuleDescription;
use crate::source::SourceFile;
use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for style violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// A position within a source unit.
///
/// The offset is a byte offset into the text the location was created
/// from. Line and column are resolved at creation time; the column counts
/// characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path of the source unit, if it has one.
    pub file: Option<PathBuf>,
    /// Byte offset in the source text.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Location {
    /// Creates a location for `offset` within `file`, resolving line and column.
    ///
    /// Offsets past the end of the text are clamped to its length.
    #[must_use]
    pub fn new(file: &SourceFile, offset: usize) -> Self {
        let offset = offset.min(file.contents().len());
        let (line, column) = file.line_and_column(offset);
        Self {
            file: file.path().map(std::path::Path::to_path_buf),
            offset,
            line,
            column,
        }
    }

    fn display_file(&self) -> String {
        self.file
            .as_ref()
            .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.display_file(), self.line, self.column)
    }
}

/// A style violation found by a rule.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    /// Description of the rule that produced this violation.
    pub rule: RuleDescription,
    /// Where the violation occurs.
    pub location: Location,
    /// Severity of this violation.
    pub severity: Severity,
    /// Optional explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Violation {
    /// Creates a new warning-level violation.
    #[must_use]
    pub fn new(rule: &RuleDescription, location: Location) -> Self {
        Self {
            rule: *rule,
            location,
            severity: Severity::Warning,
            reason: None,
        }
    }

    /// Sets the severity of this violation.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Adds a reason to this violation.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns the reason, falling back to the rule's description.
    #[must_use]
    pub fn message(&self) -> &str {
        self.reason.as_deref().unwrap_or(self.rule.description)
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}\n",
            self.rule.identifier, self.rule.name, self.location
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message());
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}: {} Violation: {} ({})",
            self.location,
            self.severity,
            self.rule.name,
            self.message(),
            self.rule.identifier
        )
    }
}

/// A rewrite performed by a correctable rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    /// Description of the rule that performed the rewrite.
    pub rule: RuleDescription,
    /// Start of the rewritten range in the text before correction.
    pub location: Location,
}

impl Correction {
    /// Creates a new correction record.
    #[must_use]
    pub fn new(rule: &RuleDescription, location: Location) -> Self {
        Self {
            rule: *rule,
            location,
        }
    }
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Corrected {}", self.location, self.rule.name)
    }
}

/// A [`Violation`] as a miette diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("[{identifier}] {message}")]
pub struct ViolationDiagnostic {
    identifier: String,
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            identifier: v.rule.identifier.to_string(),
            message: v.message().to_string(),
            help: v.reason.as_ref().map(|_| v.rule.description.to_string()),
            span: SourceSpan::from((v.location.offset, 0)),
            label_message: format!("{} ({})", v.rule.name, v.severity),
        }
    }
}

/// Result of running a lint pass.
#[derive(Debug, Default, Serialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Counts violations by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity: Severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Formats a one-line summary of the result.
    #[must_use]
    pub fn summary(&self) -> String {
        let (errors, warnings, infos) = self.count_by_severity();
        format!(
            "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_checked
        )
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
    }
}

/// A file whose corrected contents could not be written back.
#[derive(Debug, Clone, Serialize)]
pub struct PersistFailure {
    /// File that failed to persist.
    pub file: PathBuf,
    /// Error message.
    pub message: String,
}

/// Result of running a correction pass.
#[derive(Debug, Default, Serialize)]
pub struct CorrectionReport {
    /// All corrections applied, per file in left-to-right order.
    pub corrections: Vec<Correction>,
    /// Number of files that had at least one correction.
    pub files_corrected: usize,
    /// Number of files inspected.
    pub files_checked: usize,
    /// Files whose corrected contents could not be persisted.
    pub failures: Vec<PersistFailure>,
}

impl CorrectionReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every corrected file was written back.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.failures.is_empty()
    }

    /// Formats a one-line summary of the report.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Done correcting {} file(s)! Applied {} correction(s) to {} file(s)",
            self.files_checked,
            self.corrections.len(),
            self.files_corrected
        )
    }
}
