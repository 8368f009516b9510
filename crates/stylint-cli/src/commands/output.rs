//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use std::collections::HashMap;
use std::fmt::Write;
use std::path::PathBuf;
use stylint_core::{LintResult, Severity, Violation, ViolationDiagnostic};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
        OutputFormat::Pretty => print_pretty(result),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let _ = writeln!(
            out,
            "{} {} at {}",
            violation.rule.identifier, violation.rule.name, violation.location
        );
        let _ = writeln!(
            out,
            "  {}: {}",
            severity_indicator(violation.severity),
            violation.message()
        );
        if violation.reason.is_some() {
            let _ = writeln!(out, "  = help: {}", violation.rule.description);
        }
        out.push('\n');
    }

    let (errors, warnings, _) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    let _ = writeln!(out, "{summary_color}{}\x1b[0m", result.summary());
    out
}

/// One violation per line, in the `path:line:col: severity: ...` form that
/// editors and CI log parsers pick up.
fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|violation| format!("{violation}\n"))
        .collect()
}

fn print_pretty(result: &LintResult) {
    let mut sources: HashMap<PathBuf, Option<String>> = HashMap::new();

    for violation in &result.violations {
        eprintln!("{:?}", pretty_report(violation, &mut sources));
    }
    println!("{}", result.summary());
}

fn pretty_report(
    violation: &Violation,
    sources: &mut HashMap<PathBuf, Option<String>>,
) -> Report {
    let report = Report::new(ViolationDiagnostic::from(violation));
    let Some(path) = &violation.location.file else {
        return report;
    };
    let contents = sources
        .entry(path.clone())
        .or_insert_with(|| std::fs::read_to_string(path).ok());
    match contents {
        Some(text) => report.with_source_code(NamedSource::new(
            path.display().to_string(),
            text.clone(),
        )),
        None => report,
    }
}
