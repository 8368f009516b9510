//! Rule to limit line length.
//!
//! # Configuration
//!
//! An array of thresholds, warning first:
//!
//! ```toml
//! [rules]
//! line_length = [120, 200]
//! ```
//!
//! A line longer than several thresholds is reported once, at the severity
//! of the highest one it exceeds.

use stylint_core::{
    ConfigurableRule, Location, ParameterizedRule, Rule, RuleDescription, RuleParameter,
    SourceFile, Violation,
};

/// Description of the line length rule.
pub static DESCRIPTION: RuleDescription = RuleDescription::new(
    "line_length",
    "Line Length",
    "Lines should not span too many characters.",
)
.non_triggering_examples(&["let short = 1\n"])
.triggering_examples(&[concat!(
    "let long = \"",
    "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx",
    "\"\n"
)]);

/// Default thresholds: warning above 100 characters, error above 200.
pub const DEFAULT_THRESHOLDS: [usize; 2] = [100, 200];

/// Limits the number of characters per line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLength {
    parameters: Vec<RuleParameter<usize>>,
}

impl Default for LineLength {
    fn default() -> Self {
        Self::with_parameters(RuleParameter::from_values(DEFAULT_THRESHOLDS.to_vec()))
    }
}

impl LineLength {
    /// Creates the rule with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the rule with custom thresholds, warning first.
    #[must_use]
    pub fn with_thresholds(thresholds: impl IntoIterator<Item = usize>) -> Self {
        Self::with_parameters(RuleParameter::from_values(thresholds.into_iter().collect()))
    }
}

impl Rule for LineLength {
    fn description(&self) -> &'static RuleDescription {
        &DESCRIPTION
    }

    fn validate(&self, file: &SourceFile) -> Vec<Violation> {
        file.lines()
            .filter_map(|line| {
                let length = line.content.chars().count();
                let exceeded = self
                    .parameters
                    .iter()
                    .filter(|p| length > p.value)
                    .max_by_key(|p| p.value)?;
                Some(
                    Violation::new(&DESCRIPTION, Location::new(file, line.offset))
                        .with_severity(exceeded.severity)
                        .with_reason(format!(
                            "Line should be {} characters or less: currently {length} characters",
                            exceeded.value
                        )),
                )
            })
            .collect()
    }

    fn as_configurable(&self) -> Option<&dyn ConfigurableRule> {
        Some(self)
    }
}

impl ParameterizedRule for LineLength {
    type Parameter = usize;

    fn with_parameters(parameters: Vec<RuleParameter<usize>>) -> Self {
        Self { parameters }
    }

    fn parameters(&self) -> &[RuleParameter<usize>] {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::verify_examples;
    use stylint_core::{rules_equal, Severity};

    fn line(length: usize) -> String {
        format!("{}\n", "x".repeat(length))
    }

    #[test]
    fn description_examples_hold() {
        verify_examples(&LineLength::new());
    }

    #[test]
    fn reports_highest_exceeded_threshold() {
        let rule = LineLength::with_thresholds([10, 20]);
        let file = SourceFile::from_contents(format!("{}{}{}", line(10), line(11), line(21)));

        let violations = rule.validate(&file);

        let found: Vec<(usize, Severity)> = violations
            .iter()
            .map(|v| (v.location.line, v.severity))
            .collect();
        assert_eq!(found, vec![(2, Severity::Warning), (3, Severity::Error)]);
        assert_eq!(
            violations[1].message(),
            "Line should be 20 characters or less: currently 21 characters"
        );
    }

    #[test]
    fn violation_display() {
        let file = SourceFile::from_contents(line(12)).with_path("Sources/App.swift");
        let violations = LineLength::with_thresholds([10]).validate(&file);
        insta::assert_snapshot!(
            violations[0].to_string(),
            @"Sources/App.swift:1:1: warning: Line Length Violation: Line should be 10 characters or less: currently 12 characters (line_length)"
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        let rule = LineLength::with_thresholds([3]);
        let file = SourceFile::from_contents("äöü\n");
        assert!(rule.validate(&file).is_empty());
    }

    #[test]
    fn decodes_thresholds_from_config() {
        let table: toml::Table = toml::from_str("line_length = [120, 200]").expect("valid toml");
        let value = table.get("line_length").expect("present");

        let rule = LineLength::from_config(value).expect("decodes");
        let severities: Vec<Severity> = rule.parameters().iter().map(|p| p.severity).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Error]);
        assert!(!rules_equal(&rule, &LineLength::new()));
        assert!(rules_equal(&rule, &LineLength::with_thresholds([120, 200])));
    }

    #[test]
    fn rejects_scalar_config() {
        let table: toml::Table = toml::from_str("line_length = 120").expect("valid toml");
        let value = table.get("line_length").expect("present");
        assert!(LineLength::from_config(value).is_none());
    }
}
