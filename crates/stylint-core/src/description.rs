//! Static rule metadata.

use serde::Serialize;

/// Immutable metadata identifying a rule type.
///
/// Every rule type declares exactly one description as a `static`, so the
/// value is a pure function of the rule type. Violations and corrections
/// carry a copy of it rather than a reference to the rule instance.
///
/// Two descriptions are equal when their identifiers are equal.
///
/// # Example
///
/// ```ignore
/// pub static DESCRIPTION: RuleDescription = RuleDescription::new(
///     "trailing_semicolon",
///     "Trailing Semicolon",
///     "Lines should not end with a semicolon",
/// )
/// .non_triggering_examples(&["let a = 0\n"])
/// .triggering_examples(&["let a = 0;\n"])
/// .corrections(&[("let a = 0;\n", "let a = 0\n")]);
/// ```
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RuleDescription {
    /// Stable machine identifier (e.g., `statement_position`).
    pub identifier: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// What the rule checks.
    pub description: &'static str,
    /// Inputs that must not trigger the rule.
    #[serde(skip)]
    pub non_triggering_examples: &'static [&'static str],
    /// Inputs that must trigger the rule.
    #[serde(skip)]
    pub triggering_examples: &'static [&'static str],
    /// `(before, after)` pairs the rule's correction must produce.
    #[serde(skip)]
    pub corrections: &'static [(&'static str, &'static str)],
}

impl RuleDescription {
    /// Creates a description without examples.
    #[must_use]
    pub const fn new(
        identifier: &'static str,
        name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            identifier,
            name,
            description,
            non_triggering_examples: &[],
            triggering_examples: &[],
            corrections: &[],
        }
    }

    /// Sets the examples that must not trigger the rule.
    #[must_use]
    pub const fn non_triggering_examples(mut self, examples: &'static [&'static str]) -> Self {
        self.non_triggering_examples = examples;
        self
    }

    /// Sets the examples that must trigger the rule.
    #[must_use]
    pub const fn triggering_examples(mut self, examples: &'static [&'static str]) -> Self {
        self.triggering_examples = examples;
        self
    }

    /// Sets the `(before, after)` correction examples.
    #[must_use]
    pub const fn corrections(mut self, corrections: &'static [(&'static str, &'static str)]) -> Self {
        self.corrections = corrections;
        self
    }
}

impl PartialEq for RuleDescription {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for RuleDescription {}

impl std::hash::Hash for RuleDescription {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl std::fmt::Display for RuleDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.identifier)
    }
}
