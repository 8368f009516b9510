//! Opt-in rule to prefer `isEmpty` over comparing `count` to zero.

use regex::Regex;
use std::sync::OnceLock;
use stylint_core::{Location, OptInRule, Rule, RuleDescription, SourceFile, SyntaxKind, Violation};

/// Description of the empty count rule.
pub static DESCRIPTION: RuleDescription = RuleDescription::new(
    "empty_count",
    "Empty Count",
    "Prefer checking `isEmpty` over comparing `count` to zero.",
)
.non_triggering_examples(&[
    "var count = 0\n",
    "[Int]().isEmpty\n",
    "[Int]().count > 1\n",
    "[Int]().count == 1\n",
    "discount == 0\n",
    "let s = \"count == 0\"\n",
])
.triggering_examples(&[
    "[Int]().count == 0\n",
    "[Int]().count > 0\n",
    "[Int]().count != 0\n",
    "if items.count==0 {\n}\n",
]);

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\bcount\s*(?:==|!=|<=|>=|<|>)\s*0\b").expect("empty count pattern is valid")
    })
}

/// Flags `count` compared against zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCount;

impl EmptyCount {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EmptyCount {
    fn description(&self) -> &'static RuleDescription {
        &DESCRIPTION
    }

    fn validate(&self, file: &SourceFile) -> Vec<Violation> {
        file.match_pattern(pattern())
            .into_iter()
            .filter(|m| m.starts_with(SyntaxKind::Identifier))
            .map(|m| Violation::new(&DESCRIPTION, Location::new(file, m.range.start)))
            .collect()
    }

    fn as_opt_in(&self) -> Option<&dyn OptInRule> {
        Some(self)
    }
}

impl OptInRule for EmptyCount {}
