//! Rule to prefer `[T]` and `[K: V]` over `Array<T>` and `Dictionary<K, V>`.
//!
//! # Correction
//!
//! Array types are rewritten first, then dictionary types. Each pass reports
//! its corrections left to right against the text it started from.

use regex::Regex;
use std::sync::OnceLock;
use stylint_core::{
    apply_corrections, CorrectableRule, Correction, CorrectionError, Location, Rule,
    RuleDescription, SourceFile, SyntaxMatch, Violation,
};

/// Description of the collection shorthand syntax rule.
pub static DESCRIPTION: RuleDescription = RuleDescription::new(
    "collection_shorthand_syntax",
    "Collection Shorthand Syntax",
    "Prefer shorthand syntax for collections instead of the Generic syntax",
)
.non_triggering_examples(&[
    "var ints: [Int] = [1, 2, 3]",
    "let ints: [Int] = [1, 2, 3]",
    "func getInts() -> [Int] { return [1] }",
    "var ints: [String: Int] = [\"a\": 1, \"b\": 2, \"c\": 3]",
    "let ints: [Int:Int] = [1: 1, 2:2, 3:3]",
    "let ints:[Int:Int] = [1: 1, 2:2, 3:3]",
    "func getInts() ->[String: String] { return [1] }",
    "let s = \"Array<Int>\"",
    "// Dictionary<String, Int>",
])
.triggering_examples(&[
    "var ints: Array<Int> = [1, 2, 3]",
    "let ints: Array<Int> = [1, 2, 3]",
    "let ints:Array<Int> = [1, 2, 3]",
    "func getInts() -> Array<Int> { return [1] }",
    "var ints: Dictionary<String, Int> = [\"a\": 1, \"b\": 2, \"c\": 3]",
    "let ints: Dictionary<Int,Int> = [1: 1, 2:2, 3:3]",
    "let ints:Dictionary<Int,Int> = [1: 1, 2:2, 3:3]",
    "func getInts() -> Dictionary<String, String> { return [1] }",
    "func getInts()->Dictionary<String, String> { return [1] }",
])
.corrections(&[
    (
        "var ints: Array<Int> = [1, 2, 3]",
        "var ints: [Int] = [1, 2, 3]",
    ),
    ("let ints:Array< Int > = []", "let ints:[Int] = []"),
    (
        "let ints: Dictionary<Int,Int> = [:]",
        "let ints: [Int: Int] = [:]",
    ),
    (
        "func getInts()->Dictionary<String, String> { return [:] }",
        "func getInts()->[String: String] { return [:] }",
    ),
]);

/// A generic collection pattern and its shorthand template.
struct Shorthand {
    pattern: Regex,
    template: &'static str,
}

fn shorthands() -> &'static [Shorthand] {
    static SHORTHANDS: OnceLock<Vec<Shorthand>> = OnceLock::new();
    SHORTHANDS.get_or_init(|| {
        let prefix = r"(:|\s+|>)";
        [
            (format!(r"{prefix}Array<\s*(\w*)\s*>"), "$1[$2]"),
            (
                format!(r"{prefix}Dictionary<\s*(\w+)\s*,\s*(\w+)\s*>"),
                "$1[$2: $3]",
            ),
        ]
        .into_iter()
        .map(|(pattern, template)| Shorthand {
            pattern: Regex::new(&pattern).expect("collection shorthand pattern is valid"),
            template,
        })
        .collect()
    })
}

fn outside_literals(m: &SyntaxMatch) -> bool {
    !m.tokens.first().is_some_and(|t| t.kind.is_literal_text())
}

/// Flags `Array<T>` and `Dictionary<K, V>` type spellings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionShorthandSyntax;

impl CollectionShorthandSyntax {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for CollectionShorthandSyntax {
    fn description(&self) -> &'static RuleDescription {
        &DESCRIPTION
    }

    fn validate(&self, file: &SourceFile) -> Vec<Violation> {
        let mut violations: Vec<Violation> = shorthands()
            .iter()
            .flat_map(|shorthand| file.match_pattern(&shorthand.pattern))
            .filter(outside_literals)
            .map(|m| Violation::new(&DESCRIPTION, Location::new(file, m.range.start)))
            .collect();
        violations.sort_by_key(|v| v.location.offset);
        violations
    }

    fn as_correctable(&self) -> Option<&dyn CorrectableRule> {
        Some(self)
    }
}

impl CorrectableRule for CollectionShorthandSyntax {
    fn correct(&self, file: &mut SourceFile) -> Result<Vec<Correction>, CorrectionError> {
        let mut corrections = Vec::new();
        for shorthand in shorthands() {
            let result = apply_corrections(
                file,
                &DESCRIPTION,
                &shorthand.pattern,
                shorthand.template,
                outside_literals,
            )?;
            corrections.extend(result.corrections);
        }
        Ok(corrections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::verify_examples;

    #[test]
    fn description_examples_hold() {
        verify_examples(&CollectionShorthandSyntax);
    }

    #[test]
    fn violations_are_ordered_by_offset() {
        let file = SourceFile::from_contents(
            "let d: Dictionary<String, Int> = [:]\nlet a: Array<Int> = []\n",
        );
        let offsets: Vec<usize> = CollectionShorthandSyntax
            .validate(&file)
            .iter()
            .map(|v| v.location.offset)
            .collect();
        assert_eq!(offsets, vec![6, 43]);
    }

    #[test]
    fn corrects_both_forms_in_one_pass() {
        let mut file = SourceFile::from_contents(
            "let d: Dictionary<String, Int> = [:]\nlet a: Array<Int> = []\nlet s = \"Array<Int>\"\n",
        );
        let corrections = CollectionShorthandSyntax
            .correct(&mut file)
            .expect("in-memory file");

        assert_eq!(corrections.len(), 2);
        assert_eq!(
            file.contents(),
            "let d: [String: Int] = [:]\nlet a: [Int] = []\nlet s = \"Array<Int>\"\n"
        );
        assert!(CollectionShorthandSyntax.validate(&file).is_empty());
    }

    #[test]
    fn nested_generic_values_are_left_alone() {
        let text = "let m: Dictionary<String, Array<Int>> = [:]\n";
        let mut file = SourceFile::from_contents(text);
        CollectionShorthandSyntax
            .correct(&mut file)
            .expect("in-memory file");
        assert_eq!(file.contents(), "let m: Dictionary<String, [Int]> = [:]\n");
    }
}
