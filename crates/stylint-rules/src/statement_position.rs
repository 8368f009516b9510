//! Rule to keep `else` and `catch` on the line of the closing brace.
//!
//! # Rationale
//!
//! `} else {` and `} catch {` read as one statement. Moving the keyword to
//! its own line, or padding it with extra spaces, breaks that visual link.
//!
//! # Correction
//!
//! Rewrites any run of whitespace between `}` and the keyword to a single
//! space. Keywords inside strings and comments are left alone.

use regex::Regex;
use std::sync::OnceLock;
use stylint_core::{
    apply_corrections, CorrectableRule, Correction, CorrectionError, Location, Rule,
    RuleDescription, SourceFile, SyntaxKind, SyntaxMatch, Violation,
};

/// Description of the statement position rule.
pub static DESCRIPTION: RuleDescription = RuleDescription::new(
    "statement_position",
    "Statement Position",
    "Else and catch should be on the same line, one space after the previous declaration.",
)
.non_triggering_examples(&[
    "} else if {",
    "} else {",
    "} catch {",
    "\"}else{\"",
    "struct A { let catchphrase: Int }\nlet a = A(\n catchphrase: 0\n)",
    "struct A { let `catch`: Int }\nlet a = A(\n `catch`: 0\n)",
])
.triggering_examples(&["}else if {", "}  else {", "}\ncatch {", "}\n\t  catch {"])
.corrections(&[
    ("}\n else {\n", "} else {\n"),
    ("}\n   else if {\n", "} else if {\n"),
    ("}\n catch {\n", "} catch {\n"),
    ("}  else {\n", "} else {\n"),
    ("}else if {\n", "} else if {\n"),
]);

/// Matches a closing brace followed by `else` or `catch` with anything but a
/// single space between them.
fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\}(?:[ \t\r]{2,}|[\t\r]|\s*\n\s*)?\b(else|catch)\b")
            .expect("statement position pattern is valid")
    })
}

fn is_keyword(m: &SyntaxMatch) -> bool {
    m.starts_with(SyntaxKind::Keyword)
}

/// Requires `else` and `catch` to follow `}` on the same line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementPosition;

impl StatementPosition {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for StatementPosition {
    fn description(&self) -> &'static RuleDescription {
        &DESCRIPTION
    }

    fn validate(&self, file: &SourceFile) -> Vec<Violation> {
        file.match_pattern(pattern())
            .iter()
            .filter(|m| is_keyword(m))
            .filter_map(|m| m.first_of(SyntaxKind::Keyword))
            .map(|keyword| Violation::new(&DESCRIPTION, Location::new(file, keyword.range.start)))
            .collect()
    }

    fn as_correctable(&self) -> Option<&dyn CorrectableRule> {
        Some(self)
    }
}

impl CorrectableRule for StatementPosition {
    fn correct(&self, file: &mut SourceFile) -> Result<Vec<Correction>, CorrectionError> {
        apply_corrections(file, &DESCRIPTION, pattern(), "} $1", is_keyword)
            .map(|result| result.corrections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::verify_examples;

    #[test]
    fn description_examples_hold() {
        verify_examples(&StatementPosition);
    }

    #[test]
    fn violation_points_at_keyword() {
        let file = SourceFile::from_contents("if a {\n}\n  else {\n}\n");
        let violations = StatementPosition.validate(&file);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.offset, 11);
        assert_eq!(
            (violations[0].location.line, violations[0].location.column),
            (3, 3)
        );
    }

    #[test]
    fn correction_points_at_brace_in_original_text() {
        let mut file = SourceFile::from_contents("do {\n}\ncatch {\n}\n");
        let corrections = StatementPosition.correct(&mut file).expect("in-memory file");

        assert_eq!(file.contents(), "do {\n} catch {\n}\n");
        assert_eq!(corrections.len(), 1);
        assert_eq!(corrections[0].location.offset, 5);
        assert_eq!(corrections[0].rule, DESCRIPTION);
    }

    #[test]
    fn description_is_shared_across_instances() {
        assert!(std::ptr::eq(
            StatementPosition.description(),
            StatementPosition::new().description()
        ));
        assert_eq!(StatementPosition.description().identifier, "statement_position");
    }

    #[test]
    fn corrections_are_ordered_left_to_right() {
        let mut file = SourceFile::from_contents("if a {\n}  else {\n}\ndo {\n}\ncatch {\n}\n");
        let corrections = StatementPosition.correct(&mut file).expect("in-memory file");

        assert_eq!(file.contents(), "if a {\n} else {\n}\ndo {\n} catch {\n}\n");
        let offsets: Vec<usize> = corrections.iter().map(|c| c.location.offset).collect();
        assert_eq!(offsets, [7, 24]);
        assert_eq!(corrections[1].location.line, 5);
        assert!(StatementPosition.validate(&file).is_empty());
    }

    #[test]
    fn well_formed_input_is_untouched() {
        let text = "if a {\n} else if b {\n} else {\n}\n";
        let mut file = SourceFile::from_contents(text);

        assert!(StatementPosition.validate(&file).is_empty());
        assert!(StatementPosition
            .correct(&mut file)
            .expect("in-memory file")
            .is_empty());
        assert_eq!(file.contents(), text);
    }

    #[test]
    fn correction_persists_to_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("Main.swift");
        std::fs::write(&path, "do {\n}\n  catch {\n}\n").expect("seed file");
        let mut file = SourceFile::read(&path).expect("read");

        StatementPosition.correct(&mut file).expect("persist");

        assert_eq!(
            std::fs::read_to_string(&path).expect("reread"),
            "do {\n} catch {\n}\n"
        );
    }

    #[test]
    fn multiline_and_raw_strings_are_left_alone() {
        let text = "let s = \"\"\"\n}\nelse\n\"\"\"\nlet r = #\"}  catch\"#\n";
        let mut file = SourceFile::from_contents(text);

        assert!(StatementPosition.validate(&file).is_empty());
        assert!(StatementPosition
            .correct(&mut file)
            .expect("in-memory file")
            .is_empty());
        assert_eq!(file.contents(), text);
    }

    #[test]
    fn keywords_in_comments_are_ignored() {
        let file = SourceFile::from_contents("// }\n// else\n/* }  catch */\n");
        assert!(StatementPosition.validate(&file).is_empty());
    }
}
