//! # stylint-rules
//!
//! Built-in style rules for stylint.
//!
//! ## Available Rules
//!
//! | Identifier | Kind | Description |
//! |------------|------|-------------|
//! | `statement_position` | correctable | `else` and `catch` on the line of the closing brace |
//! | `collection_shorthand_syntax` | correctable | `[T]` over `Array<T>`, `[K: V]` over `Dictionary<K, V>` |
//! | `line_length` | configurable | Warning and error thresholds for line length |
//! | `empty_count` | opt-in | `isEmpty` over comparing `count` to zero |
//!
//! ## Usage
//!
//! ```ignore
//! use stylint_core::{Config, Linter};
//!
//! let config = Config::from_file("stylint.toml".as_ref())?;
//! let linter = Linter::builder()
//!     .root("./Sources")
//!     .rules(stylint_rules::registry().configured_rules(&config))
//!     .config(config)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collection_shorthand_syntax;
pub mod empty_count;
pub mod line_length;
mod presets;
pub mod statement_position;

pub use collection_shorthand_syntax::CollectionShorthandSyntax;
pub use empty_count::EmptyCount;
pub use line_length::LineLength;
pub use presets::{all_rules, default_rules, registry};
pub use statement_position::StatementPosition;

/// Re-export core types for convenience.
pub use stylint_core::{Rule, Severity, Violation};

#[cfg(test)]
pub(crate) mod testing {
    use stylint_core::{Rule, SourceFile};

    /// Checks a rule against the examples in its description.
    ///
    /// Corrected output must match the expected text and must no longer
    /// trigger the rule.
    pub(crate) fn verify_examples(rule: &dyn Rule) {
        let description = rule.description();

        for example in description.non_triggering_examples {
            let file = SourceFile::from_contents(*example);
            assert!(
                rule.validate(&file).is_empty(),
                "{} should not trigger on {example:?}",
                description.identifier
            );
        }

        for example in description.triggering_examples {
            let file = SourceFile::from_contents(*example);
            assert!(
                !rule.validate(&file).is_empty(),
                "{} should trigger on {example:?}",
                description.identifier
            );
        }

        for (before, after) in description.corrections {
            let correctable = rule
                .as_correctable()
                .expect("rules with correction examples are correctable");
            let mut file = SourceFile::from_contents(*before);
            let corrections = correctable.correct(&mut file).expect("in-memory file");

            assert_eq!(file.contents(), *after, "correcting {before:?}");
            assert!(!corrections.is_empty(), "no corrections for {before:?}");
            assert!(
                rule.validate(&file).is_empty(),
                "{} still triggers after correcting {before:?}",
                description.identifier
            );
        }
    }
}
