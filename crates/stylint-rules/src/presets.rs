//! Built-in rule sets.

use crate::{CollectionShorthandSyntax, EmptyCount, LineLength, StatementPosition};
use stylint_core::{RuleBox, RuleRegistry};

/// Returns a registry holding every built-in rule.
///
/// This is the registry the CLI resolves configuration against.
#[must_use]
pub fn registry() -> RuleRegistry {
    RuleRegistry::new()
        .register::<StatementPosition>()
        .register::<CollectionShorthandSyntax>()
        .register_configurable::<LineLength>()
        .register::<EmptyCount>()
}

/// Returns the default rule set.
///
/// Includes every built-in rule that is not opt-in:
/// - `statement_position`
/// - `collection_shorthand_syntax`
/// - `line_length`
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![
        Box::new(StatementPosition::new()),
        Box::new(CollectionShorthandSyntax::new()),
        Box::new(LineLength::new()),
    ]
}

/// Returns all built-in rules, opt-in rules included.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    let mut rules = default_rules();
    rules.push(Box::new(EmptyCount::new()));
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylint_core::{rule_lists_equal, Config};

    #[test]
    fn registry_matches_presets() {
        let registry = registry();
        assert_eq!(registry.len(), all_rules().len());
        assert!(rule_lists_equal(&registry.default_rules(), &default_rules()));
        assert!(rule_lists_equal(&registry.all_rules(), &all_rules()));
        assert!(rule_lists_equal(
            &registry.configured_rules(&Config::default()),
            &default_rules()
        ));
    }

    #[test]
    fn only_empty_count_is_opt_in() {
        let opt_in: Vec<&str> = all_rules()
            .iter()
            .filter(|r| r.as_opt_in().is_some())
            .map(|r| r.description().identifier)
            .collect();
        assert_eq!(opt_in, vec!["empty_count"]);
    }

    #[test]
    fn identifiers_are_unique() {
        let mut identifiers: Vec<&str> = all_rules()
            .iter()
            .map(|r| r.description().identifier)
            .collect();
        identifiers.sort_unstable();
        identifiers.dedup();
        assert_eq!(identifiers.len(), all_rules().len());
    }
}
