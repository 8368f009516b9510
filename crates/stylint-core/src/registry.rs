//! Registry of known rules and their factories.

use crate::config::Config;
use crate::description::RuleDescription;
use crate::rule::{ConfigurableRule, Rule, RuleBox};
use std::collections::BTreeSet;
use tracing::{debug, warn};

type Decoder = fn(&toml::Value) -> Option<RuleBox>;

/// A registered rule type.
struct Entry {
    description: &'static RuleDescription,
    opt_in: bool,
    build: fn() -> RuleBox,
    from_config: Option<Decoder>,
}

/// Maps rule identifiers to the rule types that implement them.
///
/// Rules are kept in registration order, which is also the order of the
/// lists this registry builds.
#[derive(Default)]
pub struct RuleRegistry {
    entries: Vec<Entry>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule type built from its default value.
    ///
    /// Configuration values for this rule are ignored with a warning.
    #[must_use]
    pub fn register<R: Rule + Default + 'static>(mut self) -> Self {
        self.push::<R>(None);
        self
    }

    /// Registers a configurable rule type.
    ///
    /// The default value is used when the configuration has no entry for
    /// the rule.
    #[must_use]
    pub fn register_configurable<R: ConfigurableRule + Default + 'static>(mut self) -> Self {
        fn decode<R: ConfigurableRule + 'static>(value: &toml::Value) -> Option<RuleBox> {
            R::from_config(value).map(|rule| Box::new(rule) as RuleBox)
        }

        self.push::<R>(Some(decode::<R> as Decoder));
        self
    }

    fn push<R: Rule + Default + 'static>(&mut self, from_config: Option<Decoder>) {
        let sample = R::default();
        let description = sample.description();
        if self.contains(description.identifier) {
            warn!("Rule '{}' registered twice; keeping the first", description.identifier);
            return;
        }
        self.entries.push(Entry {
            description,
            opt_in: sample.as_opt_in().is_some(),
            build: || Box::new(R::default()) as RuleBox,
            from_config,
        });
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks if a rule identifier is registered.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.description.identifier == identifier)
    }

    /// Returns the descriptions of all registered rules with their opt-in flag.
    pub fn descriptions(&self) -> impl Iterator<Item = (&'static RuleDescription, bool)> + '_ {
        self.entries.iter().map(|e| (e.description, e.opt_in))
    }

    /// Builds the default instance of a rule by identifier.
    #[must_use]
    pub fn rule(&self, identifier: &str) -> Option<RuleBox> {
        self.entries
            .iter()
            .find(|e| e.description.identifier == identifier)
            .map(|e| (e.build)())
    }

    /// Builds the default rule set: every registered rule that is not opt-in.
    #[must_use]
    pub fn default_rules(&self) -> Vec<RuleBox> {
        self.entries
            .iter()
            .filter(|e| !e.opt_in)
            .map(|e| (e.build)())
            .collect()
    }

    /// Builds every registered rule with its default configuration.
    #[must_use]
    pub fn all_rules(&self) -> Vec<RuleBox> {
        self.entries.iter().map(|e| (e.build)()).collect()
    }

    /// Builds the rules a configuration enables, configured as it asks.
    ///
    /// A rule whose configuration value cannot be decoded is left out of
    /// the list with a warning. Identifiers the configuration names that no
    /// registered rule answers to are reported with a warning too.
    #[must_use]
    pub fn configured_rules(&self, config: &Config) -> Vec<RuleBox> {
        self.warn_unknown(config);

        let mut rules = Vec::new();
        for entry in &self.entries {
            let identifier = entry.description.identifier;
            if !config.is_rule_enabled(identifier, entry.opt_in) {
                debug!("Skipping disabled rule: {identifier}");
                continue;
            }

            let rule = match (config.rule_config(identifier), entry.from_config) {
                (Some(value), Some(from_config)) => {
                    let rule = from_config(value);
                    if rule.is_none() {
                        warn!("Invalid configuration for rule '{identifier}'; rule disabled");
                    }
                    rule
                }
                (Some(_), None) => {
                    warn!("Rule '{identifier}' is not configurable; ignoring its configuration");
                    Some((entry.build)())
                }
                (None, _) => Some((entry.build)()),
            };
            rules.extend(rule);
        }
        rules
    }

    fn warn_unknown(&self, config: &Config) {
        let named: BTreeSet<&str> = config
            .disabled_rules
            .iter()
            .chain(&config.opt_in_rules)
            .chain(config.only_rules.iter().flatten())
            .map(String::as_str)
            .chain(config.rules.keys().map(String::as_str))
            .chain(config.severity.keys().map(String::as_str))
            .collect();

        for identifier in named {
            if !self.contains(identifier) {
                warn!("Configuration references unknown rule '{identifier}'");
            }
        }
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| e.description.identifier))
            .finish()
    }
}
