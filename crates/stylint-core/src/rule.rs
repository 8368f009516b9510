//! Rule capability traits and rule equality.
//!
//! A rule implements [`Rule`] plus any combination of the capability traits
//! [`OptInRule`], [`ConfigurableRule`], [`ParameterizedRule`], and
//! [`CorrectableRule`]. Since a driver iterates a heterogeneous list of
//! boxed rules, each capability is also reachable at runtime through the
//! `as_*` queries on [`Rule`].

use crate::correction::CorrectionError;
use crate::description::RuleDescription;
use crate::parameter::{ParameterType, RuleParameter};
use crate::source::SourceFile;
use crate::types::{Correction, Violation};
use std::any::Any;

/// Access to a value as [`Any`] for downcasting.
///
/// Implemented for every `'static` type; rule authors never implement it.
pub trait AsAny {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A style rule that validates source units.
///
/// Rules are immutable after construction and may be shared across threads.
/// Default construction is required at registration time
/// (see [`RuleRegistry`](crate::RuleRegistry)), not by this trait, so that
/// it stays usable as `dyn Rule`.
///
/// # Example
///
/// ```ignore
/// use stylint_core::{Location, Rule, RuleDescription, SourceFile, Violation};
///
/// pub static DESCRIPTION: RuleDescription =
///     RuleDescription::new("no_tabs", "No Tabs", "Indent with spaces");
///
/// #[derive(Debug, Default)]
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn description(&self) -> &'static RuleDescription {
///         &DESCRIPTION
///     }
///
///     fn validate(&self, file: &SourceFile) -> Vec<Violation> {
///         file.contents()
///             .match_indices('\t')
///             .map(|(offset, _)| Violation::new(&DESCRIPTION, Location::new(file, offset)))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: AsAny + Send + Sync {
    /// Returns the description shared by every instance of this rule type.
    fn description(&self) -> &'static RuleDescription;

    /// Checks a source unit and returns any violations found.
    fn validate(&self, file: &SourceFile) -> Vec<Violation>;

    /// Returns this rule as an opt-in rule, if it is one.
    fn as_opt_in(&self) -> Option<&dyn OptInRule> {
        None
    }

    /// Returns this rule as a configurable rule, if it is one.
    fn as_configurable(&self) -> Option<&dyn ConfigurableRule> {
        None
    }

    /// Returns this rule as a correctable rule, if it is one.
    fn as_correctable(&self) -> Option<&dyn CorrectableRule> {
        None
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Marker for rules excluded from default rule sets.
///
/// An opt-in rule only runs when the configuration lists it explicitly.
/// Implementors also override [`Rule::as_opt_in`] to return `Some(self)`.
pub trait OptInRule: Rule {}

/// A rule constructible from an untyped configuration value.
///
/// Implementors also override [`Rule::as_configurable`] to return `Some(self)`.
pub trait ConfigurableRule: Rule {
    /// Builds the rule from a configuration value.
    ///
    /// Returns `None` if the value has the wrong shape; the caller treats
    /// that as the rule being rejected.
    fn from_config(config: &toml::Value) -> Option<Self>
    where
        Self: Sized;

    /// Compares configuration with another configurable rule.
    fn equals_configurable(&self, other: &dyn ConfigurableRule) -> bool;
}

/// A configurable rule backed by an ordered list of typed parameters.
///
/// Every parameterized rule is a [`ConfigurableRule`]: the configuration
/// value is decoded as an array of [`Self::Parameter`], and two rules are
/// equal when they are the same type with element-wise equal parameters.
pub trait ParameterizedRule: Rule + Sized + 'static {
    /// Element type of the parameter list.
    type Parameter: ParameterType;

    /// Builds the rule from decoded parameters.
    fn with_parameters(parameters: Vec<RuleParameter<Self::Parameter>>) -> Self;

    /// Returns the rule's parameters, in configuration order.
    fn parameters(&self) -> &[RuleParameter<Self::Parameter>];
}

impl<R: ParameterizedRule> ConfigurableRule for R {
    fn from_config(config: &toml::Value) -> Option<Self> {
        let values = R::Parameter::array_of(config)?;
        Some(Self::with_parameters(RuleParameter::from_values(values)))
    }

    fn equals_configurable(&self, other: &dyn ConfigurableRule) -> bool {
        other
            .as_any()
            .downcast_ref::<R>()
            .is_some_and(|other| self.parameters() == other.parameters())
    }
}

/// A rule that can rewrite source text to fix its violations.
///
/// Implementors also override [`Rule::as_correctable`] to return `Some(self)`.
pub trait CorrectableRule: Rule {
    /// Rewrites the source unit and returns the corrections performed.
    ///
    /// When corrections are produced the file's contents are replaced and,
    /// if the file has a path, persisted.
    ///
    /// # Errors
    ///
    /// Returns [`CorrectionError::Persist`] if the rewritten contents could
    /// not be written back; the in-memory contents are already updated.
    fn correct(&self, file: &mut SourceFile) -> Result<Vec<Correction>, CorrectionError>;
}

/// Compares two rules.
///
/// Two configurable rules compare by configuration. Otherwise rules are equal
/// when their descriptions share an identifier, so two instances of the same
/// unconfigurable rule type are always equal.
#[must_use]
pub fn rules_equal(a: &dyn Rule, b: &dyn Rule) -> bool {
    match (a.as_configurable(), b.as_configurable()) {
        (Some(a), Some(b)) => a.equals_configurable(b),
        _ => a.description().identifier == b.description().identifier,
    }
}

/// Compares two rule lists pairwise, in order.
#[must_use]
pub fn rule_lists_equal(a: &[RuleBox], b: &[RuleBox]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| rules_equal(&**a, &**b))
}

impl PartialEq for dyn Rule {
    fn eq(&self, other: &Self) -> bool {
        rules_equal(self, other)
    }
}

impl std::fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Rule")
            .field(&self.description().identifier)
            .finish()
    }
}
