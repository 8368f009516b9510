//! Typed, severity-tagged rule parameters decoded from configuration.

use crate::types::Severity;
use serde::Serialize;

/// Severities assigned to decoded parameters, in order.
///
/// The first configured value is the warning threshold, every later value
/// is an error threshold.
pub const SEVERITY_LADDER: &[Severity] = &[Severity::Warning, Severity::Error];

/// A single configured value of a parameterized rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleParameter<T> {
    /// Severity of violations produced when this parameter is exceeded.
    pub severity: Severity,
    /// The configured value.
    pub value: T,
}

impl<T: ParameterType> RuleParameter<T> {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(severity: Severity, value: T) -> Self {
        Self { severity, value }
    }

    /// Wraps each value as a parameter, assigning severities in ascending order.
    #[must_use]
    pub fn from_values(values: Vec<T>) -> Vec<Self> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let severity = SEVERITY_LADDER.get(i).copied().unwrap_or(Severity::Error);
                Self::new(severity, value)
            })
            .collect()
    }
}

/// Element types a parameterized rule may be configured with.
///
/// The set is closed: decoding goes through [`ParameterType::from_value`]
/// rather than reflection, and a value of the wrong shape decodes to `None`.
pub trait ParameterType: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Decodes a single configuration value.
    fn from_value(value: &toml::Value) -> Option<Self>;

    /// Decodes a configuration value as an array of `Self`.
    ///
    /// Returns `None` if the value is not an array or any element fails to
    /// decode.
    fn array_of(value: &toml::Value) -> Option<Vec<Self>> {
        value.as_array()?.iter().map(Self::from_value).collect()
    }
}

impl ParameterType for i64 {
    fn from_value(value: &toml::Value) -> Option<Self> {
        value.as_integer()
    }
}

impl ParameterType for usize {
    fn from_value(value: &toml::Value) -> Option<Self> {
        value.as_integer().and_then(|n| usize::try_from(n).ok())
    }
}

impl ParameterType for f64 {
    fn from_value(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Float(f) => Some(*f),
            #[allow(clippy::cast_precision_loss)]
            toml::Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl ParameterType for bool {
    fn from_value(value: &toml::Value) -> Option<Self> {
        value.as_bool()
    }
}

impl ParameterType for String {
    fn from_value(value: &toml::Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}
