//! # stylint-core
//!
//! Core framework for style linting of Swift source text.
//!
//! This crate provides the foundational traits and types for building
//! style rules. It includes:
//!
//! - [`Rule`] and its capability traits ([`OptInRule`], [`ConfigurableRule`],
//!   [`ParameterizedRule`], [`CorrectableRule`])
//! - [`RuleDescription`] for rule metadata and documentation examples
//! - [`SourceFile`] and the [`Tokenizer`] that classifies its syntax
//! - [`apply_corrections`] for pattern-driven rewriting
//! - [`RuleRegistry`] and [`Linter`] for running rules over a project
//!
//! ## Example
//!
//! ```ignore
//! use stylint_core::{Config, Linter};
//!
//! let config = Config::from_file("stylint.toml".as_ref())?;
//! let linter = Linter::builder()
//!     .root("./Sources")
//!     .rules(registry.configured_rules(&config))
//!     .config(config)
//!     .build()?;
//!
//! let result = linter.lint()?;
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod correction;
mod description;
mod linter;
mod parameter;
mod registry;
mod rule;
mod source;
mod syntax;
mod types;

pub use config::{AnalyzerConfig, Config, ConfigError};
pub use correction::{apply_corrections, CorrectionError, CorrectionResult};
pub use description::RuleDescription;
pub use linter::{Linter, LinterBuilder, LinterError};
pub use parameter::{ParameterType, RuleParameter, SEVERITY_LADDER};
pub use registry::RuleRegistry;
pub use rule::{
    rule_lists_equal, rules_equal, AsAny, ConfigurableRule, CorrectableRule, OptInRule,
    ParameterizedRule, Rule, RuleBox,
};
pub use source::{Line, SourceError, SourceFile};
pub use syntax::{BasicTokenizer, SyntaxKind, SyntaxMatch, SyntaxToken, Tokenizer};
pub use types::{
    Correction, CorrectionReport, LintResult, Location, PersistFailure, Severity, Violation,
    ViolationDiagnostic,
};
