//! Error types for grammar construction.
//!
//! Grammars are assembled from named rules and compiled once. Compilation
//! resolves every rule reference, so a grammar that builds successfully can
//! never refer to a rule it does not define.

use thiserror::Error;

/// Errors raised while compiling a [`Grammar`](crate::Grammar).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GrammarError {
    /// A rule body refers to a rule that was never defined.
    #[error("rule '{referenced_by}' refers to undefined rule '{rule}'")]
    UndefinedRule {
        /// The missing rule name.
        rule: String,
        /// The rule whose body contains the reference.
        referenced_by: String,
    },

    /// Two rules share the same name.
    #[error("rule '{name}' is defined more than once")]
    DuplicateRule {
        /// The duplicated rule name.
        name: String,
    },

    /// The configured start rule is not defined.
    #[error("start rule '{name}' is not defined")]
    UnknownStartRule {
        /// The missing start rule name.
        name: String,
    },
}

impl GrammarError {
    /// Creates an undefined rule error.
    #[must_use]
    pub fn undefined_rule(rule: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::UndefinedRule {
            rule: rule.into(),
            referenced_by: referenced_by.into(),
        }
    }

    /// Creates a duplicate rule error.
    #[must_use]
    pub fn duplicate_rule(name: impl Into<String>) -> Self {
        Self::DuplicateRule { name: name.into() }
    }

    /// Creates an unknown start rule error.
    #[must_use]
    pub fn unknown_start_rule(name: impl Into<String>) -> Self {
        Self::UnknownStartRule { name: name.into() }
    }
}
