//! Error types reported by parses.
//!
//! A rejected parse yields a [`Diagnostic`]: a location and the list of
//! things the grammar would have accepted there. Everything else that can go
//! wrong before or around the engine is a [`ParseError`].

use gerna_peg::GrammarError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::Loc;

/// A positioned syntax error.
///
/// The message has the form `{file_path}:{line}.{column}: expected ...`.
/// A single expectation renders after `": "`, so the message reads
/// `expected : X`; several render after `"one of: "` with `"or "` before the
/// last one.
///
/// # Example
///
/// ```
/// use gerna_syntax::{Diagnostic, Loc};
///
/// let diag = Diagnostic::new(Loc::START, vec!["BRIVLA".into(), "sumti".into()])
///     .with_file_path("jufra.txt");
/// assert_eq!(diag.to_string(), "jufra.txt:1.1: expected one of: BRIVLA, or sumti");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{}", render(self))]
pub struct Diagnostic {
    /// Where the parse could not continue.
    loc: Loc,
    /// Caller-supplied source name, empty unless set.
    file_path: String,
    /// Ranked descriptions of what would have been accepted.
    expected: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with an empty file path.
    #[must_use]
    pub const fn new(loc: Loc, expected: Vec<String>) -> Self {
        Self {
            loc,
            file_path: String::new(),
            expected,
        }
    }

    /// Sets the source name printed before the location.
    #[must_use]
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }

    /// Returns the error location.
    #[must_use]
    pub const fn loc(&self) -> Loc {
        self.loc
    }

    /// Returns the source name.
    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Returns the expectations in rank order.
    #[must_use]
    pub fn expected(&self) -> &[String] {
        &self.expected
    }
}

fn render(diag: &Diagnostic) -> String {
    let mut joined = String::new();
    let last = diag.expected.len().saturating_sub(1);
    for (i, want) in diag.expected.iter().enumerate() {
        if !joined.is_empty() {
            joined.push_str(", ");
        }
        if i > 0 && i == last {
            joined.push_str("or ");
        }
        joined.push_str(want);
    }
    let prefix = if diag.expected.len() > 1 {
        "one of: "
    } else {
        ": "
    };
    format!(
        "{}:{}.{}: expected {prefix}{joined}",
        diag.file_path, diag.loc.line, diag.loc.column
    )
}

/// Errors returned by [`parse`](crate::parse).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// No dialect is registered under the requested name.
    #[error("unknown dialect: {name}")]
    UnknownDialect {
        /// The requested dialect name.
        name: String,
    },

    /// The text is not accepted by the dialect.
    #[error(transparent)]
    Syntax(#[from] Diagnostic),

    /// The dialect's grammar could not be compiled.
    #[error("dialect '{dialect}' has an invalid grammar: {source}")]
    Grammar {
        /// The dialect name.
        dialect: String,
        /// The compilation failure.
        #[source]
        source: GrammarError,
    },

    /// The engine broke its contract with the diagnosis layer.
    #[error("dialect '{dialect}' engine misbehaved: {message}")]
    EngineContract {
        /// The dialect name.
        dialect: String,
        /// What the engine did wrong.
        message: String,
    },
}

impl ParseError {
    /// Creates an unknown dialect error.
    #[must_use]
    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Self::UnknownDialect { name: name.into() }
    }

    /// Creates a grammar error for `dialect`.
    #[must_use]
    pub fn grammar(dialect: impl Into<String>, source: GrammarError) -> Self {
        Self::Grammar {
            dialect: dialect.into(),
            source,
        }
    }

    /// Creates an engine contract error for `dialect`.
    #[must_use]
    pub fn engine_contract(dialect: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EngineContract {
            dialect: dialect.into(),
            message: message.into(),
        }
    }

    /// Returns the syntax diagnostic, if this is a syntax error.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Syntax(diag) => Some(diag),
            _ => None,
        }
    }
}
