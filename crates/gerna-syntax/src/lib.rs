//! Failure diagnosis and tree simplification for dialect grammars.
//!
//! This crate sits between grammar engines and their consumers. When an
//! engine rejects a text, it reduces the engine's failure tree to a single
//! [`Diagnostic`] naming what was expected at the deepest failed word. When
//! an engine accepts, it offers passes that turn the concrete syntax tree
//! into something readable.
//!
//! # Core types
//!
//! - [`DialectRegistry`] and [`Dialect`]: named engines and their metadata
//! - [`parse`]: run a dialect and diagnose its rejections
//! - [`Diagnostic`], [`Loc`] and [`ParseError`]: error reporting
//! - [`analyze_raw`] and [`analyze_words`]: failure tree ranking
//! - [`simplify`] and [`SimplifyOptions`]: tree rewriting
//!
//! # Example
//!
//! ```
//! use gerna_syntax::{DialectRegistry, ParseError};
//!
//! let registry = DialectRegistry::new();
//! let err = registry.parse("camxes", "mi klama").unwrap_err();
//! assert!(matches!(err, ParseError::UnknownDialect { .. }));
//! ```

mod analysis;
mod classify;
mod config;
mod dialect;
mod error;
mod parse;
mod position;
mod simplify;

pub use analysis::{
    Candidate, FailureReport, aggregate_words, analyze_raw, analyze_words, collect_leaves,
    deepest_word_position,
};
pub use classify::{
    RuleTagged, WORD_TAG_ALPHABET, failure_label, is_named_error, is_word, is_word_name,
    pretty_name,
};
pub use config::SimplifyOptions;
pub use dialect::{Dialect, DialectRegistry, EngineFactory};
pub use error::{Diagnostic, ParseError};
pub use parse::{drive, parse};
pub use position::{Loc, LocCursor, locate, locate_failures};
pub use simplify::{
    ELIDED_SUFFIX, SPACE_CHARS, add_elided_terminators, collapse_chains, is_space,
    prune_whitespace, simplify, truncate_words,
};

#[cfg(test)]
mod tests;
