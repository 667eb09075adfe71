//! Grammar engine substrate for the `gerna` parsing toolkit.
//!
//! This crate defines what a dialect engine looks like from the outside and
//! provides one interpreter that satisfies it:
//!
//! - [`GrammarEngine`] is the capability the diagnosis layer consumes:
//!   recognize a text, then hand back either a [`SyntaxNode`] tree or a
//!   [`FailTree`] of everything that failed beyond a given position.
//! - [`GrammarBuilder`] and the [`dsl`] functions describe parsing
//!   expression grammars with optional per-rule error labels.
//! - [`PegEngine`] interprets a compiled [`Grammar`] with packrat
//!   memoization.
//!
//! # Example
//!
//! ```
//! use gerna_peg::dsl::{class, lit, plus, rule, seq};
//! use gerna_peg::{GrammarBuilder, GrammarEngine, PegEngine};
//!
//! let grammar = GrammarBuilder::new("cmene")
//!     .rule("cmene", seq([lit("la "), plus(rule("letter"))]))
//!     .rule("letter", class("abcdefgijklmnoprstuvxyz"))
//!     .build()?;
//! let mut engine = PegEngine::new(&grammar, "la djan");
//! assert!(engine.attempt().accepted);
//! assert_eq!(engine.success_tree().map(|tree| tree.text), Some("la djan".to_owned()));
//! # Ok::<(), gerna_peg::GrammarError>(())
//! ```

pub mod dsl;
mod engine;
mod error;
mod fail;
mod grammar;
mod machine;
mod node;

pub use engine::{Attempt, GrammarEngine};
pub use error::GrammarError;
pub use fail::{FailArena, FailId, FailTree, FailureNode};
pub use grammar::{CharClass, Expr, Grammar, GrammarBuilder, Rule};
pub use machine::PegEngine;
pub use node::SyntaxNode;

#[cfg(test)]
mod tests;
