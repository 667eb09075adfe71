//! Packrat interpreter for compiled grammars.
//!
//! [`PegEngine`] binds a [`Grammar`] to one input text and implements
//! [`GrammarEngine`] with three independent passes over the same grammar:
//!
//! - recognition, which only tracks the furthest terminal failure;
//! - failure collection, which records every failure at or beyond a
//!   threshold into a [`FailTree`];
//! - tree building, which produces the [`SyntaxNode`] of an accepted text.
//!
//! Each pass memoizes rule results per input position, so a rule is
//! evaluated at most once per position and shared failure nodes appear under
//! every parent that invoked the rule there.

mod builder;
mod failures;
mod recognizer;

use tracing::debug;

use crate::engine::{Attempt, GrammarEngine};
use crate::fail::FailTree;
use crate::grammar::Grammar;
use crate::node::SyntaxNode;

/// Tracing target for engine operations.
const ENGINE_TARGET: &str = "gerna_peg::engine";

/// Returns the character starting at byte offset `pos`.
fn next_char(text: &str, pos: usize) -> Option<char> {
    text.get(pos..).and_then(|rest| rest.chars().next())
}

/// A [`GrammarEngine`] interpreting a compiled [`Grammar`].
///
/// # Example
///
/// ```
/// use gerna_peg::dsl::{lit, plus};
/// use gerna_peg::{GrammarBuilder, GrammarEngine, PegEngine};
///
/// let grammar = GrammarBuilder::new("laughs").rule("laughs", plus(lit("ha"))).build()?;
/// let mut engine = PegEngine::new(&grammar, "hahaha");
/// assert!(engine.attempt().accepted);
/// # Ok::<(), gerna_peg::GrammarError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PegEngine<'g> {
    grammar: &'g Grammar,
    text: String,
}

impl<'g> PegEngine<'g> {
    /// Binds `grammar` to `text`.
    #[must_use]
    pub fn new(grammar: &'g Grammar, text: impl Into<String>) -> Self {
        Self {
            grammar,
            text: text.into(),
        }
    }

    /// Returns the bound input text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the grammar driving this engine.
    #[must_use]
    pub const fn grammar(&self) -> &'g Grammar {
        self.grammar
    }
}

impl GrammarEngine for PegEngine<'_> {
    fn attempt(&mut self) -> Attempt {
        let attempt = recognizer::recognize(self.grammar, &self.text);
        debug!(
            target: ENGINE_TARGET,
            start = self.grammar.start_rule(),
            accepted = attempt.accepted,
            position = attempt.position,
            "recognition finished"
        );
        attempt
    }

    fn failure_tree(&mut self, min_position: usize) -> FailTree {
        let tree = failures::collect(self.grammar, &self.text, min_position);
        debug!(
            target: ENGINE_TARGET,
            min_position,
            nodes = tree.len(),
            "failure tree collected"
        );
        tree
    }

    fn success_tree(&mut self) -> Option<SyntaxNode> {
        builder::build(self.grammar, &self.text)
    }
}
