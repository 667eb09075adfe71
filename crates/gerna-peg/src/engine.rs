//! The capability every dialect engine exposes to the diagnosis layer.

use crate::fail::FailTree;
use crate::node::SyntaxNode;

/// Outcome of a recognition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// The furthest byte offset at which any terminal failed.
    pub position: usize,
    /// Whether the text was accepted.
    pub accepted: bool,
}

/// A grammar engine bound to one input text.
///
/// Engines are created per parse. The diagnosis layer calls
/// [`attempt`](Self::attempt) first, then either
/// [`success_tree`](Self::success_tree) on acceptance or
/// [`failure_tree`](Self::failure_tree), possibly several times with
/// different thresholds, on rejection.
pub trait GrammarEngine {
    /// Recognizes the bound text.
    fn attempt(&mut self) -> Attempt;

    /// Returns every failure recorded at or beyond `min_position`.
    ///
    /// Only meaningful after a rejected [`attempt`](Self::attempt).
    fn failure_tree(&mut self, min_position: usize) -> FailTree;

    /// Returns the concrete syntax tree, or `None` when the text is not
    /// accepted.
    fn success_tree(&mut self) -> Option<SyntaxNode>;
}
