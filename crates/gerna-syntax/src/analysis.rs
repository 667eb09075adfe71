//! Failure tree analysis.
//!
//! A rejected parse leaves behind every alternative the engine tried. Most of
//! them are noise: backtracking explores many branches that fail early, and
//! memoized rules show up under several parents. The analysis keeps only the
//! failures at the most advanced position and ranks them so that anonymous
//! expectations come before labels declared by the grammar.
//!
//! Two modes exist:
//!
//! - [`analyze_raw`] reports individual terminal failures, which reads like
//!   morphology ("expected one of: [aeiou], ...").
//! - [`analyze_words`] aggregates failures up to the word or phrase that
//!   owns them and anchors the report at the start of the deepest failed
//!   word.

use std::collections::{HashMap, HashSet};

use gerna_peg::{FailId, FailTree, FailureNode};

use crate::classify::{failure_label, is_named_error, is_word, pretty_name};
use crate::error::Diagnostic;
use crate::position::{locate, reachable};

/// A failure retained by the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    id: FailId,
    position: usize,
    label: String,
    named: bool,
}

impl Candidate {
    fn new(id: FailId, node: &FailureNode) -> Self {
        Self {
            id,
            position: node.position(),
            label: failure_label(node).into_owned(),
            named: is_named_error(node.description()),
        }
    }

    /// Returns the originating node.
    #[must_use]
    pub const fn id(&self) -> FailId {
        self.id
    }

    /// Returns the byte offset of the originating node.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the human-facing label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` when the label was declared by the grammar.
    #[must_use]
    pub const fn is_named(&self) -> bool {
        self.named
    }
}

/// The ranked outcome of analysing a failure tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    position: usize,
    candidates: Vec<Candidate>,
}

impl FailureReport {
    /// Returns the byte offset the report is anchored at.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the retained failures in rank order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Returns the ranked labels, each at its first occurrence.
    #[must_use]
    pub fn expected(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.candidates
            .iter()
            .filter(|candidate| seen.insert(candidate.label.as_str()))
            .map(|candidate| candidate.label.clone())
            .collect()
    }

    /// Resolves the report against `text`.
    #[must_use]
    pub fn into_diagnostic(self, text: &str) -> Diagnostic {
        let expected = self.expected();
        Diagnostic::new(locate(text, self.position), expected)
    }
}

/// Orders candidates: anonymous before named, then by label.
fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        a.named
            .cmp(&b.named)
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn candidates_at(tree: &FailTree, ids: &[FailId], position: usize) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = ids
        .iter()
        .filter_map(|&id| tree.get(id).map(|node| (id, node)))
        .filter(|(_, node)| node.position() == position)
        .map(|(id, node)| Candidate::new(id, node))
        .collect();
    rank(&mut candidates);
    candidates
}

/// Returns every distinct leaf that is not a failed lookahead.
#[must_use]
pub fn collect_leaves(tree: &FailTree) -> Vec<FailId> {
    reachable(tree)
        .into_iter()
        .filter(|&id| {
            tree.get(id).is_some_and(|node| {
                node.is_leaf() && !node.description().starts_with(['&', '!'])
            })
        })
        .collect()
}

/// Reports the terminal failures at the furthest position.
///
/// A tree without any usable leaf yields an empty report anchored at the
/// start of the text.
#[must_use]
pub fn analyze_raw(tree: &FailTree) -> FailureReport {
    let leaves = collect_leaves(tree);
    let position = leaves
        .iter()
        .filter_map(|&id| tree.get(id))
        .map(FailureNode::position)
        .max()
        .unwrap_or(0);
    FailureReport {
        position,
        candidates: candidates_at(tree, &leaves, position),
    }
}

/// Returns the furthest position at which a word node failed.
#[must_use]
pub fn deepest_word_position(tree: &FailTree) -> Option<usize> {
    reachable(tree)
        .into_iter()
        .filter_map(|id| tree.get(id))
        .filter(|node| is_word(*node))
        .map(FailureNode::position)
        .max()
}

/// Returns the nodes that speak for their subtrees.
///
/// Walking down from the root, a leaf stands for itself, and so does a word
/// node or a node with a pretty name whose failures reach no further than
/// its own position. Other nodes defer to their children.
#[must_use]
pub fn aggregate_words(tree: &FailTree) -> Vec<FailId> {
    let mut reach = HashMap::new();
    let mut seen = HashSet::new();
    let mut aggregated = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let Some(node) = tree.get(id) else {
            continue;
        };
        if node.is_leaf() || stands_alone(tree, id, node, &mut reach) {
            aggregated.push(id);
        } else {
            stack.extend(node.children().iter().rev());
        }
    }
    aggregated
}

fn stands_alone(
    tree: &FailTree,
    id: FailId,
    node: &FailureNode,
    reach: &mut HashMap<FailId, usize>,
) -> bool {
    is_word(node)
        || (pretty_name(node.name()).is_some() && reach_of(tree, id, reach) == node.position())
}

/// Returns how far the failures reported by a node extend.
///
/// A node that stands for itself reaches its own position; otherwise the
/// reach is the furthest of its own position and its children's reaches.
fn reach_of(tree: &FailTree, id: FailId, reach: &mut HashMap<FailId, usize>) -> usize {
    if let Some(&known) = reach.get(&id) {
        return known;
    }
    let Some(node) = tree.get(id) else {
        return 0;
    };
    let mut furthest = node.position();
    if !node.is_leaf() {
        for &child in node.children() {
            furthest = furthest.max(reach_of(tree, child, reach));
        }
        if is_word(node) || (pretty_name(node.name()).is_some() && furthest == node.position()) {
            furthest = node.position();
        }
    }
    reach.insert(id, furthest);
    furthest
}

/// Reports the aggregated failures at the deepest failed word.
///
/// Returns `None` when no word node failed anywhere in the tree.
#[must_use]
pub fn analyze_words(tree: &FailTree) -> Option<FailureReport> {
    let position = deepest_word_position(tree)?;
    let aggregated = aggregate_words(tree);
    Some(FailureReport {
        position,
        candidates: candidates_at(tree, &aggregated, position),
    })
}
