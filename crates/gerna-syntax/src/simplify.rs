//! Rewrites turning a concrete syntax tree into a readable one.
//!
//! Each pass mutates the tree in place and can be used on its own.
//! [`simplify`] chains them in the order that keeps every pass meaningful:
//! terminators must be materialized before whitespace pruning, otherwise
//! their empty text would get them removed.

use std::mem;

use gerna_peg::SyntaxNode;

use crate::classify::is_word;
use crate::config::SimplifyOptions;

/// Characters treated as whitespace between words.
pub const SPACE_CHARS: &str = ".\t\n\r?! ";

/// Rule name suffix marking a terminator the grammar lets writers omit.
pub const ELIDED_SUFFIX: &str = "_elidible";

/// Rule whose children are the raw characters of a quotation.
const QUOTED_WORD: &str = "zoi_word";

/// Returns `true` when `text` holds nothing but [`SPACE_CHARS`].
///
/// The empty string counts as whitespace.
#[must_use]
pub fn is_space(text: &str) -> bool {
    text.chars().all(|c| SPACE_CHARS.contains(c))
}

/// Drops whitespace-only nodes and interior nodes left without children.
///
/// The root itself always stays; only its descendants are pruned.
pub fn prune_whitespace(root: &mut SyntaxNode) {
    root.children.retain_mut(prune);
}

fn prune(node: &mut SyntaxNode) -> bool {
    if is_space(&node.text) {
        return false;
    }
    if node.is_leaf() {
        return true;
    }
    node.children.retain_mut(prune);
    !node.children.is_empty()
}

/// Gives every omitted terminator a leaf named after it.
///
/// A node with empty text named `KU_elidible` becomes a childless node with
/// text `KU`.
pub fn add_elided_terminators(node: &mut SyntaxNode) {
    if node.text.is_empty() {
        if let Some(stem) = node.name.strip_suffix(ELIDED_SUFFIX) {
            node.text = stem.to_uppercase();
            node.children.clear();
            return;
        }
    }
    for child in &mut node.children {
        add_elided_terminators(child);
    }
}

/// Replaces every chain of single-child nodes by its last link.
///
/// The root adopts the children of its only child when that child is
/// interior; a lone leaf under the root is kept so no text is lost.
pub fn collapse_chains(root: &mut SyntaxNode) {
    collapse(root);
    let lifted = match root.children.as_mut_slice() {
        [only] if !only.is_leaf() => Some(mem::take(&mut only.children)),
        _ => None,
    };
    if let Some(children) = lifted {
        root.children = children;
    }
}

fn collapse(node: &mut SyntaxNode) {
    for child in &mut node.children {
        collapse(child);
        if child.children.len() == 1 {
            if let Some(grandchild) = child.children.pop() {
                *child = grandchild;
            }
        }
    }
}

/// Removes the morphology below word nodes and quoted words.
pub fn truncate_words(node: &mut SyntaxNode) {
    if is_word(node) || node.name == QUOTED_WORD {
        node.children.clear();
        return;
    }
    for child in &mut node.children {
        truncate_words(child);
    }
}

/// Applies the simplification passes selected by `options`.
///
/// Words are truncated unless morphology is kept, elided terminators are
/// added when requested, then whitespace is pruned and chains collapsed.
pub fn simplify(root: &mut SyntaxNode, options: &SimplifyOptions) {
    if !options.keep_morphology() {
        truncate_words(root);
    }
    if options.add_elided_terminators() {
        add_elided_terminators(root);
    }
    prune_whitespace(root);
    collapse_chains(root);
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    fn node(name: &str, text: &str, children: Vec<SyntaxNode>) -> SyntaxNode {
        SyntaxNode::new(name, text, children)
    }

    fn leaf(name: &str, text: &str) -> SyntaxNode {
        SyntaxNode::leaf(name, text)
    }

    /// Tree for "lo mlatu", shaped like a packrat engine would build it.
    #[fixture]
    fn lo_mlatu() -> SyntaxNode {
        node(
            "text",
            "lo mlatu",
            vec![node(
                "paragraph",
                "lo mlatu",
                vec![node(
                    "sumti",
                    "lo mlatu",
                    vec![
                        node(
                            "LE_clause",
                            "lo ",
                            vec![
                                node("LE", "lo", vec![leaf("", "l"), leaf("", "o")]),
                                node("spaces", " ", vec![leaf("", " ")]),
                            ],
                        ),
                        node(
                            "BRIVLA",
                            "mlatu",
                            vec![node("gismu", "mlatu", vec![leaf("", "mla"), leaf("", "tu")])],
                        ),
                        node("KU_elidible", "", vec![]),
                    ],
                )],
            )],
        )
    }

    fn leaf_texts(tree: &SyntaxNode) -> Vec<String> {
        tree.leaves().iter().map(|n| n.text.clone()).collect()
    }

    #[rstest]
    #[case::empty("", true)]
    #[case::separators(". ?!\t\r\n", true)]
    #[case::word(" mi ", false)]
    fn whitespace_detection(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_space(text), expected);
    }

    #[rstest]
    fn prune_drops_spaces_and_empty_nodes(mut lo_mlatu: SyntaxNode) {
        prune_whitespace(&mut lo_mlatu);
        assert_eq!(leaf_texts(&lo_mlatu), ["l", "o", "mla", "tu"]);
    }

    #[test]
    fn prune_keeps_a_whitespace_root() {
        let mut tree = node("text", " ", vec![leaf("spaces", " ")]);
        prune_whitespace(&mut tree);
        assert_eq!(tree.name, "text");
        assert!(tree.children.is_empty());
    }

    #[rstest]
    fn elided_terminators_survive_pruning(mut lo_mlatu: SyntaxNode) {
        add_elided_terminators(&mut lo_mlatu);
        prune_whitespace(&mut lo_mlatu);
        assert_eq!(leaf_texts(&lo_mlatu), ["l", "o", "mla", "tu", "KU"]);
    }

    #[test]
    fn terminators_with_text_are_left_alone() {
        let mut tree = node("KU_elidible", "ku", vec![leaf("KU", "ku")]);
        add_elided_terminators(&mut tree);
        assert_eq!(tree.text, "ku");
        assert_eq!(tree.children.len(), 1);
    }

    #[rstest]
    fn truncate_keeps_word_text(mut lo_mlatu: SyntaxNode) {
        truncate_words(&mut lo_mlatu);
        prune_whitespace(&mut lo_mlatu);
        assert_eq!(leaf_texts(&lo_mlatu), ["lo", "mlatu"]);
    }

    #[test]
    fn truncate_clears_quoted_words() {
        let mut tree = node("zoi_word", ".abc.", vec![leaf("", "."), leaf("", "abc")]);
        truncate_words(&mut tree);
        assert!(tree.is_leaf());
        assert_eq!(tree.text, ".abc.");
    }

    #[rstest]
    fn collapse_preserves_leaf_texts(mut lo_mlatu: SyntaxNode) {
        let before = leaf_texts(&lo_mlatu);
        collapse_chains(&mut lo_mlatu);
        assert_eq!(leaf_texts(&lo_mlatu), before);
    }

    #[rstest]
    fn collapse_lifts_chains_to_the_root(mut lo_mlatu: SyntaxNode) {
        truncate_words(&mut lo_mlatu);
        prune_whitespace(&mut lo_mlatu);
        collapse_chains(&mut lo_mlatu);
        let names: Vec<&str> = lo_mlatu.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["LE", "BRIVLA"]);
    }

    #[test]
    fn collapse_keeps_a_lone_leaf_under_the_root() {
        let mut tree = node("text", "mi", vec![node("sumti", "mi", vec![leaf("KOhA", "mi")])]);
        collapse_chains(&mut tree);
        assert_eq!(leaf_texts(&tree), ["mi"]);
        assert_eq!(tree.children.len(), 1);
    }

    #[rstest]
    #[case::defaults(SimplifyOptions::default())]
    #[case::terminators(SimplifyOptions::default().with_add_elided_terminators(true))]
    #[case::morphology(SimplifyOptions::default().with_keep_morphology(true))]
    #[case::everything(SimplifyOptions::new(true, true))]
    fn simplify_is_idempotent(lo_mlatu: SyntaxNode, #[case] options: SimplifyOptions) {
        let mut once = lo_mlatu;
        simplify(&mut once, &options);
        let mut twice = once.clone();
        simplify(&mut twice, &options);
        assert_eq!(once, twice);
    }

    #[rstest]
    fn simplify_with_terminators_renders_flat(mut lo_mlatu: SyntaxNode) {
        simplify(
            &mut lo_mlatu,
            &SimplifyOptions::default().with_add_elided_terminators(true),
        );
        let flat: Vec<String> = lo_mlatu
            .children
            .iter()
            .map(|n| format!("{}={}", n.name, n.text))
            .collect();
        insta::assert_snapshot!(flat.join(" "), @"LE=lo BRIVLA=mlatu KU_elidible=KU");
    }
}
