//! Byte offset to line and column conversion.
//!
//! Locations are always derived by scanning forward from the start of the
//! text. Converting many offsets at once sorts them first so the text is
//! scanned a single time.

use std::collections::BTreeMap;

use gerna_peg::{FailId, FailTree};
use serde::{Deserialize, Serialize};

/// A position in source text.
///
/// `line` and `column` are one-based; `column` counts code points since the
/// last newline.
///
/// # Example
///
/// ```
/// use gerna_syntax::locate;
///
/// let loc = locate("coi\nrodo", 6);
/// assert_eq!((loc.line, loc.column), (2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Loc {
    /// Byte offset from the start of the text.
    pub byte: usize,
    /// Code point offset from the start of the text.
    pub rune: usize,
    /// One-based line number.
    pub line: usize,
    /// One-based column, in code points.
    pub column: usize,
}

impl Loc {
    /// The location of the first byte of any text.
    pub const START: Self = Self {
        byte: 0,
        rune: 0,
        line: 1,
        column: 1,
    };
}

impl Default for Loc {
    fn default() -> Self {
        Self::START
    }
}

/// Forward-only scanner resolving increasing offsets against one text.
#[derive(Debug, Clone)]
pub struct LocCursor<'t> {
    text: &'t str,
    loc: Loc,
}

impl<'t> LocCursor<'t> {
    /// Starts a cursor at the beginning of `text`.
    #[must_use]
    pub const fn new(text: &'t str) -> Self {
        Self {
            text,
            loc: Loc::START,
        }
    }

    /// Returns the current location.
    #[must_use]
    pub const fn loc(&self) -> Loc {
        self.loc
    }

    /// Advances to `offset` and returns the location there.
    ///
    /// Offsets behind the cursor return the current location unchanged.
    /// Scanning stops at the end of the text, and an offset inside a
    /// multi-byte character resolves to the end of that character.
    pub fn advance_to(&mut self, offset: usize) -> Loc {
        while offset > self.loc.byte {
            let Some(c) = self.text.get(self.loc.byte..).and_then(|rest| rest.chars().next())
            else {
                break;
            };
            self.loc.byte += c.len_utf8();
            self.loc.rune += 1;
            self.loc.column += 1;
            if c == '\n' {
                self.loc.line += 1;
                self.loc.column = 1;
            }
        }
        self.loc
    }
}

/// Returns the location of byte `offset` in `text`.
#[must_use]
pub fn locate(text: &str, offset: usize) -> Loc {
    LocCursor::new(text).advance_to(offset)
}

/// Returns the location of every node reachable from the root of `tree`.
///
/// Offsets are visited in ascending order, so the text is scanned once no
/// matter how many nodes share or interleave positions.
#[must_use]
pub fn locate_failures(text: &str, tree: &FailTree) -> BTreeMap<FailId, Loc> {
    let mut nodes: Vec<(usize, FailId)> = reachable(tree)
        .into_iter()
        .filter_map(|id| tree.get(id).map(|node| (node.position(), id)))
        .collect();
    nodes.sort_unstable();

    let mut cursor = LocCursor::new(text);
    nodes
        .into_iter()
        .map(|(position, id)| (id, cursor.advance_to(position)))
        .collect()
}

/// Lists the nodes reachable from the root, each once.
pub(crate) fn reachable(tree: &FailTree) -> Vec<FailId> {
    let mut seen = vec![false; tree.len()];
    let mut order = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        match seen.get_mut(id.index()) {
            Some(flag) if !*flag => *flag = true,
            _ => continue,
        }
        order.push(id);
        stack.extend(tree.children(id).iter().rev());
    }
    order
}

#[cfg(test)]
mod tests {
    use gerna_peg::{FailArena, FailureNode};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::start("mi klama", 0, 0, 0, 1, 1)]
    #[case::same_line("mi klama", 3, 3, 3, 1, 4)]
    #[case::after_newline("coi\nrodo", 4, 4, 4, 2, 1)]
    #[case::multibyte("ĉu do", 3, 3, 2, 1, 3)]
    #[case::inside_multibyte("ĉu", 1, 2, 1, 1, 2)]
    #[case::beyond_end("mi", 40, 2, 2, 1, 3)]
    fn locate_scans_forward(
        #[case] text: &str,
        #[case] offset: usize,
        #[case] byte: usize,
        #[case] rune: usize,
        #[case] line: usize,
        #[case] column: usize,
    ) {
        assert_eq!(
            locate(text, offset),
            Loc {
                byte,
                rune,
                line,
                column
            }
        );
    }

    #[test]
    fn cursor_never_moves_backwards() {
        let mut cursor = LocCursor::new("mi\nklama");
        let far = cursor.advance_to(5);
        assert_eq!(cursor.advance_to(1), far);
    }

    #[test]
    fn batch_agrees_with_single_offsets() {
        let text = "mi\nklama\nlo zarci";
        let mut arena = FailArena::new();
        let deep = arena.push(FailureNode::leaf("", 12, "\"ku\""));
        let early = arena.push(FailureNode::leaf("", 1, "[aeiou]"));
        let middle = arena.push(FailureNode::new("sumti", 9, "", vec![deep]));
        let root = arena.push(FailureNode::new("text", 0, "", vec![middle, early, deep]));
        let tree = arena.finish(root);

        let locs = locate_failures(text, &tree);
        assert_eq!(locs.len(), 4);
        for (id, loc) in &locs {
            let node = tree.get(*id).expect("located node exists");
            assert_eq!(*loc, locate(text, node.position()));
        }
    }

    #[test]
    fn unreachable_nodes_are_not_located() {
        let mut arena = FailArena::new();
        let orphan = arena.push(FailureNode::leaf("", 3, "\"i\""));
        let root = arena.push(FailureNode::leaf("text", 0, ""));
        let locs = locate_failures("mi", &arena.finish(root));
        assert!(!locs.contains_key(&orphan));
        assert_eq!(locs.len(), 1);
    }
}
