//! Concrete syntax trees produced by accepted parses.

/// A node of a concrete syntax tree.
///
/// Every rule invocation that matched becomes a named node spanning the text
/// it consumed. Matched terminals become anonymous leaves. The tree is owned
/// by its root; simplification passes rewrite it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxNode {
    /// Grammar rule tag, empty for anonymous terminals and groupings.
    pub name: String,
    /// The matched input text, possibly empty.
    pub text: String,
    /// Child nodes in input order.
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Creates a node with the given children.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            children,
        }
    }

    /// Creates a node without children.
    #[must_use]
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, text, Vec::new())
    }

    /// Returns `true` when the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the leaves of the tree in depth-first, left-to-right order.
    ///
    /// A childless root counts as a leaf.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Self> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                leaves.push(node);
            }
            stack.extend(node.children.iter().rev());
        }
        leaves
    }

    /// Returns the number of nodes in the tree, the root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}
