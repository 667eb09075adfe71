//! Failure trees recorded by rejected parses.
//!
//! A failure tree lists every rule alternative that failed at or beyond a
//! minimum position. Nodes live in an arena and are addressed by [`FailId`];
//! memoizing engines hand out the same node to several parents, so the
//! structure is a directed acyclic graph and node identity is the arena index
//! rather than the node's contents.

use std::fmt;

/// Stable identity of a node inside a [`FailTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FailId(usize);

impl FailId {
    /// Returns the arena index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single failed rule attempt or terminal match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNode {
    name: String,
    position: usize,
    description: String,
    children: Vec<FailId>,
}

impl FailureNode {
    /// Creates a node with children.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        position: usize,
        description: impl Into<String>,
        children: Vec<FailId>,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            description: description.into(),
            children,
        }
    }

    /// Creates a childless node.
    #[must_use]
    pub fn leaf(name: impl Into<String>, position: usize, description: impl Into<String>) -> Self {
        Self::new(name, position, description, Vec::new())
    }

    /// Returns the rule tag, empty for terminals.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the byte offset where the attempt was made.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns what the attempt wanted to see.
    ///
    /// Terminal renderings start with one of `"`, `.`, `[`, `!` or `&`.
    /// Rules declaring an error label carry the bare label instead. Plain
    /// rule nodes have an empty description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the child node identities.
    #[must_use]
    pub fn children(&self) -> &[FailId] {
        &self.children
    }

    /// Returns `true` when the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Append-only storage used to assemble a [`FailTree`].
///
/// Children must be pushed before their parents, which keeps every finished
/// tree acyclic.
#[derive(Debug, Clone, Default)]
pub struct FailArena {
    nodes: Vec<FailureNode>,
}

impl FailArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a node and returns its identity.
    pub fn push(&mut self, node: FailureNode) -> FailId {
        let id = FailId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Seals the arena into a tree rooted at `root`.
    #[must_use]
    pub fn finish(self, root: FailId) -> FailTree {
        FailTree {
            nodes: self.nodes,
            root,
        }
    }
}

/// A rooted failure tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailTree {
    nodes: Vec<FailureNode>,
    root: FailId,
}

impl FailTree {
    /// Returns the root node identity.
    #[must_use]
    pub const fn root(&self) -> FailId {
        self.root
    }

    /// Looks up a node by identity.
    #[must_use]
    pub fn get(&self, id: FailId) -> Option<&FailureNode> {
        self.nodes.get(id.0)
    }

    /// Returns the children of a node, or nothing for a foreign identity.
    #[must_use]
    pub fn children(&self, id: FailId) -> &[FailId] {
        self.get(id).map_or(&[], FailureNode::children)
    }

    /// Returns the number of stored nodes, reachable or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every stored node with its identity.
    pub fn iter(&self) -> impl Iterator<Item = (FailId, &FailureNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (FailId(index), node))
    }

    fn write_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: FailId,
        depth: usize,
    ) -> fmt::Result {
        // Foreign identities could close a loop; no honest path is deeper
        // than the arena is long.
        if depth > self.nodes.len() {
            return Ok(());
        }
        let Some(node) = self.get(id) else {
            return Ok(());
        };
        write!(f, "{:indent$}{}@{}", "", node.name, node.position, indent = depth * 2)?;
        if !node.description.is_empty() {
            write!(f, " {}", node.description)?;
        }
        writeln!(f)?;
        for &child in &node.children {
            self.write_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

/// Writes an indented dump, one node per line, shared nodes repeated under
/// every parent.
impl fmt::Display for FailTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root, 0)
    }
}
