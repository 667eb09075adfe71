//! Options controlling tree simplification.

use serde::{Deserialize, Serialize};

/// Switches for [`simplify`](crate::simplify).
///
/// Both switches are off by default, which truncates words to their text and
/// leaves elided terminators out of the tree.
///
/// # Example
///
/// ```
/// use gerna_syntax::SimplifyOptions;
///
/// let options = SimplifyOptions::default().with_add_elided_terminators(true);
/// assert!(!options.keep_morphology());
/// assert!(options.add_elided_terminators());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimplifyOptions {
    /// Whether word nodes keep their morphological structure.
    keep_morphology: bool,
    /// Whether elided terminators are materialized as leaves.
    add_elided_terminators: bool,
}

impl SimplifyOptions {
    /// Creates options with explicit values.
    #[must_use]
    pub const fn new(keep_morphology: bool, add_elided_terminators: bool) -> Self {
        Self {
            keep_morphology,
            add_elided_terminators,
        }
    }

    /// Returns whether word nodes keep their children.
    #[must_use]
    pub const fn keep_morphology(&self) -> bool {
        self.keep_morphology
    }

    /// Returns whether elided terminators are materialized.
    #[must_use]
    pub const fn add_elided_terminators(&self) -> bool {
        self.add_elided_terminators
    }

    /// Sets whether word nodes keep their children.
    #[must_use]
    pub const fn with_keep_morphology(mut self, keep: bool) -> Self {
        self.keep_morphology = keep;
        self
    }

    /// Sets whether elided terminators are materialized.
    #[must_use]
    pub const fn with_add_elided_terminators(mut self, add: bool) -> Self {
        self.add_elided_terminators = add;
        self
    }
}
