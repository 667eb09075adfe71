//! Lexical classification of grammar rule tags.
//!
//! Dialect grammars follow a naming convention: rules producing whole words
//! are spelled in capitals (with a lowercase `h` standing for the
//! apostrophe), while syntactic rules are lowercase and often contain
//! underscores.

use std::borrow::Cow;

use gerna_peg::{FailureNode, SyntaxNode};

/// Characters allowed in the tag of a word rule.
pub const WORD_TAG_ALPHABET: &str = "hABCDEFGIJKLMNOPRSTUVXYZ";

/// Characters that open the description of an anonymous terminal failure.
const TERMINAL_MARKERS: &str = "\".[!&";

/// Access to the grammar rule tag carried by a tree node.
pub trait RuleTagged {
    /// Returns the rule tag, empty for anonymous nodes.
    fn rule_name(&self) -> &str;
}

impl RuleTagged for SyntaxNode {
    fn rule_name(&self) -> &str {
        &self.name
    }
}

impl RuleTagged for FailureNode {
    fn rule_name(&self) -> &str {
        self.name()
    }
}

/// Returns `true` when `name` tags a complete lexical token.
///
/// # Example
///
/// ```
/// use gerna_syntax::is_word_name;
///
/// assert!(is_word_name("KOhA"));
/// assert!(!is_word_name("h"));
/// assert!(!is_word_name("sumti"));
/// ```
#[must_use]
pub fn is_word_name(name: &str) -> bool {
    !name.is_empty() && name != "h" && name.chars().all(|c| WORD_TAG_ALPHABET.contains(c))
}

/// Returns `true` when the node represents a complete lexical token.
#[must_use]
pub fn is_word<N: RuleTagged + ?Sized>(node: &N) -> bool {
    is_word_name(node.rule_name())
}

/// Returns the human-facing label for a rule tag, if it has one.
///
/// The two tail rules read as two words; `text` and any other tag containing
/// an underscore are internal and have no label.
#[must_use]
pub fn pretty_name(name: &str) -> Option<Cow<'_, str>> {
    match name {
        "bridi_tail" | "sumti_tail" => Some(Cow::Owned(name.replacen('_', " ", 1))),
        "" | "text" => None,
        _ if name.contains('_') => None,
        _ => Some(Cow::Borrowed(name)),
    }
}

/// Returns `true` when a failure description is a label declared by the
/// grammar rather than the rendering of a terminal.
#[must_use]
pub fn is_named_error(description: &str) -> bool {
    description
        .chars()
        .next()
        .is_some_and(|first| !TERMINAL_MARKERS.contains(first))
}

/// Returns the label reported for a failure node.
///
/// Anonymous terminal failures under a rule with a pretty name report that
/// name; everything else reports its description verbatim.
#[must_use]
pub fn failure_label(node: &FailureNode) -> Cow<'_, str> {
    if is_named_error(node.description()) {
        return Cow::Borrowed(node.description());
    }
    pretty_name(node.name()).unwrap_or(Cow::Borrowed(node.description()))
}
