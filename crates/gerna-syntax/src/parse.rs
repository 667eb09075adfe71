//! Parse orchestration.
//!
//! A rejected parse is diagnosed in two rounds. The first failure tree,
//! collected from the furthest terminal failure, only serves to find where
//! the deepest failed word starts. The second tree is collected from that
//! position and aggregated to word level, so the user is told which word was
//! wrong rather than which letter.

use gerna_peg::{FailTree, GrammarEngine, SyntaxNode};
use tracing::{debug, error};

use crate::analysis::{analyze_words, deepest_word_position};
use crate::dialect::DialectRegistry;
use crate::error::ParseError;

/// Tracing target for parse operations.
const PARSE_TARGET: &str = "gerna_syntax::parse";

/// Parses `text` with the dialect registered as `dialect`.
///
/// An accepted text yields the concrete syntax tree, untouched.
///
/// # Errors
///
/// Returns [`ParseError::UnknownDialect`] for an unregistered name,
/// [`ParseError::Syntax`] when the text is rejected, and the engine-side
/// variants when the dialect cannot produce a working engine.
///
/// # Panics
///
/// Panics when a rejected parse reports no failed word anywhere in its
/// failure tree. That is a defect of the dialect grammar, and the panic
/// message carries the dumped tree.
pub fn parse(
    registry: &DialectRegistry,
    dialect: &str,
    text: &str,
) -> Result<SyntaxNode, ParseError> {
    debug!(target: PARSE_TARGET, dialect, bytes = text.len(), "parse started");
    let mut engine = registry.engine(dialect, text)?;
    drive(dialect, engine.as_mut(), text)
}

/// Runs an engine already bound to `text` and diagnoses a rejection.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] when the text is rejected and
/// [`ParseError::EngineContract`] when an accepting engine has no tree.
///
/// # Panics
///
/// Panics when the rejection cannot be traced to any failed word.
pub fn drive(
    dialect: &str,
    engine: &mut dyn GrammarEngine,
    text: &str,
) -> Result<SyntaxNode, ParseError> {
    let attempt = engine.attempt();
    debug!(
        target: PARSE_TARGET,
        dialect,
        accepted = attempt.accepted,
        position = attempt.position,
        "attempt finished"
    );
    if attempt.accepted {
        return engine.success_tree().ok_or_else(|| {
            ParseError::engine_contract(dialect, "text was accepted but no syntax tree was built")
        });
    }

    let reported = engine.failure_tree(attempt.position);
    let Some(word_position) = deepest_word_position(&reported) else {
        invariant_violation(dialect, attempt.position, &reported);
    };
    debug!(
        target: PARSE_TARGET,
        dialect,
        reported = attempt.position,
        word = word_position,
        "re-anchoring at the deepest failed word"
    );

    let anchored = engine.failure_tree(word_position);
    let Some(report) = analyze_words(&anchored) else {
        invariant_violation(dialect, word_position, &anchored);
    };
    let diagnostic = report.into_diagnostic(text);
    debug!(
        target: PARSE_TARGET,
        dialect,
        line = diagnostic.loc().line,
        column = diagnostic.loc().column,
        expected = ?diagnostic.expected(),
        "parse rejected"
    );
    Err(diagnostic.into())
}

fn invariant_violation(dialect: &str, position: usize, tree: &FailTree) -> ! {
    error!(
        target: PARSE_TARGET,
        dialect,
        position,
        tree = %tree,
        "failure tree holds no failed word"
    );
    panic!("{dialect}: failure tree from position {position} holds no failed word\n{tree}");
}

#[cfg(test)]
mod tests {
    use gerna_peg::{Attempt, FailArena, FailureNode};

    use super::*;

    /// Engine replaying canned answers.
    struct Scripted {
        attempt: Attempt,
        trees: Vec<(usize, FailTree)>,
        tree: Option<SyntaxNode>,
        requested: Vec<usize>,
    }

    impl Scripted {
        fn rejecting(position: usize, trees: Vec<(usize, FailTree)>) -> Self {
            Self {
                attempt: Attempt {
                    position,
                    accepted: false,
                },
                trees,
                tree: None,
                requested: Vec::new(),
            }
        }
    }

    impl GrammarEngine for Scripted {
        fn attempt(&mut self) -> Attempt {
            self.attempt
        }

        fn failure_tree(&mut self, min_position: usize) -> FailTree {
            self.requested.push(min_position);
            self.trees
                .iter()
                .find(|(position, _)| *position == min_position)
                .map(|(_, tree)| tree.clone())
                .expect("tree scripted for threshold")
        }

        fn success_tree(&mut self) -> Option<SyntaxNode> {
            self.tree.clone()
        }
    }

    fn tree(nodes: &[(&str, usize, &str)]) -> FailTree {
        let mut arena = FailArena::new();
        let kids = nodes
            .iter()
            .map(|&(name, position, description)| {
                arena.push(FailureNode::leaf(name, position, description))
            })
            .collect();
        let root = arena.push(FailureNode::new("text", 0, "", kids));
        arena.finish(root)
    }

    #[test]
    fn rejection_is_reanchored_at_the_deepest_word() {
        let morphology = tree(&[("BRIVLA", 3, ""), ("", 8, "[aeiou]")]);
        let words = tree(&[("BRIVLA", 3, ""), ("NA", 3, ""), ("", 3, "\"cu\"")]);
        let mut engine = Scripted::rejecting(8, vec![(8, morphology), (3, words)]);

        let err = drive("test", &mut engine, "mi klamax").expect_err("rejected");
        assert_eq!(engine.requested, [8, 3]);
        let diag = err.diagnostic().expect("syntax error");
        assert_eq!(diag.loc().byte, 3);
        assert_eq!(diag.to_string(), r#":1.4: expected one of: "cu", BRIVLA, or NA"#);
    }

    #[test]
    fn accepting_engine_without_tree_breaks_the_contract() {
        let mut engine = Scripted {
            attempt: Attempt {
                position: 0,
                accepted: true,
            },
            trees: Vec::new(),
            tree: None,
            requested: Vec::new(),
        };
        let err = drive("test", &mut engine, "mi").expect_err("contract broken");
        assert!(matches!(err, ParseError::EngineContract { .. }));
    }

    #[test]
    fn accepted_tree_is_returned_untouched() {
        let built = SyntaxNode::new("text", "mi", vec![SyntaxNode::leaf("KOhA", "mi")]);
        let mut engine = Scripted {
            attempt: Attempt {
                position: 2,
                accepted: true,
            },
            trees: Vec::new(),
            tree: Some(built.clone()),
            requested: Vec::new(),
        };
        assert_eq!(drive("test", &mut engine, "mi").expect("accepted"), built);
        assert!(engine.requested.is_empty());
    }

    #[test]
    #[should_panic(expected = "holds no failed word")]
    fn rejection_without_words_is_a_defect() {
        let mut engine = Scripted::rejecting(0, vec![(0, tree(&[("", 0, "[aeiou]")]))]);
        assert!(drive("test", &mut engine, "x").is_err());
    }

    #[test]
    fn unknown_dialect_is_reported_by_name() {
        let registry = DialectRegistry::new();
        let err = parse(&registry, "not-a-real-dialect", "mi klama").expect_err("unknown");
        assert!(matches!(err, ParseError::UnknownDialect { ref name } if name == "not-a-real-dialect"));
        assert_eq!(err.to_string(), "unknown dialect: not-a-real-dialect");
    }
}
