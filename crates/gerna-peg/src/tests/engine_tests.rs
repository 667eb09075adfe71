//! Tests for [`PegEngine`] across its three passes.

use rstest::{fixture, rstest};

use crate::dsl::{and, any, choice, class, lit, not, opt, plus, rule, seq, star};
use crate::{Grammar, GrammarBuilder, GrammarEngine, PegEngine};

const LETTERS: &str = "abcdefgijklmnoprstuvxyz";

#[fixture]
fn greeting() -> Grammar {
    GrammarBuilder::new("greeting")
        .rule(
            "greeting",
            seq([lit("coi"), rule("spaces"), rule("name"), rule("EOF")]),
        )
        .rule("spaces", plus(class(" ")))
        .labeled_rule(
            "name",
            "a name",
            seq([lit("la"), class(" "), plus(class(LETTERS))]),
        )
        .rule("EOF", not(any()))
        .build()
        .expect("greeting grammar builds")
}

#[rstest]
#[case::accepted("coi la djan", true, 4)]
#[case::bad_name("coi xx", false, 4)]
#[case::trailing_garbage("coi la djan!", false, 11)]
#[case::empty("", false, 0)]
fn attempt_reports_furthest_failure(
    greeting: Grammar,
    #[case] text: &str,
    #[case] accepted: bool,
    #[case] position: usize,
) {
    let attempt = PegEngine::new(&greeting, text).attempt();
    assert_eq!(attempt.accepted, accepted);
    assert_eq!(attempt.position, position);
}

#[rstest]
fn success_tree_spans_the_whole_text(greeting: Grammar) {
    let mut engine = PegEngine::new(&greeting, "coi la djan");
    let tree = engine.success_tree().expect("accepted text has a tree");
    assert_eq!(tree.name, "greeting");
    assert_eq!(tree.text, "coi la djan");
    let names: Vec<&str> = tree.children.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["", "spaces", "name", "EOF"]);
    let joined: String = tree.leaves().iter().map(|n| n.text.as_str()).collect();
    assert_eq!(joined, "coi la djan");
}

#[rstest]
fn rejected_text_has_no_success_tree(greeting: Grammar) {
    assert!(PegEngine::new(&greeting, "coi xx").success_tree().is_none());
}

#[rstest]
fn labeled_rule_replaces_inner_failures(greeting: Grammar) {
    let tree = PegEngine::new(&greeting, "coi xx").failure_tree(4);
    insta::assert_snapshot!(
        tree.to_string().replace('\n', "|"),
        @"greeting@0|  spaces@3|    @4 [ ]|  name@4 a name|"
    );
}

#[rstest]
fn threshold_beyond_every_failure_leaves_a_bare_root(greeting: Grammar) {
    let tree = PegEngine::new(&greeting, "coi xx").failure_tree(5);
    let root = tree.get(tree.root()).expect("root is stored");
    assert_eq!(root.name(), "greeting");
    assert!(root.is_leaf());
    assert_eq!(tree.len(), 1);
}

#[test]
fn memoized_rules_share_failure_nodes() {
    let grammar = GrammarBuilder::new("top")
        .rule(
            "top",
            choice([
                seq([rule("item"), lit("!")]),
                seq([rule("item"), lit("?")]),
            ]),
        )
        .rule("item", seq([lit("k"), opt(class("ab"))]))
        .build()
        .expect("grammar builds");
    let tree = PegEngine::new(&grammar, "kc").failure_tree(0);
    let kids = tree.children(tree.root());
    assert_eq!(kids.len(), 4);
    assert_eq!(kids.first(), kids.get(2));
    let wants: Vec<&str> = kids
        .iter()
        .filter_map(|&id| tree.get(id))
        .filter(|node| node.name().is_empty())
        .map(crate::FailureNode::description)
        .collect();
    assert_eq!(wants, [r#""!""#, r#""?""#]);
}

#[test]
fn lookahead_operands_do_not_move_the_reported_position() {
    let grammar = GrammarBuilder::new("top")
        .rule(
            "top",
            seq([not(seq([lit("a"), lit("b"), lit("c")])), lit("a"), lit("q")]),
        )
        .build()
        .expect("grammar builds");
    let attempt = PegEngine::new(&grammar, "abz").attempt();
    assert!(!attempt.accepted);
    assert_eq!(attempt.position, 1);
}

#[test]
fn failed_lookahead_is_recorded_with_its_rendering() {
    let grammar = GrammarBuilder::new("top")
        .rule("top", seq([lit("a"), and(lit("b"))]))
        .build()
        .expect("grammar builds");
    let tree = PegEngine::new(&grammar, "ac").failure_tree(1);
    insta::assert_snapshot!(tree.to_string().replace('\n', "|"), @r#"top@0|  @1 &"b"|"#);
}

#[test]
fn repetition_of_empty_match_terminates() {
    let grammar = GrammarBuilder::new("top")
        .rule("top", seq([star(opt(lit("a"))), lit("b")]))
        .build()
        .expect("grammar builds");
    let mut engine = PegEngine::new(&grammar, "aab");
    assert!(engine.attempt().accepted);
    let tree = engine.success_tree().expect("tree");
    let texts: Vec<&str> = tree.leaves().iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, ["a", "a", "b"]);
}

#[test]
fn lookaheads_build_nothing() {
    let grammar = GrammarBuilder::new("top")
        .rule("top", seq([and(rule("word")), rule("word")]))
        .rule("word", plus(class(LETTERS)))
        .build()
        .expect("grammar builds");
    let tree = PegEngine::new(&grammar, "mi")
        .success_tree()
        .expect("tree");
    assert_eq!(tree.children.len(), 1);
}

#[rstest]
#[case::first_branch("k!", "!")]
#[case::second_branch("k?", "?")]
#[case::second_branch_with_suffix("kb?", "?")]
fn rules_reused_after_backtracking_build_again(#[case] text: &str, #[case] mark: &str) {
    let grammar = GrammarBuilder::new("top")
        .rule(
            "top",
            choice([
                seq([rule("item"), lit("!")]),
                seq([rule("item"), lit("?")]),
            ]),
        )
        .rule("item", seq([lit("k"), opt(class("ab"))]))
        .build()
        .expect("grammar builds");
    let mut engine = PegEngine::new(&grammar, text);
    assert_eq!(engine.text(), text);
    assert_eq!(engine.grammar().start_rule(), "top");

    let tree = engine.success_tree().expect("tree");
    let kids: Vec<(&str, &str)> = tree
        .children
        .iter()
        .map(|n| (n.name.as_str(), n.text.as_str()))
        .collect();
    let item = text.strip_suffix(mark).expect("text ends with its mark");
    assert_eq!(kids, [("item", item), ("", mark)]);
}
