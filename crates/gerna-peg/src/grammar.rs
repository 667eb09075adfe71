//! Parsing expression grammars.
//!
//! A grammar is a list of named rules, each with a body [`Expr`] and an
//! optional error label. [`GrammarBuilder::build`] resolves rule references
//! into indices and pre-renders the "wanted" text that failure trees report
//! for every terminal and lookahead.

use std::collections::HashMap;
use std::fmt;

use crate::error::GrammarError;

/// A set of characters matched by a single-character terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    members: Vec<char>,
}

impl CharClass {
    /// Creates a class matching any character of `members`.
    #[must_use]
    pub fn new(members: &str) -> Self {
        let mut chars: Vec<char> = Vec::new();
        for c in members.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        Self { members: chars }
    }

    /// Returns `true` when `c` belongs to the class.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.members.contains(&c)
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for &c in &self.members {
            match c {
                '\t' => f.write_str("\\t")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\\' | ']' => write!(f, "\\{c}")?,
                _ => write!(f, "{c}")?,
            }
        }
        f.write_str("]")
    }
}

/// A parsing expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Matches the exact text.
    Literal(String),
    /// Matches one character of the class.
    Class(CharClass),
    /// Matches any single character.
    Any,
    /// Invokes the named rule.
    Rule(String),
    /// Matches every operand in order.
    Seq(Vec<Expr>),
    /// Matches the first operand that succeeds.
    Choice(Vec<Expr>),
    /// Matches the operand or nothing.
    Optional(Box<Expr>),
    /// Matches the operand zero or more times.
    Star(Box<Expr>),
    /// Matches the operand one or more times.
    Plus(Box<Expr>),
    /// Succeeds without consuming input when the operand matches.
    And(Box<Expr>),
    /// Succeeds without consuming input when the operand does not match.
    Not(Box<Expr>),
}

/// Renders an operand of a prefix or suffix operator, parenthesized when it
/// would otherwise bind loosely.
struct Operand<'a>(&'a Expr);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Seq(items) | Expr::Choice(items) if items.len() > 1 => write!(f, "({})", self.0),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{text:?}"),
            Self::Class(class) => write!(f, "{class}"),
            Self::Any => f.write_str("."),
            Self::Rule(name) => f.write_str(name),
            Self::Seq(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    match item {
                        Self::Choice(alts) if alts.len() > 1 => write!(f, "({item})")?,
                        _ => write!(f, "{item}")?,
                    }
                }
                Ok(())
            }
            Self::Choice(alts) => {
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" / ")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
            Self::Optional(inner) => write!(f, "{}?", Operand(inner)),
            Self::Star(inner) => write!(f, "{}*", Operand(inner)),
            Self::Plus(inner) => write!(f, "{}+", Operand(inner)),
            Self::And(inner) => write!(f, "&{}", Operand(inner)),
            Self::Not(inner) => write!(f, "!{}", Operand(inner)),
        }
    }
}

/// A named rule before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    label: Option<String>,
    body: Expr,
}

impl Rule {
    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the error label, if the rule declares one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the rule body.
    #[must_use]
    pub const fn body(&self) -> &Expr {
        &self.body
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RuleId(usize);

/// Compiled expression with resolved references and pre-rendered wants.
#[derive(Debug, Clone)]
pub(crate) enum Op {
    Literal { text: String, want: String },
    Class { class: CharClass, want: String },
    Any,
    Rule(RuleId),
    Seq(Vec<Op>),
    Choice(Vec<Op>),
    Optional(Box<Op>),
    Star(Box<Op>),
    Plus(Box<Op>),
    And { operand: Box<Op>, want: String },
    Not { operand: Box<Op>, want: String },
}

/// Rendering reported for a failed [`Op::Any`].
pub(crate) const ANY_WANT: &str = ".";

#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) name: String,
    pub(crate) label: Option<String>,
    pub(crate) body: Op,
}

/// Assembles a [`Grammar`] rule by rule.
///
/// # Example
///
/// ```
/// use gerna_peg::GrammarBuilder;
/// use gerna_peg::dsl::{lit, rule, seq};
///
/// let grammar = GrammarBuilder::new("greeting")
///     .rule("greeting", seq([lit("coi"), rule("name")]))
///     .rule("name", lit(" la .djan."))
///     .build()?;
/// assert_eq!(grammar.start_rule(), "greeting");
/// # Ok::<(), gerna_peg::GrammarError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    start: String,
    rules: Vec<Rule>,
}

impl GrammarBuilder {
    /// Starts a grammar whose parses begin at rule `start`.
    #[must_use]
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            rules: Vec::new(),
        }
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule(mut self, name: impl Into<String>, body: Expr) -> Self {
        self.rules.push(Rule {
            name: name.into(),
            label: None,
            body,
        });
        self
    }

    /// Adds a rule that reports `label` instead of its inner failures.
    #[must_use]
    pub fn labeled_rule(
        mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        body: Expr,
    ) -> Self {
        self.rules.push(Rule {
            name: name.into(),
            label: Some(label.into()),
            body,
        });
        self
    }

    /// Returns the rules added so far.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Compiles the grammar.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError`] when a rule name is defined twice, when a
    /// body refers to an undefined rule, or when the start rule is missing.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let mut index: HashMap<&str, RuleId> = HashMap::with_capacity(self.rules.len());
        for (i, rule) in self.rules.iter().enumerate() {
            if index.insert(rule.name.as_str(), RuleId(i)).is_some() {
                return Err(GrammarError::duplicate_rule(&rule.name));
            }
        }
        let start = *index
            .get(self.start.as_str())
            .ok_or_else(|| GrammarError::unknown_start_rule(&self.start))?;

        let rules = self
            .rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    name: rule.name.clone(),
                    label: rule.label.clone(),
                    body: compile(&rule.body, &rule.name, &index)?,
                })
            })
            .collect::<Result<Vec<_>, GrammarError>>()?;

        Ok(Grammar { start, rules })
    }
}

fn compile(expr: &Expr, owner: &str, index: &HashMap<&str, RuleId>) -> Result<Op, GrammarError> {
    let boxed = |inner: &Expr| compile(inner, owner, index).map(Box::new);
    let all = |items: &[Expr]| {
        items
            .iter()
            .map(|item| compile(item, owner, index))
            .collect::<Result<Vec<_>, _>>()
    };
    Ok(match expr {
        Expr::Literal(text) => Op::Literal {
            text: text.clone(),
            want: expr.to_string(),
        },
        Expr::Class(class) => Op::Class {
            class: class.clone(),
            want: expr.to_string(),
        },
        Expr::Any => Op::Any,
        Expr::Rule(name) => Op::Rule(
            *index
                .get(name.as_str())
                .ok_or_else(|| GrammarError::undefined_rule(name, owner))?,
        ),
        Expr::Seq(items) => Op::Seq(all(items.as_slice())?),
        Expr::Choice(alts) => Op::Choice(all(alts.as_slice())?),
        Expr::Optional(inner) => Op::Optional(boxed(&**inner)?),
        Expr::Star(inner) => Op::Star(boxed(&**inner)?),
        Expr::Plus(inner) => Op::Plus(boxed(&**inner)?),
        Expr::And(inner) => Op::And {
            operand: boxed(&**inner)?,
            want: expr.to_string(),
        },
        Expr::Not(inner) => Op::Not {
            operand: boxed(&**inner)?,
            want: expr.to_string(),
        },
    })
}

/// A compiled grammar, shareable across threads and engines.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: RuleId,
    rules: Vec<CompiledRule>,
}

impl Grammar {
    /// Returns the name of the start rule.
    #[must_use]
    pub fn start_rule(&self) -> &str {
        self.rule(self.start).map_or("", |rule| rule.name.as_str())
    }

    /// Iterates over rule names in definition order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    /// Returns the error label declared by the named rule.
    #[must_use]
    pub fn label_of(&self, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.name == name)
            .and_then(|rule| rule.label.as_deref())
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when the grammar has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) const fn start(&self) -> RuleId {
        self.start
    }

    pub(crate) fn rule(&self, id: RuleId) -> Option<&CompiledRule> {
        self.rules.get(id.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::dsl::{and, any, choice, class, lit, not, opt, plus, rule, seq, star};

    #[rstest]
    #[case::literal(lit("ko'a"), r#""ko'a""#)]
    #[case::escaped_literal(lit("a\"b"), r#""a\"b""#)]
    #[case::class(class("aeiou"), "[aeiou]")]
    #[case::class_escapes(class(" \t\n"), "[ \\t\\n]")]
    #[case::any(any(), ".")]
    #[case::not_any(not(any()), "!.")]
    #[case::and_rule(and(rule("consonant")), "&consonant")]
    #[case::grouped_suffix(star(seq([lit("a"), lit("b")])), r#"("a" "b")*"#)]
    #[case::grouped_choice_in_seq(
        seq([choice([lit("lo"), lit("le")]), opt(rule("spaces"))]),
        r#"("lo" / "le") spaces?"#
    )]
    #[case::single_item_seq(plus(seq([rule("vowel")])), "vowel+")]
    fn expressions_render_like_grammar_source(#[case] expr: Expr, #[case] expected: &str) {
        assert_eq!(expr.to_string(), expected);
    }

    #[test]
    fn class_ignores_repeated_members() {
        assert_eq!(CharClass::new("aab").to_string(), "[ab]");
    }

    #[test]
    fn build_resolves_references() {
        let grammar = GrammarBuilder::new("top")
            .rule("top", seq([rule("a"), rule("a")]))
            .labeled_rule("a", "letter a", lit("a"))
            .build()
            .expect("grammar builds");
        assert_eq!(grammar.len(), 2);
        assert_eq!(grammar.start_rule(), "top");
        assert_eq!(grammar.label_of("a"), Some("letter a"));
        assert_eq!(grammar.label_of("top"), None);
        assert_eq!(grammar.rule_names().collect::<Vec<_>>(), ["top", "a"]);
    }

    #[test]
    fn builder_keeps_rules_in_definition_order() {
        let builder = GrammarBuilder::new("top")
            .rule("top", plus(rule("a")))
            .labeled_rule("a", "letter a", lit("a"));
        let rules: Vec<(&str, Option<&str>)> = builder
            .rules()
            .iter()
            .map(|r| (r.name(), r.label()))
            .collect();
        assert_eq!(rules, [("top", None), ("a", Some("letter a"))]);
        assert_eq!(builder.rules().first().map(Rule::body), Some(&plus(rule("a"))));
    }

    #[test]
    fn build_rejects_undefined_rule() {
        let err = GrammarBuilder::new("top")
            .rule("top", rule("missing"))
            .build()
            .expect_err("undefined rule");
        assert_eq!(err, GrammarError::undefined_rule("missing", "top"));
        assert_eq!(
            err.to_string(),
            "rule 'top' refers to undefined rule 'missing'"
        );
    }

    #[test]
    fn build_rejects_duplicate_rule() {
        let err = GrammarBuilder::new("top")
            .rule("top", lit("a"))
            .rule("top", lit("b"))
            .build()
            .expect_err("duplicate rule");
        assert!(matches!(err, GrammarError::DuplicateRule { ref name } if name == "top"));
    }

    #[test]
    fn build_rejects_missing_start_rule() {
        let err = GrammarBuilder::new("text")
            .rule("top", lit("a"))
            .build()
            .expect_err("missing start");
        assert_eq!(err, GrammarError::unknown_start_rule("text"));
    }
}
