//! Short constructors for writing grammars in Rust.

use crate::grammar::{CharClass, Expr};

/// Matches the exact text.
#[must_use]
pub fn lit(text: &str) -> Expr {
    Expr::Literal(text.to_owned())
}

/// Matches one character out of `members`.
#[must_use]
pub fn class(members: &str) -> Expr {
    Expr::Class(CharClass::new(members))
}

/// Matches any single character.
#[must_use]
pub const fn any() -> Expr {
    Expr::Any
}

/// Invokes the named rule.
#[must_use]
pub fn rule(name: &str) -> Expr {
    Expr::Rule(name.to_owned())
}

/// Matches every operand in order.
#[must_use]
pub fn seq(items: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Seq(items.into_iter().collect())
}

/// Matches the first operand that succeeds.
#[must_use]
pub fn choice(alts: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Choice(alts.into_iter().collect())
}

/// Matches the first literal that succeeds.
#[must_use]
pub fn one_of(literals: &[&str]) -> Expr {
    choice(literals.iter().map(|text| lit(text)))
}

/// Matches the operand or nothing.
#[must_use]
pub fn opt(inner: Expr) -> Expr {
    Expr::Optional(Box::new(inner))
}

/// Matches the operand zero or more times.
#[must_use]
pub fn star(inner: Expr) -> Expr {
    Expr::Star(Box::new(inner))
}

/// Matches the operand one or more times.
#[must_use]
pub fn plus(inner: Expr) -> Expr {
    Expr::Plus(Box::new(inner))
}

/// Positive lookahead.
#[must_use]
pub fn and(inner: Expr) -> Expr {
    Expr::And(Box::new(inner))
}

/// Negative lookahead.
#[must_use]
pub fn not(inner: Expr) -> Expr {
    Expr::Not(Box::new(inner))
}
