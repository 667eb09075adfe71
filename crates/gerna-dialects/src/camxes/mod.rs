//! The `camxes` dialect: standard Lojban.
//!
//! The grammar covers bridi with a tanru of gismu, sumti made of pronouns,
//! descriptions, names, and `zoi` quotes, and sentences joined by `i`.
//! It is compiled once per process and shared by every engine.

mod grammar;

use gerna_peg::{Grammar, GrammarEngine, GrammarError, PegEngine};
use gerna_syntax::Dialect;
use once_cell::sync::Lazy;
use tracing::{debug, error};

/// Registered name of the dialect.
pub const NAME: &str = "camxes";

const VERSION: &str = "0.1";

static GRAMMAR: Lazy<Result<Grammar, GrammarError>> = Lazy::new(|| {
    let grammar = grammar::build();
    match &grammar {
        Ok(compiled) => debug!(
            target: crate::DIALECTS_TARGET,
            dialect = NAME,
            rules = compiled.len(),
            "grammar compiled"
        ),
        Err(err) => error!(
            target: crate::DIALECTS_TARGET,
            dialect = NAME,
            error = %err,
            "grammar failed to compile"
        ),
    }
    grammar
});

/// Returns the descriptor of the dialect.
#[must_use]
pub fn dialect() -> Dialect {
    Dialect::new(NAME, VERSION)
        .with_description("en", "Standard Lojban")
        .with_description("jbo", "lo jbobau")
        .with_official_url("https://mw.lojban.org/papri/camxes")
        .with_grammar_url("https://github.com/lojban/camxes-py")
}

/// Returns the compiled grammar.
///
/// # Errors
///
/// Returns the [`GrammarError`] raised when the rules were compiled.
pub fn grammar() -> Result<&'static Grammar, GrammarError> {
    GRAMMAR.as_ref().map_err(Clone::clone)
}

/// Builds an engine bound to `text`.
///
/// # Errors
///
/// Returns the [`GrammarError`] raised when the rules were compiled.
pub fn new_engine(text: &str) -> Result<Box<dyn GrammarEngine>, GrammarError> {
    let grammar = grammar()?;
    Ok(Box::new(PegEngine::new(grammar, text)))
}
