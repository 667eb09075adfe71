//! Dialect descriptors and the registry mapping names to engines.
//!
//! The [`DialectRegistry`] stores one [`Dialect`] descriptor and one
//! [`EngineFactory`] per dialect name. Registering a name twice replaces the
//! earlier entry.

use std::collections::BTreeMap;

use gerna_peg::{GrammarEngine, GrammarError, SyntaxNode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::parse;

/// Tracing target for registry operations.
const DIALECT_TARGET: &str = "gerna_syntax::dialect";

/// Builds an engine bound to one input text.
pub type EngineFactory = fn(&str) -> Result<Box<dyn GrammarEngine>, GrammarError>;

/// Describes a supported grammar dialect.
///
/// # Example
///
/// ```
/// use gerna_syntax::Dialect;
///
/// let dialect = Dialect::new("camxes", "0.1")
///     .with_description("en", "Standard Lojban")
///     .with_official_url("https://example.org/camxes");
/// assert_eq!(dialect.description("en"), Some("Standard Lojban"));
/// assert_eq!(dialect.description("jbo"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Unique dialect name.
    name: String,
    /// Version of the dialect's grammar.
    version: String,
    /// Human descriptions keyed by language code.
    descriptions: BTreeMap<String, String>,
    /// Homepage of the dialect's parser.
    official_url: String,
    /// Location of the grammar source.
    grammar_url: String,
}

impl Dialect {
    /// Creates a descriptor without descriptions or links.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            descriptions: BTreeMap::new(),
            official_url: String::new(),
            grammar_url: String::new(),
        }
    }

    /// Adds a description in the language `code`.
    #[must_use]
    pub fn with_description(mut self, code: impl Into<String>, text: impl Into<String>) -> Self {
        self.descriptions.insert(code.into(), text.into());
        self
    }

    /// Sets the homepage link.
    #[must_use]
    pub fn with_official_url(mut self, url: impl Into<String>) -> Self {
        self.official_url = url.into();
        self
    }

    /// Sets the grammar source link.
    #[must_use]
    pub fn with_grammar_url(mut self, url: impl Into<String>) -> Self {
        self.grammar_url = url.into();
        self
    }

    /// Returns the dialect name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the grammar version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the description in the language `code`.
    #[must_use]
    pub fn description(&self, code: &str) -> Option<&str> {
        self.descriptions.get(code).map(String::as_str)
    }

    /// Returns every description keyed by language code.
    #[must_use]
    pub const fn descriptions(&self) -> &BTreeMap<String, String> {
        &self.descriptions
    }

    /// Returns the homepage link, empty when unknown.
    #[must_use]
    pub fn official_url(&self) -> &str {
        &self.official_url
    }

    /// Returns the grammar source link, empty when unknown.
    #[must_use]
    pub fn grammar_url(&self) -> &str {
        &self.grammar_url
    }
}

#[derive(Debug, Clone)]
struct Entry {
    dialect: Dialect,
    factory: EngineFactory,
}

/// Registry of dialects keyed by name.
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    entries: BTreeMap<String, Entry>,
}

impl DialectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dialect and the factory building its engines.
    ///
    /// Returns the descriptor previously registered under the same name.
    pub fn register(&mut self, dialect: Dialect, factory: EngineFactory) -> Option<Dialect> {
        let name = dialect.name().to_owned();
        debug!(
            target: DIALECT_TARGET,
            dialect = %name,
            version = dialect.version(),
            "registering dialect"
        );
        let previous = self
            .entries
            .insert(name.clone(), Entry { dialect, factory })
            .map(|entry| entry.dialect);
        if previous.is_some() {
            warn!(target: DIALECT_TARGET, dialect = %name, "dialect registration replaced");
        }
        previous
    }

    /// Looks up a dialect by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Dialect> {
        self.entries.get(name).map(|entry| &entry.dialect)
    }

    /// Returns `true` when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns every registered dialect in lexical order by name.
    #[must_use]
    pub fn list(&self) -> Vec<&Dialect> {
        self.entries.values().map(|entry| &entry.dialect).collect()
    }

    /// Returns the number of registered dialects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no dialects are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds an engine of the named dialect bound to `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownDialect`] when the name is not
    /// registered and [`ParseError::Grammar`] when the dialect's grammar
    /// cannot be compiled.
    pub fn engine(&self, name: &str, text: &str) -> Result<Box<dyn GrammarEngine>, ParseError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| ParseError::unknown_dialect(name))?;
        (entry.factory)(text).map_err(|source| ParseError::grammar(name, source))
    }

    /// Parses `text` with the named dialect.
    ///
    /// # Errors
    ///
    /// See [`parse`](crate::parse).
    ///
    /// # Panics
    ///
    /// See [`parse`](crate::parse).
    pub fn parse(&self, name: &str, text: &str) -> Result<SyntaxNode, ParseError> {
        parse::parse(self, name, text)
    }
}
