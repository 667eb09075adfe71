//! Built-in grammar dialects.
//!
//! Each dialect module exposes a descriptor, its compiled grammar, and a
//! factory binding that grammar to a text. [`register_builtin`] adds them all
//! to a [`DialectRegistry`], and [`registry`] holds a process-wide registry
//! with every built-in dialect already registered.
//!
//! ```ignore
//! let err = gerna_dialects::parse("camxes", "mi klamax").unwrap_err();
//! assert_eq!(err.to_string(), ":1.4: expected one of: bridi tail, or sumti");
//! ```

pub mod camxes;

use gerna_peg::SyntaxNode;
use gerna_syntax::{DialectRegistry, ParseError};
use once_cell::sync::Lazy;
use tracing::debug;

/// Tracing target for dialect setup.
const DIALECTS_TARGET: &str = "gerna_dialects";

static REGISTRY: Lazy<DialectRegistry> = Lazy::new(|| {
    let mut registry = DialectRegistry::new();
    register_builtin(&mut registry);
    debug!(
        target: DIALECTS_TARGET,
        dialects = registry.len(),
        "built-in registry ready"
    );
    registry
});

/// Registers every built-in dialect, replacing entries of the same name.
pub fn register_builtin(registry: &mut DialectRegistry) {
    registry.register(camxes::dialect(), camxes::new_engine);
}

/// Returns the shared registry of built-in dialects.
#[must_use]
pub fn registry() -> &'static DialectRegistry {
    &REGISTRY
}

/// Parses `text` with a built-in dialect.
///
/// # Errors
///
/// See [`gerna_syntax::parse`].
///
/// # Panics
///
/// See [`gerna_syntax::parse`].
pub fn parse(dialect: &str, text: &str) -> Result<SyntaxNode, ParseError> {
    registry().parse(dialect, text)
}

#[cfg(test)]
mod tests;
