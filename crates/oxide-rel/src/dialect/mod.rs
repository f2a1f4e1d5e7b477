//! SQL dialect and engine configuration.
//!
//! A [`Dialect`] decides how identifiers and string literals are quoted.
//! An [`Engine`] carries a dialect through table handles, select managers
//! and the renderer, so there is no process-wide default to mutate.

mod generic;

use std::fmt;
use std::sync::Arc;

pub use generic::GenericDialect;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the string literal quote character.
    fn string_quote(&self) -> char {
        '\''
    }

    /// Quotes an identifier, doubling any embedded quote character.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    /// Quotes a string literal, doubling any embedded quote character.
    fn quote_string(&self, value: &str) -> String {
        let quote = self.string_quote();
        let escaped = value.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }
}

/// Rendering configuration shared by tables and select managers.
///
/// Cloning an engine is cheap: the dialect is reference counted.
#[derive(Clone)]
pub struct Engine {
    dialect: Arc<dyn Dialect + Send + Sync>,
}

impl Engine {
    /// Creates an engine for the given dialect.
    #[must_use]
    pub fn new<D>(dialect: D) -> Self
    where
        D: Dialect + Send + Sync + 'static,
    {
        Self {
            dialect: Arc::new(dialect),
        }
    }

    /// Returns the dialect used for rendering.
    #[must_use]
    pub fn dialect(&self) -> &(dyn Dialect + Send + Sync) {
        self.dialect.as_ref()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(GenericDialect::new())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("dialect", &self.dialect.name())
            .finish()
    }
}
