//! Table handles and alias generation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::trace;

use super::select::{JoinHandle, SelectManager};
use crate::ast::{Attribute, Node, Relation, SelectStatement, TableRef};
use crate::dialect::Engine;

/// A table handle.
///
/// Every alias produced by [`Table::alias`] shares its base table's alias
/// counter, so the generated names are `<name>_2`, `<name>_3`, ... per base
/// table.
///
/// ```rust
/// use oxide_rel::Table;
///
/// let users = Table::new("users");
/// let other = users.alias();
/// assert_eq!(other.reference_name(), "users_2");
/// assert_eq!(users.alias().reference_name(), "users_3");
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    table_alias: Option<String>,
    engine: Engine,
    aliases: Arc<AtomicUsize>,
}

impl Table {
    /// Creates a table handle rendered with the default engine.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_engine(name, Engine::default())
    }

    /// Creates a table handle bound to `engine`.
    #[must_use]
    pub fn with_engine(name: impl Into<String>, engine: Engine) -> Self {
        Self {
            name: name.into(),
            table_alias: None,
            engine,
            aliases: Arc::new(AtomicUsize::new(1)),
        }
    }

    /// Returns the base table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the table alias, if any.
    #[must_use]
    pub fn table_alias(&self) -> Option<&str> {
        self.table_alias.as_deref()
    }

    /// Returns the name attributes are qualified with.
    #[must_use]
    pub fn reference_name(&self) -> &str {
        self.table_alias.as_deref().unwrap_or(&self.name)
    }

    /// Returns the engine this table renders with.
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns a new reference to the same base table under a generated
    /// alias.
    #[must_use]
    pub fn alias(&self) -> Self {
        let n = self.aliases.fetch_add(1, Ordering::Relaxed) + 1;
        let alias = format!("{}_{n}", self.name);
        trace!(table = %self.name, alias = %alias, "generated table alias");
        Self {
            name: self.name.clone(),
            table_alias: Some(alias),
            engine: self.engine.clone(),
            aliases: Arc::clone(&self.aliases),
        }
    }

    /// Sets an explicit alias: `"users" "foo"`.
    pub fn set_table_alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.table_alias = Some(alias.into());
        self
    }

    /// Returns true when both handles refer to the same base table, i.e.
    /// one is the other or an alias produced from it.
    #[must_use]
    pub fn is_same_base(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.aliases, &other.aliases)
    }

    /// Returns an attribute qualified by this table's name or alias.
    #[must_use]
    pub fn attr(&self, name: impl Into<String>) -> Attribute {
        Attribute::new(Relation::Table(String::from(self.reference_name())), name)
    }

    /// Returns the qualified star projection: `"users".*`.
    #[must_use]
    pub fn star(&self) -> Node {
        Node::Star(Some(Relation::Table(String::from(self.reference_name()))))
    }

    /// Returns a common table expression `"name" AS (<stmt>)` for use in
    /// [`SelectManager::with`]. Statements bring their own parentheses; a
    /// raw literal must include them.
    #[must_use]
    pub fn cte(&self, stmt: impl Into<Node>) -> Node {
        Node::As {
            expr: Box::new(Node::Table(TableRef::new(self.name.clone()))),
            alias: Box::new(stmt.into()),
        }
    }

    /// Opens a select manager reading from this table. A table with an
    /// empty name leaves FROM unset.
    #[must_use]
    pub fn select_manager(&self) -> SelectManager {
        let manager = SelectManager::with_engine(self.engine.clone());
        if self.name.is_empty() {
            manager
        } else {
            manager.from(self)
        }
    }

    /// Shortcut for `select_manager().from(relation)`.
    #[must_use]
    pub fn from(&self, relation: impl IntoRelation) -> SelectManager {
        SelectManager::with_engine(self.engine.clone()).from(relation)
    }

    /// Shortcut for `select_manager().project(nodes)`.
    #[must_use]
    pub fn project<I>(&self, nodes: I) -> SelectManager
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.select_manager().project(nodes)
    }

    /// Shortcut for `select_manager().select(nodes)`.
    #[must_use]
    pub fn select<I>(&self, nodes: I) -> SelectManager
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.select_manager().select(nodes)
    }

    /// Shortcut for `select_manager().where_clause(predicate)`.
    #[must_use]
    pub fn where_clause(&self, predicate: impl Into<Node>) -> SelectManager {
        self.select_manager().where_clause(predicate)
    }

    /// Shortcut for `select_manager().join(relation)`.
    pub fn join(&self, relation: impl IntoRelation) -> JoinHandle {
        self.select_manager().join(relation)
    }

    /// Shortcut for `select_manager().outer_join(relation)`.
    pub fn outer_join(&self, relation: impl IntoRelation) -> JoinHandle {
        self.select_manager().outer_join(relation)
    }

    /// Shortcut for `select_manager().order(nodes)`.
    #[must_use]
    pub fn order<I>(&self, nodes: I) -> SelectManager
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.select_manager().order(nodes)
    }

    /// Shortcut for `select_manager().group(nodes)`.
    #[must_use]
    pub fn group<I>(&self, nodes: I) -> SelectManager
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.select_manager().group(nodes)
    }

    /// Shortcut for `select_manager().having(predicates)`.
    #[must_use]
    pub fn having<I>(&self, predicates: I) -> SelectManager
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.select_manager().having(predicates)
    }

    /// Shortcut for `select_manager().take(n)`.
    #[must_use]
    pub fn take(&self, n: u64) -> SelectManager {
        self.select_manager().take(n)
    }

    /// Shortcut for `select_manager().skip(n)`.
    #[must_use]
    pub fn skip(&self, n: u64) -> SelectManager {
        self.select_manager().skip(n)
    }

    /// Shortcut for `select_manager().offset(n)`.
    #[must_use]
    pub fn offset(&self, n: u64) -> SelectManager {
        self.select_manager().offset(n)
    }
}

impl From<&Table> for Node {
    fn from(table: &Table) -> Self {
        Self::Table(TableRef {
            name: table.name.clone(),
            alias: table.table_alias.clone(),
        })
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Self::Table(TableRef {
            name: table.name,
            alias: table.table_alias,
        })
    }
}

/// A sub-select used as a relation: `(SELECT ...) counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedTable {
    statement: SelectStatement,
    name: String,
}

impl DerivedTable {
    /// Wraps `statement` under `name`.
    #[must_use]
    pub fn new(statement: SelectStatement, name: impl Into<String>) -> Self {
        Self {
            statement,
            name: name.into(),
        }
    }

    /// Returns the derived table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns an attribute qualified by the derived table name.
    #[must_use]
    pub fn attr(&self, name: impl Into<String>) -> Attribute {
        Attribute::new(Relation::Derived(self.name.clone()), name)
    }
}

impl From<&DerivedTable> for Node {
    fn from(derived: &DerivedTable) -> Self {
        Self::TableAlias {
            relation: Box::new(Node::from(&derived.statement)),
            name: Box::new(Node::Literal(derived.name.clone())),
        }
    }
}

impl From<DerivedTable> for Node {
    fn from(derived: DerivedTable) -> Self {
        Self::TableAlias {
            relation: Box::new(Node::from(derived.statement)),
            name: Box::new(Node::Literal(derived.name)),
        }
    }
}

/// Anything that can appear in FROM or JOIN.
///
/// A bare name becomes a table reference; every other node is used as is.
pub trait IntoRelation {
    /// Converts into the relation node.
    fn into_relation(self) -> Node;
}

impl IntoRelation for &str {
    fn into_relation(self) -> Node {
        Node::Table(TableRef::new(self))
    }
}

impl IntoRelation for String {
    fn into_relation(self) -> Node {
        Node::Table(TableRef::new(self))
    }
}

impl IntoRelation for &Table {
    fn into_relation(self) -> Node {
        Node::from(self)
    }
}

impl IntoRelation for Table {
    fn into_relation(self) -> Node {
        Node::from(self)
    }
}

impl IntoRelation for &DerivedTable {
    fn into_relation(self) -> Node {
        Node::from(self)
    }
}

impl IntoRelation for DerivedTable {
    fn into_relation(self) -> Node {
        Node::from(self)
    }
}

impl IntoRelation for Node {
    fn into_relation(self) -> Node {
        self
    }
}
