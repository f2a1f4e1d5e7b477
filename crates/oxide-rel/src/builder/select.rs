//! The fluent SELECT manager.
//!
//! A [`SelectManager`] owns one statement under construction. Each call
//! consumes the manager and hands it back, so calls chain:
//!
//! ```rust
//! use oxide_rel::{Table, star};
//!
//! let users = Table::new("users");
//! let other = users.alias();
//! let sql = users
//!     .select([star()])
//!     .join(&other)
//!     .on([users.attr("id").eq(other.attr("id"))])
//!     .to_sql();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM \"users\" INNER JOIN \"users\" \"users_2\" \
//!      ON \"users\".\"id\" = \"users_2\".\"id\""
//! );
//! ```
//!
//! Lists (projections, wheres, groups, orders, windows, joins) accumulate
//! in call order. Single slots (having, limit, offset, lock, with) keep the
//! last value set.

use tracing::{debug, trace};

use super::multi::MultiStatementManager;
use super::table::{DerivedTable, IntoRelation};
use crate::ast::{
    Frame, FrameBound, FrameExtent, FrameMode, Join, JoinConstraint, JoinKind, NamedWindow, Node,
    SelectCore, SelectStatement, SetOperator, Window, With,
};
use crate::dialect::Engine;
use crate::error::{BuildError, Result};
use crate::visitor::ToSql;

/// ANDs several predicates together; a single predicate is kept as is and
/// an empty list becomes an always-true `1=1`.
fn collapse<I>(predicates: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    let mut nodes: Vec<Node> = predicates.into_iter().map(Into::into).collect();
    if nodes.len() == 1 {
        if let Some(node) = nodes.pop() {
            return node;
        }
    }
    Node::And(nodes)
}

/// Builds a SELECT statement.
#[derive(Debug, Clone)]
pub struct SelectManager {
    engine: Engine,
    ast: SelectStatement,
    /// Index of the join entry waiting for ON/USING.
    pending_join: Option<usize>,
}

impl SelectManager {
    /// Creates an empty manager with the default engine.
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(Engine::default())
    }

    /// Creates an empty manager rendering with `engine`.
    #[must_use]
    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            ast: SelectStatement::new(),
            pending_join: None,
        }
    }

    /// Returns the statement built so far.
    #[must_use]
    pub const fn ast(&self) -> &SelectStatement {
        &self.ast
    }

    /// Consumes the manager and returns its statement.
    #[must_use]
    pub fn into_ast(self) -> SelectStatement {
        self.ast
    }

    /// Returns the engine used by [`SelectManager::to_sql`].
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Renders the statement.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let sql = ToSql::new(self.engine.dialect()).statement(&self.ast);
        trace!(sql = %sql, "rendered select statement");
        sql
    }

    fn core_mut(&mut self) -> &mut SelectCore {
        self.ast.core_mut()
    }

    /// Sets the primary relation. A bare name becomes a table reference.
    #[must_use]
    pub fn from(mut self, relation: impl IntoRelation) -> Self {
        self.core_mut().source.left = Some(relation.into_relation());
        self
    }

    /// Appends projections.
    #[must_use]
    pub fn project<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.core_mut()
            .projections
            .extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Alias of [`SelectManager::project`].
    #[must_use]
    pub fn select<I>(self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.project(nodes)
    }

    /// Appends a WHERE predicate. Predicates from separate calls are ANDed.
    ///
    /// Passing another manager embeds a copy of its statement.
    #[must_use]
    pub fn where_clause(mut self, predicate: impl Into<Node>) -> Self {
        self.core_mut().wheres.push(predicate.into());
        self
    }

    /// Appends an INNER JOIN and returns a handle to constrain it.
    pub fn join(self, relation: impl IntoRelation) -> JoinHandle {
        self.inner_join(relation)
    }

    /// Appends an INNER JOIN and returns a handle to constrain it.
    pub fn inner_join(self, relation: impl IntoRelation) -> JoinHandle {
        self.push_join(JoinKind::Inner, relation.into_relation())
    }

    /// Appends a LEFT OUTER JOIN and returns a handle to constrain it.
    pub fn outer_join(self, relation: impl IntoRelation) -> JoinHandle {
        self.push_join(JoinKind::Outer, relation.into_relation())
    }

    /// Appends a join written as raw SQL, e.g. `NATURAL JOIN tags`.
    #[must_use]
    pub fn join_raw(self, sql: impl Into<String>) -> Self {
        self.push_join(JoinKind::Raw, Node::Literal(sql.into())).manager
    }

    fn push_join(mut self, kind: JoinKind, relation: Node) -> JoinHandle {
        let joins = &mut self.core_mut().source.joins;
        joins.push(Join::new(kind, relation));
        let index = joins.len() - 1;
        self.pending_join = Some(index);
        JoinHandle {
            manager: self,
            index,
        }
    }

    /// Attaches `ON <predicates>` to the pending join; several predicates
    /// are ANDed.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NoPendingJoin`] when no join waits for a
    /// constraint, and [`BuildError::UnsupportedJoin`] when the pending
    /// join is raw SQL.
    pub fn on<I>(self, predicates: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.constrain("on", JoinConstraint::On(collapse(predicates)))
    }

    /// Attaches `USING("<column>")` to the pending join.
    ///
    /// # Errors
    ///
    /// Same as [`SelectManager::on`].
    pub fn using(self, column: impl Into<String>) -> Result<Self> {
        self.constrain("using", JoinConstraint::Using(column.into()))
    }

    fn constrain(mut self, call: &'static str, constraint: JoinConstraint) -> Result<Self> {
        let Some(index) = self.pending_join else {
            debug!(call, "join constraint without a pending join");
            return Err(BuildError::NoPendingJoin { call });
        };
        let Some(join) = self.ast.core_mut().source.joins.get_mut(index) else {
            return Err(BuildError::NoPendingJoin { call });
        };
        if join.kind == JoinKind::Raw {
            debug!(call, "join constraint on a raw join");
            return Err(BuildError::UnsupportedJoin {
                call,
                kind: join.kind.name(),
            });
        }
        join.constraint = Some(constraint);
        self.pending_join = None;
        Ok(self)
    }

    /// Appends GROUP BY expressions.
    #[must_use]
    pub fn group<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.core_mut()
            .groups
            .extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Alias of [`SelectManager::group`].
    #[must_use]
    pub fn group_by<I>(self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.group(nodes)
    }

    /// Sets HAVING, replacing any previous value; several predicates are
    /// ANDed. An empty list renders `HAVING 1=1`.
    #[must_use]
    pub fn having<I>(mut self, predicates: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.core_mut().having = Some(collapse(predicates));
        self
    }

    /// Appends ORDER BY entries. A bare string is emitted verbatim.
    #[must_use]
    pub fn order<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.ast.orders.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub fn limit(mut self, n: u64) -> Self {
        self.ast.limit = Some(Node::from(n));
        self
    }

    /// Alias of [`SelectManager::limit`].
    #[must_use]
    pub fn take(self, n: u64) -> Self {
        self.limit(n)
    }

    /// Sets OFFSET.
    #[must_use]
    pub fn offset(mut self, n: u64) -> Self {
        self.ast.offset = Some(Node::from(n));
        self
    }

    /// Alias of [`SelectManager::offset`].
    #[must_use]
    pub fn skip(self, n: u64) -> Self {
        self.offset(n)
    }

    /// Sets SELECT DISTINCT.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.core_mut().distinct = true;
        self
    }

    /// Clears SELECT DISTINCT.
    #[must_use]
    pub fn not_distinct(mut self) -> Self {
        self.core_mut().distinct = false;
        self
    }

    /// Sets the lock clause, emitted verbatim after everything else.
    #[must_use]
    pub fn lock(mut self, clause: impl Into<Node>) -> Self {
        self.ast.lock = Some(clause.into());
        self
    }

    /// Sets `FOR UPDATE`.
    #[must_use]
    pub fn lock_for_update(self) -> Self {
        self.lock("FOR UPDATE")
    }

    /// Sets a WITH prefix, replacing any previous WITH or WITH RECURSIVE.
    #[must_use]
    pub fn with<I>(self, ctes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.set_with(false, ctes)
    }

    /// Sets a WITH RECURSIVE prefix, replacing any previous WITH.
    #[must_use]
    pub fn with_recursive<I>(self, ctes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.set_with(true, ctes)
    }

    fn set_with<I>(mut self, recursive: bool, ctes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.ast.with = Some(With {
            recursive,
            ctes: ctes.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Declares a named window and returns a builder for its definition.
    pub fn window(mut self, name: impl Into<String>) -> WindowBuilder {
        let windows = &mut self.core_mut().windows;
        windows.push(NamedWindow {
            name: name.into(),
            window: Window::new(),
        });
        let index = windows.len() - 1;
        WindowBuilder {
            manager: self,
            index,
        }
    }

    /// `( left UNION right )`. The manager itself is left untouched.
    #[must_use]
    pub fn union(&self, left: impl Into<Node>, right: impl Into<Node>) -> MultiStatementManager {
        self.set_operation(SetOperator::Union, left, right)
    }

    /// `( left UNION ALL right )`.
    #[must_use]
    pub fn union_all(
        &self,
        left: impl Into<Node>,
        right: impl Into<Node>,
    ) -> MultiStatementManager {
        self.set_operation(SetOperator::UnionAll, left, right)
    }

    /// `( left INTERSECT right )`.
    #[must_use]
    pub fn intersect(
        &self,
        left: impl Into<Node>,
        right: impl Into<Node>,
    ) -> MultiStatementManager {
        self.set_operation(SetOperator::Intersect, left, right)
    }

    /// `( left EXCEPT right )`.
    #[must_use]
    pub fn except(&self, left: impl Into<Node>, right: impl Into<Node>) -> MultiStatementManager {
        self.set_operation(SetOperator::Except, left, right)
    }

    fn set_operation(
        &self,
        op: SetOperator,
        left: impl Into<Node>,
        right: impl Into<Node>,
    ) -> MultiStatementManager {
        MultiStatementManager::new(self.engine.clone(), op, left, right)
    }

    /// Returns `EXISTS (<this statement>)`.
    #[must_use]
    pub fn exists(&self) -> Node {
        Node::Exists(Box::new(self.ast.clone()))
    }

    /// Uses this statement as a derived table: `(SELECT ...) name`.
    #[must_use]
    pub fn alias(&self, name: impl Into<String>) -> DerivedTable {
        DerivedTable::new(self.ast.clone(), name)
    }
}

impl Default for SelectManager {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&SelectManager> for Node {
    fn from(manager: &SelectManager) -> Self {
        Self::from(manager.ast())
    }
}

impl From<SelectManager> for Node {
    fn from(manager: SelectManager) -> Self {
        Self::from(manager.into_ast())
    }
}

/// A join waiting for its ON or USING constraint.
#[must_use]
#[derive(Debug)]
pub struct JoinHandle {
    manager: SelectManager,
    index: usize,
}

impl JoinHandle {
    /// Attaches `ON <predicates>`; several predicates are ANDed.
    #[must_use]
    pub fn on<I>(self, predicates: I) -> SelectManager
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.attach(JoinConstraint::On(collapse(predicates)))
    }

    /// Attaches `USING("<column>")`.
    #[must_use]
    pub fn using(self, column: impl Into<String>) -> SelectManager {
        self.attach(JoinConstraint::Using(column.into()))
    }

    /// Leaves the join unconstrained for now and returns the manager; the
    /// join stays pending for [`SelectManager::on`].
    #[must_use]
    pub fn end(self) -> SelectManager {
        self.manager
    }

    fn attach(mut self, constraint: JoinConstraint) -> SelectManager {
        if let Some(join) = self.manager.core_mut().source.joins.get_mut(self.index) {
            join.constraint = Some(constraint);
        }
        self.manager.pending_join = None;
        self.manager
    }
}

/// Builds the definition of one named window.
#[must_use]
#[derive(Debug)]
pub struct WindowBuilder {
    manager: SelectManager,
    index: usize,
}

impl WindowBuilder {
    fn update(mut self, f: impl FnOnce(Window) -> Window) -> Self {
        if let Some(named) = self.manager.core_mut().windows.get_mut(self.index) {
            let window = std::mem::take(&mut named.window);
            named.window = f(window);
        }
        self
    }

    /// Appends PARTITION BY expressions.
    pub fn partition<I>(self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.update(|w| w.partition(nodes))
    }

    /// Appends ORDER BY entries.
    pub fn order<I>(self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.update(|w| w.order(nodes))
    }

    /// Sets a ROWS frame.
    pub fn rows(self, extent: impl Into<FrameExtent>) -> Self {
        self.frame(Frame::rows(extent))
    }

    /// Sets a RANGE frame.
    pub fn range(self, extent: impl Into<FrameExtent>) -> Self {
        self.frame(Frame::range(extent))
    }

    /// Sets the frame clause.
    pub fn frame(self, frame: Frame) -> Self {
        self.update(|w| w.frame(frame))
    }

    /// Sets a `BETWEEN start AND end` extent, keeping the frame mode
    /// already chosen (ROWS when there is none).
    pub fn between(self, start: FrameBound, end: FrameBound) -> Self {
        self.update(|w| {
            let mode = w.frame.as_ref().map_or(FrameMode::Rows, |f| f.mode);
            w.frame(Frame {
                mode,
                extent: FrameExtent::between(start, end),
            })
        })
    }

    /// Finishes the window and returns the manager.
    #[must_use]
    pub fn end(self) -> SelectManager {
        self.manager
    }

    /// Renders the whole statement.
    #[must_use]
    pub fn to_sql(&self) -> String {
        self.manager.to_sql()
    }
}
