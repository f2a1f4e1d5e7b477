//! Set operations over two statements.

use tracing::trace;

use crate::ast::{Node, SetOperator};
use crate::dialect::Engine;
use crate::visitor::ToSql;

/// Holds `( left OP right )` for UNION, UNION ALL, INTERSECT and EXCEPT.
#[derive(Debug, Clone)]
pub struct MultiStatementManager {
    engine: Engine,
    ast: Node,
}

impl MultiStatementManager {
    /// Combines `left` and `right` with `op`.
    #[must_use]
    pub fn new(
        engine: Engine,
        op: SetOperator,
        left: impl Into<Node>,
        right: impl Into<Node>,
    ) -> Self {
        Self {
            engine,
            ast: Node::SetOperation {
                op,
                left: Box::new(left.into()),
                right: Box::new(right.into()),
            },
        }
    }

    /// Returns the set operation node.
    #[must_use]
    pub const fn ast(&self) -> &Node {
        &self.ast
    }

    /// Consumes the manager and returns the set operation node.
    #[must_use]
    pub fn into_ast(self) -> Node {
        self.ast
    }

    /// Renders the set operation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let sql = ToSql::new(self.engine.dialect()).accept(&self.ast);
        trace!(sql = %sql, "rendered set operation");
        sql
    }
}

impl From<&MultiStatementManager> for Node {
    fn from(manager: &MultiStatementManager) -> Self {
        manager.ast.clone()
    }
}

impl From<MultiStatementManager> for Node {
    fn from(manager: MultiStatementManager) -> Self {
        manager.ast
    }
}
