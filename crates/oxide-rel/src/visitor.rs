//! SQL text rendering.
//!
//! [`ToSql`] walks a tree and writes SQL into a buffer. It never mutates
//! the tree, so rendering the same tree twice yields the same text, and
//! one visitor can be shared between threads.
//!
//! # Example
//!
//! ```rust
//! use oxide_rel::ast::{ComparisonOp, Node, TableRef};
//! use oxide_rel::visitor::render;
//!
//! let node = Node::comparison(
//!     Node::from(TableRef::new("users")),
//!     ComparisonOp::Eq,
//!     Node::Null,
//! );
//! assert_eq!(render(&node), "\"users\" IS NULL");
//! ```

use crate::ast::{
    Attribute, ComparisonOp, Frame, FrameBound, FrameExtent, Function, Join, JoinConstraint,
    JoinKind, NamedWindow, Node, Relation, SelectCore, SelectStatement, TableRef, Window,
    WindowRef,
};
use crate::dialect::{Dialect, GenericDialect};

/// Renders a node with the generic dialect.
#[must_use]
pub fn render(node: &Node) -> String {
    ToSql::new(&GenericDialect).accept(node)
}

/// The SQL renderer for one dialect.
#[derive(Clone, Copy)]
pub struct ToSql<'d> {
    dialect: &'d dyn Dialect,
}

impl<'d> ToSql<'d> {
    /// Creates a renderer for `dialect`.
    #[must_use]
    pub const fn new(dialect: &'d dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Renders a node.
    #[must_use]
    pub fn accept(&self, node: &Node) -> String {
        let mut out = String::new();
        self.visit(node, &mut out);
        out
    }

    /// Renders a statement.
    #[must_use]
    pub fn statement(&self, stmt: &SelectStatement) -> String {
        let mut out = String::new();
        self.visit_statement(stmt, &mut out);
        out
    }

    fn visit(&self, node: &Node, out: &mut String) {
        match node {
            Node::Literal(sql) => out.push_str(sql),
            Node::Quoted(text) => out.push_str(&self.dialect.quote_string(text)),
            Node::Null => out.push_str("NULL"),
            Node::Table(table) => self.visit_table(table, out),
            Node::TableAlias { relation, name } => {
                self.visit(relation, out);
                out.push(' ');
                self.visit(name, out);
            }
            Node::Attribute(attr) => self.visit_attribute(attr, out),
            Node::Grouping(inner) => {
                out.push('(');
                self.visit(inner, out);
                out.push(')');
            }
            // An empty conjunction is true and an empty disjunction false.
            Node::And(children) if children.is_empty() => out.push_str("1=1"),
            Node::And(children) => self.visit_list(children, " AND ", out),
            Node::Or(children) if children.is_empty() => out.push_str("1=0"),
            Node::Or(children) => self.visit_list(children, " OR ", out),
            Node::Not(inner) => {
                out.push_str("NOT (");
                self.visit(inner, out);
                out.push(')');
            }
            Node::Comparison { op, left, right } => self.visit_comparison(*op, left, right, out),
            Node::In {
                expr,
                list,
                negated,
            } => self.visit_in(expr, list, *negated, out),
            Node::Function(function) => self.visit_function(function, out),
            Node::As { expr, alias } => {
                self.visit(expr, out);
                out.push_str(" AS ");
                self.visit(alias, out);
            }
            Node::Ordering { expr, direction } => {
                self.visit(expr, out);
                out.push(' ');
                out.push_str(direction.as_str());
            }
            Node::Exists(stmt) => {
                out.push_str("EXISTS (");
                self.visit_statement(stmt, out);
                out.push(')');
            }
            Node::Over { expr, window } => {
                self.visit(expr, out);
                out.push_str(" OVER ");
                match window {
                    WindowRef::Named(name) => out.push_str(&self.dialect.quote_identifier(name)),
                    WindowRef::Inline(window) => {
                        out.push('(');
                        self.visit_window(window, out);
                        out.push(')');
                    }
                }
            }
            Node::Select(stmt) => {
                out.push('(');
                self.visit_statement(stmt, out);
                out.push(')');
            }
            Node::SetOperation { op, left, right } => {
                out.push_str("( ");
                self.visit_set_operand(left, out);
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                self.visit_set_operand(right, out);
                out.push_str(" )");
            }
            Node::Star(relation) => {
                match relation {
                    Some(Relation::Table(name)) => {
                        out.push_str(&self.dialect.quote_identifier(name));
                        out.push('.');
                    }
                    Some(Relation::Derived(name)) => {
                        out.push_str(name);
                        out.push('.');
                    }
                    None => {}
                }
                out.push('*');
            }
        }
    }

    /// The set operation supplies the parentheses, so statements on either
    /// side are written bare.
    fn visit_set_operand(&self, node: &Node, out: &mut String) {
        match node {
            Node::Select(stmt) => self.visit_statement(stmt, out),
            other => self.visit(other, out),
        }
    }

    fn visit_list(&self, nodes: &[Node], separator: &str, out: &mut String) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.visit(node, out);
        }
    }

    fn visit_table(&self, table: &TableRef, out: &mut String) {
        out.push_str(&self.dialect.quote_identifier(&table.name));
        if let Some(alias) = &table.alias {
            out.push(' ');
            out.push_str(&self.dialect.quote_identifier(alias));
        }
    }

    fn visit_attribute(&self, attr: &Attribute, out: &mut String) {
        match &attr.relation {
            Relation::Table(name) => out.push_str(&self.dialect.quote_identifier(name)),
            Relation::Derived(name) => out.push_str(name),
        }
        out.push('.');
        out.push_str(&self.dialect.quote_identifier(&attr.name));
    }

    fn visit_comparison(&self, op: ComparisonOp, left: &Node, right: &Node, out: &mut String) {
        self.visit(left, out);
        match (op, right) {
            (ComparisonOp::Eq, Node::Null) => out.push_str(" IS NULL"),
            (ComparisonOp::NotEq, Node::Null) => out.push_str(" IS NOT NULL"),
            _ => {
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                self.visit(right, out);
            }
        }
    }

    fn visit_in(&self, expr: &Node, list: &[Node], negated: bool, out: &mut String) {
        // Nothing is IN an empty list; everything is NOT IN it.
        if list.is_empty() {
            out.push_str(if negated { "1=1" } else { "1=0" });
            return;
        }
        self.visit(expr, out);
        out.push_str(if negated { " NOT IN (" } else { " IN (" });
        match list {
            [Node::Select(stmt)] => self.visit_statement(stmt, out),
            _ => self.visit_list(list, ", ", out),
        }
        out.push(')');
    }

    fn visit_function(&self, function: &Function, out: &mut String) {
        out.push_str(&function.name);
        out.push('(');
        if function.distinct {
            out.push_str("DISTINCT ");
        }
        self.visit_list(&function.args, ", ", out);
        out.push(')');
    }

    fn visit_statement(&self, stmt: &SelectStatement, out: &mut String) {
        if let Some(with) = stmt.with.as_ref().filter(|w| !w.ctes.is_empty()) {
            out.push_str(if with.recursive {
                "WITH RECURSIVE "
            } else {
                "WITH "
            });
            self.visit_list(&with.ctes, ", ", out);
            out.push(' ');
        }

        for (i, core) in stmt.cores().iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            self.visit_core(core, out);
        }

        if !stmt.orders.is_empty() {
            out.push_str(" ORDER BY ");
            self.visit_list(&stmt.orders, ", ", out);
        }
        if let Some(limit) = &stmt.limit {
            out.push_str(" LIMIT ");
            self.visit(limit, out);
        }
        if let Some(offset) = &stmt.offset {
            out.push_str(" OFFSET ");
            self.visit(offset, out);
        }
        if let Some(lock) = &stmt.lock {
            out.push(' ');
            self.visit(lock, out);
        }
    }

    fn visit_core(&self, core: &SelectCore, out: &mut String) {
        out.push_str("SELECT");
        if core.distinct {
            out.push_str(" DISTINCT");
        }
        if !core.projections.is_empty() {
            out.push(' ');
            self.visit_list(&core.projections, ", ", out);
        }
        if let Some(left) = &core.source.left {
            out.push_str(" FROM ");
            self.visit(left, out);
        }
        for join in &core.source.joins {
            out.push(' ');
            self.visit_join(join, out);
        }
        if !core.wheres.is_empty() {
            out.push_str(" WHERE ");
            self.visit_list(&core.wheres, " AND ", out);
        }
        if !core.groups.is_empty() {
            out.push_str(" GROUP BY ");
            self.visit_list(&core.groups, ", ", out);
        }
        if let Some(having) = &core.having {
            out.push_str(" HAVING ");
            self.visit(having, out);
        }
        if !core.windows.is_empty() {
            out.push_str(" WINDOW ");
            for (i, named) in core.windows.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.visit_named_window(named, out);
            }
        }
    }

    fn visit_join(&self, join: &Join, out: &mut String) {
        if join.kind == JoinKind::Raw {
            self.visit(&join.relation, out);
            return;
        }
        out.push_str(join.kind.as_str());
        out.push(' ');
        self.visit(&join.relation, out);
        match &join.constraint {
            Some(JoinConstraint::On(predicate)) => {
                out.push_str(" ON ");
                self.visit(predicate, out);
            }
            Some(JoinConstraint::Using(column)) => {
                out.push_str(" USING(");
                out.push_str(&self.dialect.quote_identifier(column));
                out.push(')');
            }
            None => {}
        }
    }

    fn visit_named_window(&self, named: &NamedWindow, out: &mut String) {
        out.push_str(&self.dialect.quote_identifier(&named.name));
        out.push_str(" AS (");
        self.visit_window(&named.window, out);
        out.push(')');
    }

    fn visit_window(&self, window: &Window, out: &mut String) {
        let mut started = false;
        if !window.partitions.is_empty() {
            out.push_str("PARTITION BY ");
            self.visit_list(&window.partitions, ", ", out);
            started = true;
        }
        if !window.orders.is_empty() {
            if started {
                out.push(' ');
            }
            out.push_str("ORDER BY ");
            self.visit_list(&window.orders, ", ", out);
            started = true;
        }
        if let Some(frame) = &window.frame {
            if started {
                out.push(' ');
            }
            self.visit_frame(frame, out);
        }
    }

    fn visit_frame(&self, frame: &Frame, out: &mut String) {
        out.push_str(frame.mode.as_str());
        out.push(' ');
        match &frame.extent {
            FrameExtent::Bound(bound) => self.visit_bound(bound, out),
            FrameExtent::Between(start, end) => {
                out.push_str("BETWEEN ");
                self.visit_bound(start, out);
                out.push_str(" AND ");
                self.visit_bound(end, out);
            }
        }
    }

    fn visit_bound(&self, bound: &FrameBound, out: &mut String) {
        let (offset, keyword) = match bound {
            FrameBound::Preceding(offset) => (offset, "PRECEDING"),
            FrameBound::Following(offset) => (offset, "FOLLOWING"),
            FrameBound::CurrentRow => {
                out.push_str("CURRENT ROW");
                return;
            }
        };
        match offset {
            Some(expr) => self.visit(expr, out),
            None => out.push_str("UNBOUNDED"),
        }
        out.push(' ');
        out.push_str(keyword);
    }
}
