//! SELECT statement AST types.

use super::node::Node;
use super::window::NamedWindow;

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Outer,
    /// A join written as raw SQL; it cannot take a constraint.
    Raw,
}

impl JoinKind {
    /// Returns the SQL keyword, empty for raw joins.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Outer => "LEFT OUTER JOIN",
            Self::Raw => "",
        }
    }

    /// Returns a short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Outer => "outer",
            Self::Raw => "raw",
        }
    }
}

/// The right-hand side of a join.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    /// `ON <predicate>`.
    On(Node),
    /// `USING("<column>")`.
    Using(String),
}

/// One join entry of a join source.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The kind of join.
    pub kind: JoinKind,
    /// The joined relation.
    pub relation: Node,
    /// ON or USING, unset until the builder attaches one.
    pub constraint: Option<JoinConstraint>,
}

impl Join {
    /// Creates an unconstrained join entry.
    #[must_use]
    pub const fn new(kind: JoinKind, relation: Node) -> Self {
        Self {
            kind,
            relation,
            constraint: None,
        }
    }
}

/// The FROM clause of a core: one primary relation plus its joins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoinSource {
    /// The primary relation.
    pub left: Option<Node>,
    /// Join entries, in call order.
    pub joins: Vec<Join>,
}

/// One SELECT block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectCore {
    /// FROM relation and joins.
    pub source: JoinSource,
    /// Whether DISTINCT is set.
    pub distinct: bool,
    /// Projected expressions.
    pub projections: Vec<Node>,
    /// WHERE predicates, AND-joined when rendered.
    pub wheres: Vec<Node>,
    /// GROUP BY expressions.
    pub groups: Vec<Node>,
    /// HAVING predicate.
    pub having: Option<Node>,
    /// WINDOW definitions.
    pub windows: Vec<NamedWindow>,
}

/// A WITH prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    /// Whether this is WITH RECURSIVE.
    pub recursive: bool,
    /// The common table expressions.
    pub ctes: Vec<Node>,
}

/// A SELECT statement: one or more cores plus statement-level clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    cores: Vec<SelectCore>,
    /// WITH / WITH RECURSIVE prefix.
    pub with: Option<With>,
    /// ORDER BY entries.
    pub orders: Vec<Node>,
    /// LIMIT value.
    pub limit: Option<Node>,
    /// OFFSET value.
    pub offset: Option<Node>,
    /// Lock clause, e.g. `FOR UPDATE`.
    pub lock: Option<Node>,
}

impl SelectStatement {
    /// Creates a statement holding a single empty core.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cores: vec![SelectCore::default()],
            with: None,
            orders: vec![],
            limit: None,
            offset: None,
            lock: None,
        }
    }

    /// Returns every core in order. Never empty.
    #[must_use]
    pub fn cores(&self) -> &[SelectCore] {
        &self.cores
    }

    /// Returns the core under construction (the last one).
    #[must_use]
    pub fn core(&self) -> &SelectCore {
        let last = self.cores.len() - 1;
        &self.cores[last]
    }

    /// Returns the core under construction mutably.
    pub fn core_mut(&mut self) -> &mut SelectCore {
        let last = self.cores.len() - 1;
        &mut self.cores[last]
    }
}

impl Default for SelectStatement {
    fn default() -> Self {
        Self::new()
    }
}
