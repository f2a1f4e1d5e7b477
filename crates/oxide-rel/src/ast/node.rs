//! Expression node types.

use std::fmt;

use super::select::SelectStatement;
use super::window::Window;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    /// Pattern match (`LIKE`).
    Matches,
    /// Negated pattern match (`NOT LIKE`).
    DoesNotMatch,
}

impl ComparisonOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Matches => "LIKE",
            Self::DoesNotMatch => "NOT LIKE",
        }
    }
}

/// Order direction for ORDER BY entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Set operators combining two statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOperator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// A table reference, optionally aliased: `"users"` or `"users" "users_2"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Base table name.
    pub name: String,
    /// Table alias.
    pub alias: Option<String>,
}

impl TableRef {
    /// Creates an unaliased table reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Returns the name columns are qualified with: the alias if any.
    #[must_use]
    pub fn reference_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// The relation an attribute is qualified with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    /// A table or table alias, rendered as a quoted identifier.
    Table(String),
    /// A derived table name, rendered verbatim.
    Derived(String),
}

/// A column bound to a relation: `"users"."id"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The qualifying relation.
    pub relation: Relation,
    /// Column name.
    pub name: String,
}

impl Attribute {
    /// Creates an attribute qualified by `relation`.
    #[must_use]
    pub fn new(relation: Relation, name: impl Into<String>) -> Self {
        Self {
            relation,
            name: name.into(),
        }
    }
}

/// A function call such as `COUNT("users"."id")`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function name, emitted verbatim.
    pub name: String,
    /// Arguments.
    pub args: Vec<Node>,
    /// Whether DISTINCT precedes the arguments.
    pub distinct: bool,
}

/// The window a function is evaluated over.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowRef {
    /// A window declared in the WINDOW clause.
    Named(String),
    /// An inline window definition.
    Inline(Window),
}

impl From<&str> for WindowRef {
    fn from(name: &str) -> Self {
        Self::Named(String::from(name))
    }
}

impl From<String> for WindowRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Window> for WindowRef {
    fn from(window: Window) -> Self {
        Self::Inline(window)
    }
}

/// A node of the SQL tree.
///
/// The set of variants is closed: the renderer matches on every one of
/// them, so a new variant cannot be added without a rendering rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Raw SQL emitted verbatim.
    Literal(String),

    /// A string literal, single-quoted when rendered.
    Quoted(String),

    /// The NULL value.
    Null,

    /// `*`, or `"users".*` when qualified by a relation.
    Star(Option<Relation>),

    /// A table reference.
    Table(TableRef),

    /// A named derived relation, e.g. a sub-select: `(SELECT ...) counts`.
    TableAlias {
        /// The aliased relation.
        relation: Box<Node>,
        /// The alias, emitted as given.
        name: Box<Node>,
    },

    /// A qualified column.
    Attribute(Attribute),

    /// A parenthesized expression.
    Grouping(Box<Node>),

    /// Conjunction of every child.
    And(Vec<Node>),

    /// Disjunction of every child.
    Or(Vec<Node>),

    /// Negation.
    Not(Box<Node>),

    /// A binary comparison.
    Comparison {
        /// Operator.
        op: ComparisonOp,
        /// Left operand.
        left: Box<Node>,
        /// Right operand.
        right: Box<Node>,
    },

    /// IN / NOT IN list membership.
    In {
        /// The tested expression.
        expr: Box<Node>,
        /// Candidate values.
        list: Vec<Node>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// A function call.
    Function(Function),

    /// `expr AS alias`.
    As {
        /// The aliased expression.
        expr: Box<Node>,
        /// The alias, emitted as given.
        alias: Box<Node>,
    },

    /// An ORDER BY entry with explicit direction.
    Ordering {
        /// The ordered expression.
        expr: Box<Node>,
        /// Direction.
        direction: OrderDirection,
    },

    /// `EXISTS (<statement>)`.
    Exists(Box<SelectStatement>),

    /// `expr OVER window`.
    Over {
        /// The windowed expression.
        expr: Box<Node>,
        /// The window.
        window: WindowRef,
    },

    /// An embedded SELECT statement, parenthesized unless it is an operand
    /// of a set operation.
    Select(Box<SelectStatement>),

    /// Two statements combined by a set operator.
    SetOperation {
        /// Operator.
        op: SetOperator,
        /// Left statement.
        left: Box<Node>,
        /// Right statement.
        right: Box<Node>,
    },
}

impl Node {
    /// Creates a raw SQL literal from anything displayable.
    #[must_use]
    pub fn literal(value: impl fmt::Display) -> Self {
        Self::Literal(value.to_string())
    }

    /// Creates a comparison node.
    #[must_use]
    pub fn comparison(left: Self, op: ComparisonOp, right: Self) -> Self {
        Self::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Wraps the node in parentheses.
    #[must_use]
    pub fn grouping(self) -> Self {
        Self::Grouping(Box::new(self))
    }

    /// Creates an AND of this node and `other`.
    #[must_use]
    pub fn and(self, other: impl Into<Self>) -> Self {
        Self::And(vec![self, other.into()])
    }

    /// Creates a parenthesized OR of this node and `other`.
    #[must_use]
    pub fn or(self, other: impl Into<Self>) -> Self {
        Self::Or(vec![self, other.into()]).grouping()
    }

    /// Negates the node.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

impl From<&str> for Node {
    fn from(sql: &str) -> Self {
        Self::Literal(String::from(sql))
    }
}

impl From<String> for Node {
    fn from(sql: String) -> Self {
        Self::Literal(sql)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Self::Literal(value.to_string())
                }
            }
        )+
    };
}

impl_from_number!(i32, i64, u32, u64, usize);

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<TableRef> for Node {
    fn from(table: TableRef) -> Self {
        Self::Table(table)
    }
}

impl From<Attribute> for Node {
    fn from(attr: Attribute) -> Self {
        Self::Attribute(attr)
    }
}

impl From<&Attribute> for Node {
    fn from(attr: &Attribute) -> Self {
        Self::Attribute(attr.clone())
    }
}

impl From<Function> for Node {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<SelectStatement> for Node {
    fn from(stmt: SelectStatement) -> Self {
        Self::Select(Box::new(stmt))
    }
}

/// Embeds a copy of the statement. Changes made to the source afterwards
/// do not reach the embedding tree.
impl From<&SelectStatement> for Node {
    fn from(stmt: &SelectStatement) -> Self {
        Self::Select(Box::new(stmt.clone()))
    }
}
