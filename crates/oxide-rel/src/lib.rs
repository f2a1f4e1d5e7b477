//! # oxide-rel
//!
//! A relational algebra tree for SQL SELECT statements, with a fluent
//! builder and an exact, deterministic renderer.
//!
//! This crate provides:
//! - A closed [`Node`] tree covering predicates, joins, windows and set
//!   operations
//! - A [`SelectManager`] that builds statements call by call
//! - Table aliasing with a per-table counter
//!
//! ## Building a query
//!
//! ```rust
//! use oxide_rel::{Table, quoted};
//!
//! let users = Table::new("users");
//! let sql = users
//!     .project([users.attr("id"), users.attr("name")])
//!     .where_clause(users.attr("name").matches(quoted("%bacon%")))
//!     .order([users.attr("id").desc()])
//!     .take(10)
//!     .to_sql();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT \"users\".\"id\", \"users\".\"name\" FROM \"users\" \
//!      WHERE \"users\".\"name\" LIKE '%bacon%' \
//!      ORDER BY \"users\".\"id\" DESC LIMIT 10"
//! );
//! ```
//!
//! ## Self joins
//!
//! Aliases are numbered per base table, starting at 2:
//!
//! ```rust
//! use oxide_rel::Table;
//!
//! let replies = Table::new("replies");
//! let parent = replies.alias();
//! let sql = replies
//!     .project([replies.attr("id")])
//!     .outer_join(&parent)
//!     .on([replies.attr("parent_id").eq(parent.attr("id"))])
//!     .to_sql();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT \"replies\".\"id\" FROM \"replies\" \
//!      LEFT OUTER JOIN \"replies\" \"replies_2\" \
//!      ON \"replies\".\"parent_id\" = \"replies_2\".\"id\""
//! );
//! ```
//!
//! Values passed through [`sql`] are emitted verbatim; quoting them is the
//! caller's job. Use [`quoted`] for string literals.

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod error;
pub mod visitor;

pub use ast::Node;
pub use builder::{
    function, null, quoted, sql, star, DerivedTable, MultiStatementManager, SelectManager, Table,
};
pub use dialect::{Dialect, Engine, GenericDialect};
pub use error::{BuildError, Result};
pub use visitor::render;
