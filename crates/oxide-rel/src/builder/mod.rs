//! Fluent builders over the SQL tree.
//!
//! [`Table`] hands out attributes and aliases, [`SelectManager`] assembles a
//! statement, and [`MultiStatementManager`] combines two statements with a
//! set operator.

mod expr;
mod multi;
mod select;
mod table;

pub use expr::{function, null, quoted, sql, star};
pub use multi::MultiStatementManager;
pub use select::{JoinHandle, SelectManager, WindowBuilder};
pub use table::{DerivedTable, IntoRelation, Table};
