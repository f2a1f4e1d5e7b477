//! The SQL tree.
//!
//! Nodes are plain data; rendering lives in [`crate::visitor`].

mod node;
mod select;
mod window;

pub use node::{
    Attribute, ComparisonOp, Function, Node, OrderDirection, Relation, SetOperator, TableRef,
    WindowRef,
};
pub use select::{Join, JoinConstraint, JoinKind, JoinSource, SelectCore, SelectStatement, With};
pub use window::{Frame, FrameBound, FrameExtent, FrameMode, NamedWindow, Window};
