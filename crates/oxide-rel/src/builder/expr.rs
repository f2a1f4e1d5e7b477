//! Leaf constructors and predicate combinators.
//!
//! Comparisons are available on [`Attribute`] and on any [`Node`]. Each
//! operator comes in three forms: a single comparison, an `_any` form that
//! ORs one comparison per operand inside parentheses, and an `_all` form
//! that ANDs them.

use std::fmt;

use crate::ast::{Attribute, ComparisonOp, Function, Node, OrderDirection, WindowRef};

/// Creates a raw SQL literal, emitted verbatim.
///
/// The caller is responsible for quoting: `sql("'x'")` renders `'x'`.
#[must_use]
pub fn sql(value: impl fmt::Display) -> Node {
    Node::literal(value)
}

/// Creates a string literal quoted by the dialect: `quoted("a'b")`
/// renders `'a''b'`.
#[must_use]
pub fn quoted(text: impl Into<String>) -> Node {
    Node::Quoted(text.into())
}

/// The `*` projection.
#[must_use]
pub const fn star() -> Node {
    Node::Star(None)
}

/// The NULL value; comparing with `eq`/`not_eq` yields IS [NOT] NULL.
#[must_use]
pub const fn null() -> Node {
    Node::Null
}

/// Creates a call to a named function.
#[must_use]
pub fn function<I>(name: impl Into<String>, args: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    Node::Function(Function {
        name: name.into(),
        args: args.into_iter().map(Into::into).collect(),
        distinct: false,
    })
}

fn quantified<I>(left: &Node, op: ComparisonOp, operands: I, any: bool) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    let children = operands
        .into_iter()
        .map(|operand| Node::comparison(left.clone(), op, operand.into()))
        .collect();
    if any {
        Node::Or(children).grouping()
    } else {
        Node::And(children).grouping()
    }
}

fn aggregate(name: &str, expr: Node, distinct: bool) -> Node {
    Node::Function(Function {
        name: String::from(name),
        args: vec![expr],
        distinct,
    })
}

macro_rules! comparison_methods {
    ($($op:ident => $name:ident, $any:ident, $all:ident;)+) => {
        $(
            #[doc = concat!("Creates a `", stringify!($op), "` comparison.")]
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn $name(&self, other: impl Into<Node>) -> Node {
                Node::comparison(self.operand(), ComparisonOp::$op, other.into())
            }

            #[doc = concat!("ORs one `", stringify!($op), "` comparison per operand.")]
            #[must_use]
            pub fn $any<I>(&self, others: I) -> Node
            where
                I: IntoIterator,
                I::Item: Into<Node>,
            {
                quantified(&self.operand(), ComparisonOp::$op, others, true)
            }

            #[doc = concat!("ANDs one `", stringify!($op), "` comparison per operand.")]
            #[must_use]
            pub fn $all<I>(&self, others: I) -> Node
            where
                I: IntoIterator,
                I::Item: Into<Node>,
            {
                quantified(&self.operand(), ComparisonOp::$op, others, false)
            }
        )+
    };
}

macro_rules! impl_predications {
    ($($ty:ty),+) => {
        $(
            impl $ty {
                comparison_methods! {
                    Eq => eq, eq_any, eq_all;
                    NotEq => not_eq, not_eq_any, not_eq_all;
                    Gt => gt, gt_any, gt_all;
                    GtEq => gt_eq, gt_eq_any, gt_eq_all;
                    Lt => lt, lt_any, lt_all;
                    LtEq => lt_eq, lt_eq_any, lt_eq_all;
                    Matches => matches, matches_any, matches_all;
                    DoesNotMatch => does_not_match, does_not_match_any, does_not_match_all;
                }

                /// `IS NULL`.
                #[must_use]
                pub fn is_null(&self) -> Node {
                    self.eq(Node::Null)
                }

                /// `IS NOT NULL`.
                #[must_use]
                pub fn is_not_null(&self) -> Node {
                    self.not_eq(Node::Null)
                }

                /// `IN (...)`.
                #[must_use]
                pub fn in_list<I>(&self, values: I) -> Node
                where
                    I: IntoIterator,
                    I::Item: Into<Node>,
                {
                    Node::In {
                        expr: Box::new(self.operand()),
                        list: values.into_iter().map(Into::into).collect(),
                        negated: false,
                    }
                }

                /// `NOT IN (...)`.
                #[must_use]
                pub fn not_in_list<I>(&self, values: I) -> Node
                where
                    I: IntoIterator,
                    I::Item: Into<Node>,
                {
                    Node::In {
                        expr: Box::new(self.operand()),
                        list: values.into_iter().map(Into::into).collect(),
                        negated: true,
                    }
                }

                /// `COUNT(expr)`.
                #[must_use]
                pub fn count(&self) -> Node {
                    aggregate("COUNT", self.operand(), false)
                }

                /// `COUNT(DISTINCT expr)`.
                #[must_use]
                pub fn count_distinct(&self) -> Node {
                    aggregate("COUNT", self.operand(), true)
                }

                /// `SUM(expr)`.
                #[must_use]
                pub fn sum(&self) -> Node {
                    aggregate("SUM", self.operand(), false)
                }

                /// `MAX(expr)`.
                #[must_use]
                pub fn maximum(&self) -> Node {
                    aggregate("MAX", self.operand(), false)
                }

                /// `MIN(expr)`.
                #[must_use]
                pub fn minimum(&self) -> Node {
                    aggregate("MIN", self.operand(), false)
                }

                /// `AVG(expr)`.
                #[must_use]
                pub fn average(&self) -> Node {
                    aggregate("AVG", self.operand(), false)
                }

                /// `expr ASC`.
                #[must_use]
                pub fn asc(&self) -> Node {
                    Node::Ordering {
                        expr: Box::new(self.operand()),
                        direction: OrderDirection::Asc,
                    }
                }

                /// `expr DESC`.
                #[must_use]
                pub fn desc(&self) -> Node {
                    Node::Ordering {
                        expr: Box::new(self.operand()),
                        direction: OrderDirection::Desc,
                    }
                }

                /// `expr AS alias`; the alias is emitted as given.
                #[must_use]
                pub fn aliased(&self, alias: impl Into<Node>) -> Node {
                    Node::As {
                        expr: Box::new(self.operand()),
                        alias: Box::new(alias.into()),
                    }
                }

                /// `expr OVER window`.
                #[must_use]
                pub fn over(&self, window: impl Into<WindowRef>) -> Node {
                    Node::Over {
                        expr: Box::new(self.operand()),
                        window: window.into(),
                    }
                }
            }
        )+
    };
}

impl Attribute {
    fn operand(&self) -> Node {
        Node::Attribute(self.clone())
    }
}

impl Node {
    fn operand(&self) -> Self {
        self.clone()
    }
}

impl_predications!(Attribute, Node);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Relation;
    use crate::visitor::render;

    fn id() -> Attribute {
        Attribute::new(Relation::Table(String::from("users")), "id")
    }

    #[test]
    fn test_single_comparisons() {
        assert_eq!(render(&id().eq(sql(10))), "\"users\".\"id\" = 10");
        assert_eq!(render(&id().not_eq(sql(10))), "\"users\".\"id\" != 10");
        assert_eq!(render(&id().gt(10)), "\"users\".\"id\" > 10");
        assert_eq!(render(&id().gt_eq(10)), "\"users\".\"id\" >= 10");
        assert_eq!(render(&id().lt(10)), "\"users\".\"id\" < 10");
        assert_eq!(render(&id().lt_eq(10)), "\"users\".\"id\" <= 10");
    }

    #[test]
    fn test_nil_comparisons() {
        assert_eq!(render(&id().eq(None::<Node>)), "\"users\".\"id\" IS NULL");
        assert_eq!(render(&id().not_eq(null())), "\"users\".\"id\" IS NOT NULL");
        assert_eq!(render(&id().is_null()), "\"users\".\"id\" IS NULL");
        assert_eq!(render(&id().is_not_null()), "\"users\".\"id\" IS NOT NULL");
    }

    #[test]
    fn test_any_and_all() {
        assert_eq!(
            render(&id().eq_any([sql(1), sql(2)])),
            "(\"users\".\"id\" = 1 OR \"users\".\"id\" = 2)"
        );
        assert_eq!(
            render(&id().eq_all([sql(1), sql(2)])),
            "(\"users\".\"id\" = 1 AND \"users\".\"id\" = 2)"
        );
        assert_eq!(
            render(&id().lt_eq_any([1, 2, 3])),
            "(\"users\".\"id\" <= 1 OR \"users\".\"id\" <= 2 OR \"users\".\"id\" <= 3)"
        );
    }

    #[test]
    fn test_any_builds_grouped_or_at_construction() {
        match id().gt_any([1, 2]) {
            Node::Grouping(inner) => {
                assert!(matches!(*inner, Node::Or(ref children) if children.len() == 2));
            }
            other => panic!("expected a grouping, got {other:?}"),
        }
    }

    #[test]
    fn test_matches_keeps_operand_verbatim() {
        let name = Attribute::new(Relation::Table(String::from("users")), "name");
        assert_eq!(
            render(&name.matches(quoted("%bacon%"))),
            "\"users\".\"name\" LIKE '%bacon%'"
        );
        assert_eq!(
            render(&name.does_not_match(sql("'%bacon%'"))),
            "\"users\".\"name\" NOT LIKE '%bacon%'"
        );
    }

    #[test]
    fn test_in_list() {
        assert_eq!(render(&id().in_list([1, 2])), "\"users\".\"id\" IN (1, 2)");
        assert_eq!(
            render(&id().not_in_list([3])),
            "\"users\".\"id\" NOT IN (3)"
        );
        assert_eq!(render(&id().in_list(Vec::<Node>::new())), "1=0");
    }

    #[test]
    fn test_aggregates_and_aliases() {
        assert_eq!(render(&id().count()), "COUNT(\"users\".\"id\")");
        assert_eq!(
            render(&id().count_distinct()),
            "COUNT(DISTINCT \"users\".\"id\")"
        );
        assert_eq!(render(&id().maximum()), "MAX(\"users\".\"id\")");
        assert_eq!(
            render(&id().count().desc()),
            "COUNT(\"users\".\"id\") DESC"
        );
        assert_eq!(
            render(&id().sum().aliased(sql("total"))),
            "SUM(\"users\".\"id\") AS total"
        );
    }

    #[test]
    fn test_boolean_combinators() {
        let node = id().gt(1).and(id().lt(5)).or(id().eq(null()));
        assert_eq!(
            render(&node),
            "(\"users\".\"id\" > 1 AND \"users\".\"id\" < 5 OR \"users\".\"id\" IS NULL)"
        );
        assert_eq!(render(&id().eq(1).not()), "NOT (\"users\".\"id\" = 1)");
    }

    #[test]
    fn test_function_and_over() {
        let rank = function("RANK", Vec::<Node>::new());
        assert_eq!(render(&rank.over("w")), "RANK() OVER \"w\"");
    }
}
