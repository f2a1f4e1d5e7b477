//! Select manager behavior: clauses, joins, windows, set operations and
//! cursor errors.

mod common;
use common::*;

use oxide_rel::ast::{Frame, FrameBound, FrameExtent, Window};
use oxide_rel::{quoted, sql, star, BuildError, Engine, SelectManager, Table};

fn age_filtered(users: &Table, predicate: oxide_rel::Node) -> SelectManager {
    users.project([star()]).where_clause(predicate)
}

#[test]
fn where_with_star_projection() {
    let users = users();
    assert_sql(
        &users.project([star()]).where_clause(users.attr("id").eq(1)),
        "SELECT * FROM \"users\" WHERE \"users\".\"id\" = 1",
    );
}

#[test]
fn scalar_subselect_in_comparison_is_parenthesized() {
    let users = users();
    let inner = users.project([users.attr("id")]).take(1);
    assert_sql(
        &users.project([star()]).where_clause(users.attr("id").eq(&inner)),
        "SELECT * FROM \"users\" WHERE \"users\".\"id\" = \
         (SELECT \"users\".\"id\" FROM \"users\" LIMIT 1)",
    );
}

#[test]
fn subselect_as_where_predicate_is_parenthesized() {
    let users = users();
    let inner = users.project([users.attr("id")]).take(1);
    assert_sql(
        &SelectManager::new().where_clause(&inner),
        "SELECT WHERE (SELECT \"users\".\"id\" FROM \"users\" LIMIT 1)",
    );
}

#[test]
fn in_subselect_is_wrapped_once() {
    let users = users();
    let admins = users
        .project([users.attr("id")])
        .where_clause(users.attr("role").eq(quoted("admin")));
    assert_sql(
        &users.project([star()]).where_clause(users.attr("id").in_list([&admins])),
        "SELECT * FROM \"users\" WHERE \"users\".\"id\" IN \
         (SELECT \"users\".\"id\" FROM \"users\" WHERE \"users\".\"role\" = 'admin')",
    );
}

#[test]
fn skip() {
    let users = users();
    assert_sql(&users.from(&users).skip(10), "SELECT FROM \"users\" OFFSET 10");
}

#[test]
fn offset() {
    let users = users();
    assert_sql(
        &users.from(&users).offset(10),
        "SELECT FROM \"users\" OFFSET 10",
    );
}

#[test]
fn exists() {
    let users = users();
    let inner = users.from(&users).project([sql("*")]);
    let outer = SelectManager::new().project([inner.exists()]);
    assert_eq!(outer.to_sql(), format!("SELECT EXISTS ({})", inner.to_sql()));
}

#[test]
fn exists_as() {
    let users = users();
    let inner = users.from(&users).project([sql("*")]);
    let outer = SelectManager::new().project([inner.exists().aliased(sql("foo"))]);
    assert_eq!(
        outer.to_sql(),
        format!("SELECT EXISTS ({}) AS foo", inner.to_sql())
    );
}

#[test]
fn union() {
    let users = users();
    let m1 = age_filtered(&users, users.attr("age").lt(18));
    let m2 = age_filtered(&users, users.attr("age").gt(99));
    assert_eq!(
        m1.union(&m1, &m2).to_sql(),
        "( SELECT * FROM \"users\" WHERE \"users\".\"age\" < 18 \
         UNION SELECT * FROM \"users\" WHERE \"users\".\"age\" > 99 )"
    );
}

#[test]
fn union_all() {
    let users = users();
    let m1 = age_filtered(&users, users.attr("age").lt(18));
    let m2 = age_filtered(&users, users.attr("age").gt(99));
    assert_eq!(
        m1.union_all(&m1, &m2).to_sql(),
        "( SELECT * FROM \"users\" WHERE \"users\".\"age\" < 18 \
         UNION ALL SELECT * FROM \"users\" WHERE \"users\".\"age\" > 99 )"
    );
}

#[test]
fn intersect() {
    let users = users();
    let m1 = age_filtered(&users, users.attr("age").lt(18));
    let m2 = age_filtered(&users, users.attr("age").gt(99));
    assert_eq!(
        m1.intersect(&m1, &m2).to_sql(),
        "( SELECT * FROM \"users\" WHERE \"users\".\"age\" < 18 \
         INTERSECT SELECT * FROM \"users\" WHERE \"users\".\"age\" > 99 )"
    );
}

#[test]
fn except() {
    let users = users();
    let m1 = age_filtered(&users, users.attr("age").lt(99));
    let m2 = age_filtered(&users, users.attr("age").lt(50));
    assert_eq!(
        m1.except(&m1, &m2).to_sql(),
        "( SELECT * FROM \"users\" WHERE \"users\".\"age\" < 99 \
         EXCEPT SELECT * FROM \"users\" WHERE \"users\".\"age\" < 50 )"
    );
}

#[test]
fn set_operation_leaves_manager_untouched() {
    let users = users();
    let m1 = age_filtered(&users, users.attr("age").lt(18));
    let before = m1.to_sql();
    let _ = m1.union(&m1, &m1);
    assert_eq!(m1.to_sql(), before);
}

#[test]
fn self_join() {
    let users = users();
    let other = users.alias();
    let manager = users
        .select([star()])
        .join(&other)
        .on([users.attr("id").eq(other.attr("id"))]);
    assert_sql(
        &manager,
        "SELECT * FROM \"users\" INNER JOIN \"users\" \"users_2\" \
         ON \"users\".\"id\" = \"users_2\".\"id\"",
    );
}

#[test]
fn on_with_multiple_arguments() {
    let users = users();
    let other = users.alias();
    let predicate = users.attr("id").eq(other.attr("id"));
    let manager = users
        .from(&users)
        .join(&other)
        .on([predicate.clone(), predicate]);
    assert_sql(
        &manager,
        "SELECT FROM \"users\" INNER JOIN \"users\" \"users_2\" \
         ON \"users\".\"id\" = \"users_2\".\"id\" AND \"users\".\"id\" = \"users_2\".\"id\"",
    );
}

#[test]
fn outer_join_using() {
    let users = users();
    let posts = Table::new("posts");
    let manager = users.project([star()]).outer_join(&posts).using("user_id");
    assert_sql(
        &manager,
        "SELECT * FROM \"users\" LEFT OUTER JOIN \"posts\" USING(\"user_id\")",
    );
}

#[test]
fn join_cursor_form() {
    let users = users();
    let posts = Table::new("posts");
    let manager = users
        .project([star()])
        .join(&posts)
        .end()
        .using("user_id")
        .expect("pending join");
    assert_sql(
        &manager,
        "SELECT * FROM \"users\" INNER JOIN \"posts\" USING(\"user_id\")",
    );
}

#[test]
fn raw_join_renders_verbatim() {
    let users = users();
    let manager = users.project([star()]).join_raw("NATURAL JOIN posts");
    assert_sql(&manager, "SELECT * FROM \"users\" NATURAL JOIN posts");
}

#[test]
fn cursor_errors() {
    let users = users();
    assert_eq!(
        users.select_manager().on([sql("1=1")]).unwrap_err(),
        BuildError::NoPendingJoin { call: "on" }
    );
    assert_eq!(
        users.select_manager().join_raw("CROSS JOIN t").using("id").unwrap_err(),
        BuildError::UnsupportedJoin {
            call: "using",
            kind: "raw"
        }
    );
}

#[test]
fn order() {
    let users = users();
    assert_sql(
        &users.select([star()]).order([users.attr("id")]),
        "SELECT * FROM \"users\" ORDER BY \"users\".\"id\"",
    );
}

#[test]
fn order_with_direction() {
    let users = users();
    assert_sql(
        &users.select([star()]).order([users.attr("id").desc()]),
        "SELECT * FROM \"users\" ORDER BY \"users\".\"id\" DESC",
    );
}

#[test]
fn order_with_attributes_for_expressions() {
    let users = users();
    assert_sql(
        &users.select([star()]).order([users.attr("id").count().desc()]),
        "SELECT * FROM \"users\" ORDER BY COUNT(\"users\".\"id\") DESC",
    );
}

#[test]
fn lock() {
    let users = users();
    assert_sql(
        &users.from(&users).lock_for_update(),
        "SELECT FROM \"users\" FOR UPDATE",
    );
}

#[test]
fn group() {
    let users = users();
    assert_sql(
        &users.group([users.attr("id")]),
        "SELECT FROM \"users\" GROUP BY \"users\".\"id\"",
    );
}

#[test]
fn distinct() {
    let users = users();
    assert_sql(
        &users.project([users.attr("name")]).distinct(),
        "SELECT DISTINCT \"users\".\"name\" FROM \"users\"",
    );
}

#[test]
fn window_empty() {
    let users = users();
    let manager = users.from(&users).window("a_window").end();
    assert_sql(&manager, "SELECT FROM \"users\" WINDOW \"a_window\" AS ()");
}

#[test]
fn window_with_orders() {
    let users = users();
    let manager = users
        .from(&users)
        .window("a_window")
        .order([users.attr("foo").asc()])
        .end();
    assert_sql(
        &manager,
        "SELECT FROM \"users\" WINDOW \"a_window\" AS (ORDER BY \"users\".\"foo\" ASC)",
    );
}

#[test]
fn window_row_frames() {
    let users = users();
    let cases = [
        (FrameBound::unbounded_preceding(), "ROWS UNBOUNDED PRECEDING"),
        (FrameBound::preceding(5), "ROWS 5 PRECEDING"),
        (FrameBound::unbounded_following(), "ROWS UNBOUNDED FOLLOWING"),
        (FrameBound::following(5), "ROWS 5 FOLLOWING"),
        (FrameBound::current_row(), "ROWS CURRENT ROW"),
    ];
    for (bound, frame_sql) in cases {
        let manager = users.from(&users).window("a_window").rows(bound).end();
        assert_sql(
            &manager,
            &format!("SELECT FROM \"users\" WINDOW \"a_window\" AS ({frame_sql})"),
        );
    }
}

#[test]
fn window_frame_between() {
    let users = users();
    let manager = users
        .from(&users)
        .window("a_window")
        .frame(Frame::rows(FrameExtent::between(
            FrameBound::unbounded_preceding(),
            FrameBound::current_row(),
        )))
        .end();
    assert_sql(
        &manager,
        "SELECT FROM \"users\" WINDOW \"a_window\" AS \
         (ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)",
    );
}

#[test]
fn window_range_frames() {
    let users = users();
    let unbounded = users
        .from(&users)
        .window("a_window")
        .range(FrameBound::unbounded_preceding())
        .end();
    assert_sql(
        &unbounded,
        "SELECT FROM \"users\" WINDOW \"a_window\" AS (RANGE UNBOUNDED PRECEDING)",
    );
    let bounded = users
        .from(&users)
        .window("a_window")
        .range(FrameBound::preceding(5))
        .end();
    assert_sql(
        &bounded,
        "SELECT FROM \"users\" WINDOW \"a_window\" AS (RANGE 5 PRECEDING)",
    );
}

#[test]
fn function_over_named_and_inline_windows() {
    let users = users();
    let manager = users
        .project([
            users.attr("id").count().over("w"),
            users
                .attr("id")
                .sum()
                .over(Window::new().partition([users.attr("team")])),
        ])
        .window("w")
        .order([users.attr("id")])
        .end();
    assert_sql(
        &manager,
        "SELECT COUNT(\"users\".\"id\") OVER \"w\", \
         SUM(\"users\".\"id\") OVER (PARTITION BY \"users\".\"team\") \
         FROM \"users\" WINDOW \"w\" AS (ORDER BY \"users\".\"id\")",
    );
}

#[test]
fn join_multiple_tables() {
    let users = users();
    let comments = Table::new("comments");
    let counts = comments
        .from(&comments)
        .group([comments.attr("user_id")])
        .project([
            comments.attr("user_id").aliased(sql("user_id")),
            comments.attr("user_id").count().aliased(sql("count")),
        ])
        .alias("counts");
    let manager = users
        .join(&counts)
        .on([counts.attr("user_id").eq(sql(10))]);
    assert_sql(
        &manager,
        "SELECT FROM \"users\" INNER JOIN (SELECT \"comments\".\"user_id\" AS user_id, \
         COUNT(\"comments\".\"user_id\") AS count FROM \"comments\" \
         GROUP BY \"comments\".\"user_id\") counts ON counts.\"user_id\" = 10",
    );
}

#[test]
fn common_table_expressions() {
    let users = users();
    let admins = Table::new("admins");
    let admin_ids = users
        .project([users.attr("id")])
        .where_clause(users.attr("role").eq(quoted("admin")));
    let manager = admins
        .project([star()])
        .with([admins.cte(&admin_ids)]);
    assert_sql(
        &manager,
        "WITH \"admins\" AS (SELECT \"users\".\"id\" FROM \"users\" \
         WHERE \"users\".\"role\" = 'admin') SELECT * FROM \"admins\"",
    );

    let recursive = manager.with_recursive([admins.cte(&admin_ids)]);
    assert!(recursive.to_sql().starts_with("WITH RECURSIVE \"admins\" AS ("));
}

#[test]
fn subselect_in_where_is_a_snapshot() {
    let users = users();
    let inner = users.project([users.attr("id")]);
    let outer = users
        .project([star()])
        .where_clause(users.attr("id").in_list([sql(1)]).or(inner.exists()));
    let _changed = inner.take(1);
    assert_sql(
        &outer,
        "SELECT * FROM \"users\" WHERE (\"users\".\"id\" IN (1) OR \
         EXISTS (SELECT \"users\".\"id\" FROM \"users\"))",
    );
}

#[test]
fn rendering_is_idempotent() {
    let users = users();
    let manager = users
        .project([users.attr("id")])
        .where_clause(users.attr("id").gt(1))
        .take(5);
    assert_eq!(manager.to_sql(), manager.to_sql());
}

#[test]
fn explicit_engine_is_carried() {
    init_tracing();
    let users = Table::with_engine("users", Engine::default());
    let manager = users.project([star()]);
    assert_eq!(format!("{:?}", manager.engine()), "Engine { dialect: \"generic\" }");
    assert_sql(&manager, "SELECT * FROM \"users\"");
}
