#![allow(dead_code)]

use oxide_rel::{SelectManager, Table};

/// Installs a test subscriber so `RUST_LOG=oxide_rel=trace` shows the
/// rendered statements. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn users() -> Table {
    init_tracing();
    Table::new("users")
}

/// `SELECT "users"."id" FROM "users" WHERE <predicate>`.
pub fn select_id_where(users: &Table, predicate: oxide_rel::Node) -> SelectManager {
    users.project([users.attr("id")]).where_clause(predicate)
}

pub fn assert_sql(manager: &SelectManager, expected: &str) {
    let sql = manager.to_sql();
    assert_eq!(sql, expected, "\n  got:      {sql}\n  expected: {expected}");
}
