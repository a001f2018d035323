// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketbook::query::{Pred, Value, where_clause};

#[test]
fn renders_eq_in_set_and_range() {
    let (sql, values) = where_clause(&[
        Pred::eq("kind", "expense"),
        Pred::eq("category_id", 7i64),
        Pred::range("date", "2025-01-01", "2025-01-31"),
        Pred::in_set("wallet_id", [1i64, 2, 3]),
    ]);
    assert_eq!(
        sql,
        " WHERE kind=? AND category_id=? AND date>=? AND date<=? AND wallet_id IN (?,?,?)"
    );
    assert_eq!(values.len(), 7);
    assert_eq!(values[0], Value::Text("expense".into()));
    assert_eq!(values[1], Value::Int(7));
    assert_eq!(values[4], Value::Int(1));
    assert_eq!(values[6], Value::Int(3));
}

#[test]
fn no_predicates_renders_no_where() {
    let (sql, values) = where_clause(&[]);
    assert_eq!(sql, "");
    assert!(values.is_empty());
}

#[test]
fn empty_in_set_matches_nothing() {
    let (sql, values) = where_clause(&[Pred::in_set("wallet_id", Vec::<i64>::new())]);
    assert_eq!(sql, " WHERE 1=0");
    assert!(values.is_empty());
}

#[test]
fn predicates_bind_against_sqlite() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE t(id INTEGER, kind TEXT, date TEXT);
         INSERT INTO t VALUES (1,'expense','2025-01-10'),(2,'income','2025-01-12'),(3,'expense','2025-02-01');",
    )
    .unwrap();
    let (sql, values) = where_clause(&[
        Pred::eq("kind", "expense"),
        Pred::range("date", "2025-01-01", "2025-01-31"),
    ]);
    let n: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM t{}", sql),
            rusqlite::params_from_iter(values.iter()),
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(n, 1);
}
