// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed filter predicates rendered to SQL. Repositories build reads from
//! these instead of concatenating WHERE fragments by hand.

use chrono::NaiveDate;
use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Text(v.to_string())
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Int(v) => v.to_sql(),
            Value::Text(v) => v.to_sql(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pred {
    Eq(&'static str, Value),
    InSet(&'static str, Vec<Value>),
    /// Inclusive on both ends.
    Range(&'static str, Value, Value),
}

impl Pred {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Pred {
        Pred::Eq(column, value.into())
    }

    pub fn in_set<V: Into<Value>>(column: &'static str, values: impl IntoIterator<Item = V>) -> Pred {
        Pred::InSet(column, values.into_iter().map(Into::into).collect())
    }

    pub fn range(column: &'static str, lo: impl Into<Value>, hi: impl Into<Value>) -> Pred {
        Pred::Range(column, lo.into(), hi.into())
    }
}

/// Render predicates to a ` WHERE ...` clause (empty string for no
/// predicates) plus the bound values in placeholder order. An empty in-set
/// matches nothing; callers that mean "unconstrained" omit the predicate.
pub fn where_clause(preds: &[Pred]) -> (String, Vec<Value>) {
    let mut parts: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    for pred in preds {
        match pred {
            Pred::Eq(col, v) => {
                parts.push(format!("{}=?", col));
                values.push(v.clone());
            }
            Pred::InSet(col, vs) => {
                if vs.is_empty() {
                    parts.push("1=0".to_string());
                } else {
                    let marks = vec!["?"; vs.len()].join(",");
                    parts.push(format!("{} IN ({})", col, marks));
                    values.extend(vs.iter().cloned());
                }
            }
            Pred::Range(col, lo, hi) => {
                parts.push(format!("{}>=? AND {}<=?", col, col));
                values.push(lo.clone());
                values.push(hi.clone());
            }
        }
    }
    if parts.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", parts.join(" AND ")), values)
    }
}
