// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{EntryKind, NewTransaction, Transaction, TransactionPatch};
use crate::query::{Pred, Value, where_clause};
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Result, ensure};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

const COLS: &str = "id, wallet_id, category_id, amount, kind, note, date";

// Open-ended sides of a date filter; TEXT comparison holds for these.
const DATE_MIN: &str = "0000-01-01";
const DATE_MAX: &str = "9999-12-31";

type RawRow = (i64, i64, i64, String, String, Option<String>, String);

fn decode((id, wallet_id, category_id, amount, kind, note, date): RawRow) -> Result<Transaction> {
    Ok(Transaction {
        id,
        wallet_id,
        category_id,
        amount: parse_decimal(&amount)?,
        kind: EntryKind::parse(&kind)?,
        note,
        date: parse_date(&date)?,
    })
}

/// Structured read filter; unset fields are unconstrained.
#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub wallet_id: Option<i64>,
    pub category_id: Option<i64>,
    pub kind: Option<EntryKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl TxFilter {
    fn preds(&self) -> Vec<Pred> {
        let mut preds = Vec::new();
        if let Some(wallet_id) = self.wallet_id {
            preds.push(Pred::eq("wallet_id", wallet_id));
        }
        if let Some(category_id) = self.category_id {
            preds.push(Pred::eq("category_id", category_id));
        }
        if let Some(kind) = self.kind {
            preds.push(Pred::eq("kind", kind.as_str()));
        }
        if self.from.is_some() || self.to.is_some() {
            let lo = self.from.map_or(DATE_MIN.to_string(), |d| d.to_string());
            let hi = self.to.map_or(DATE_MAX.to_string(), |d| d.to_string());
            preds.push(Pred::range("date", lo, hi));
        }
        preds
    }
}

pub fn create(conn: &Connection, t: &NewTransaction) -> Result<Transaction> {
    ensure!(
        t.amount.is_sign_positive() || t.amount.is_zero(),
        "Transaction amount must be a non-negative magnitude, got {}",
        t.amount
    );
    conn.execute(
        "INSERT INTO transactions(wallet_id, category_id, amount, kind, note, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            t.wallet_id,
            t.category_id,
            t.amount.to_string(),
            t.kind.as_str(),
            t.note,
            t.date.to_string(),
        ],
    )?;
    Ok(Transaction {
        id: conn.last_insert_rowid(),
        wallet_id: t.wallet_id,
        category_id: t.category_id,
        amount: t.amount,
        kind: t.kind,
        note: t.note.clone(),
        date: t.date,
    })
}

pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    let row: Option<RawRow> = conn
        .query_row(
            &format!("SELECT {} FROM transactions WHERE id=?1", COLS),
            params![id],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                ))
            },
        )
        .optional()?;
    row.map(decode).transpose()
}

pub fn list(conn: &Connection, filter: &TxFilter) -> Result<Vec<Transaction>> {
    let (where_sql, mut values) = where_clause(&filter.preds());
    let mut sql = format!(
        "SELECT {} FROM transactions{} ORDER BY date DESC, id DESC",
        COLS, where_sql
    );
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        values.push(Value::Int(limit as i64));
    }
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(values.iter()))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(decode((
            r.get(0)?,
            r.get(1)?,
            r.get(2)?,
            r.get(3)?,
            r.get(4)?,
            r.get(5)?,
            r.get(6)?,
        ))?);
    }
    Ok(out)
}

pub fn update(conn: &Connection, id: i64, patch: &TransactionPatch) -> Result<Option<Transaction>> {
    let Some(mut t) = get_by_id(conn, id)? else {
        return Ok(None);
    };
    if let Some(wallet_id) = patch.wallet_id {
        t.wallet_id = wallet_id;
    }
    if let Some(category_id) = patch.category_id {
        t.category_id = category_id;
    }
    if let Some(amount) = patch.amount {
        ensure!(
            amount.is_sign_positive() || amount.is_zero(),
            "Transaction amount must be a non-negative magnitude, got {}",
            amount
        );
        t.amount = amount;
    }
    if let Some(kind) = patch.kind {
        t.kind = kind;
    }
    if let Some(note) = &patch.note {
        t.note = Some(note.clone());
    }
    if let Some(date) = patch.date {
        t.date = date;
    }
    conn.execute(
        "UPDATE transactions SET wallet_id=?1, category_id=?2, amount=?3, kind=?4, note=?5, date=?6
         WHERE id=?7",
        params![
            t.wallet_id,
            t.category_id,
            t.amount.to_string(),
            t.kind.as_str(),
            t.note,
            t.date.to_string(),
            id,
        ],
    )?;
    Ok(Some(t))
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(n > 0)
}
