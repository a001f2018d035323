// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, BudgetPatch, NewBudget};
use crate::utils::{parse_date, parse_decimal};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

const COLS: &str = "id, user_id, name, amount, remain, category_id, from_date, to_date, recurring, note";

type RawRow = (
    i64,
    i64,
    String,
    String,
    String,
    i64,
    String,
    String,
    bool,
    Option<String>,
);

fn decode(row: RawRow, wallet_ids: Vec<i64>) -> Result<Budget> {
    let (id, user_id, name, amount, remain, category_id, from_date, to_date, recurring, note) = row;
    Ok(Budget {
        id,
        user_id,
        name,
        amount: parse_decimal(&amount)?,
        remain: parse_decimal(&remain)?,
        category_id,
        wallet_ids,
        from_date: parse_date(&from_date)?,
        to_date: parse_date(&to_date)?,
        recurring,
        note,
    })
}

fn wallet_ids_for(conn: &Connection, budget_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn
        .prepare("SELECT wallet_id FROM budget_wallets WHERE budget_id=?1 ORDER BY wallet_id")?;
    let rows = stmt.query_map(params![budget_id], |r| r.get::<_, i64>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// The row plus its wallet links, written atomically. A fresh budget
/// starts with `remain` equal to its full amount.
pub fn create(conn: &mut Connection, b: &NewBudget) -> Result<Budget> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO budgets(user_id, name, amount, remain, category_id, from_date, to_date, recurring, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            b.user_id,
            b.name,
            b.amount.to_string(),
            b.amount.to_string(),
            b.category_id,
            b.from_date.to_string(),
            b.to_date.to_string(),
            b.recurring,
            b.note,
        ],
    )?;
    let id = tx.last_insert_rowid();
    for wallet_id in &b.wallet_ids {
        tx.execute(
            "INSERT OR IGNORE INTO budget_wallets(budget_id, wallet_id) VALUES (?1, ?2)",
            params![id, wallet_id],
        )?;
    }
    tx.commit()?;
    get_by_id(conn, id)?.ok_or_else(|| anyhow::anyhow!("Budget {} missing after insert", id))
}

pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Budget>> {
    let row: Option<RawRow> = conn
        .query_row(
            &format!("SELECT {} FROM budgets WHERE id=?1", COLS),
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
                    r.get(7)?,
                    r.get(8)?,
                    r.get(9)?,
                ))
            },
        )
        .optional()?;
    match row {
        Some(row) => {
            let wallet_ids = wallet_ids_for(conn, id)?;
            Ok(Some(decode(row, wallet_ids)?))
        }
        None => Ok(None),
    }
}

pub fn list_by_user(conn: &Connection, user_id: i64) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM budgets WHERE user_id=?1 ORDER BY from_date, name",
        COLS
    ))?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok((
            r.get(0)?,
            r.get(1)?,
            r.get(2)?,
            r.get(3)?,
            r.get(4)?,
            r.get(5)?,
            r.get(6)?,
            r.get(7)?,
            r.get(8)?,
            r.get(9)?,
        ))
    })?;
    let mut raw = Vec::new();
    for row in rows {
        raw.push(row?);
    }
    let mut out = Vec::new();
    for row in raw {
        let wallet_ids = wallet_ids_for(conn, row.0)?;
        out.push(decode(row, wallet_ids)?);
    }
    Ok(out)
}

/// Partial update; replacing the wallet set rewrites the link rows in the
/// same atomic scope. Changing amount or window leaves `remain` stale
/// until the next refresh.
pub fn update(conn: &mut Connection, id: i64, patch: &BudgetPatch) -> Result<Option<Budget>> {
    let tx = conn.transaction()?;
    let Some(mut b) = get_by_id(&tx, id)? else {
        return Ok(None);
    };
    if let Some(name) = &patch.name {
        b.name = name.clone();
    }
    if let Some(amount) = patch.amount {
        b.amount = amount;
    }
    if let Some(category_id) = patch.category_id {
        b.category_id = category_id;
    }
    if let Some(from_date) = patch.from_date {
        b.from_date = from_date;
    }
    if let Some(to_date) = patch.to_date {
        b.to_date = to_date;
    }
    if let Some(recurring) = patch.recurring {
        b.recurring = recurring;
    }
    if let Some(note) = &patch.note {
        b.note = Some(note.clone());
    }
    tx.execute(
        "UPDATE budgets SET name=?1, amount=?2, category_id=?3, from_date=?4, to_date=?5,
         recurring=?6, note=?7, updated_at=datetime('now') WHERE id=?8",
        params![
            b.name,
            b.amount.to_string(),
            b.category_id,
            b.from_date.to_string(),
            b.to_date.to_string(),
            b.recurring,
            b.note,
            id,
        ],
    )?;
    if let Some(wallet_ids) = &patch.wallet_ids {
        tx.execute("DELETE FROM budget_wallets WHERE budget_id=?1", params![id])?;
        for wallet_id in wallet_ids {
            tx.execute(
                "INSERT OR IGNORE INTO budget_wallets(budget_id, wallet_id) VALUES (?1, ?2)",
                params![id, wallet_id],
            )?;
        }
        b.wallet_ids = wallet_ids_for(&tx, id)?;
    }
    tx.commit()?;
    Ok(Some(b))
}

pub fn update_remain(conn: &Connection, id: i64, remain: Decimal) -> Result<bool> {
    let n = conn.execute(
        "UPDATE budgets SET remain=?1, updated_at=datetime('now') WHERE id=?2",
        params![remain.to_string(), id],
    )?;
    Ok(n > 0)
}

/// Wallet links go with the row (FK cascade).
pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM budgets WHERE id=?1", params![id])?;
    Ok(n > 0)
}
