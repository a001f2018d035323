// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewWallet, Wallet, WalletPatch};
use crate::utils::{parse_date, parse_decimal};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

const COLS: &str = "id, user_id, name, kind, amount, from_date, to_date";

type RawRow = (
    i64,
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
);

fn decode((id, user_id, name, kind, amount, from_date, to_date): RawRow) -> Result<Wallet> {
    Ok(Wallet {
        id,
        user_id,
        name,
        kind,
        amount: parse_decimal(&amount)?,
        from_date: from_date.as_deref().map(parse_date).transpose()?,
        to_date: to_date.as_deref().map(parse_date).transpose()?,
    })
}

pub fn create(conn: &Connection, w: &NewWallet) -> Result<Wallet> {
    conn.execute(
        "INSERT INTO wallets(user_id, name, kind, amount, from_date, to_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            w.user_id,
            w.name,
            w.kind,
            w.amount.to_string(),
            w.from_date.map(|d| d.to_string()),
            w.to_date.map(|d| d.to_string()),
        ],
    )?;
    Ok(Wallet {
        id: conn.last_insert_rowid(),
        user_id: w.user_id,
        name: w.name.clone(),
        kind: w.kind.clone(),
        amount: w.amount,
        from_date: w.from_date,
        to_date: w.to_date,
    })
}

pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Wallet>> {
    let row: Option<RawRow> = conn
        .query_row(
            &format!("SELECT {} FROM wallets WHERE id=?1", COLS),
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

pub fn list_by_user(conn: &Connection, user_id: i64) -> Result<Vec<Wallet>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM wallets WHERE user_id=?1 ORDER BY name",
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
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(decode(row?)?);
    }
    Ok(out)
}

pub fn update(conn: &Connection, id: i64, patch: &WalletPatch) -> Result<Option<Wallet>> {
    let Some(mut w) = get_by_id(conn, id)? else {
        return Ok(None);
    };
    if let Some(name) = &patch.name {
        w.name = name.clone();
    }
    if let Some(kind) = &patch.kind {
        w.kind = kind.clone();
    }
    if let Some(amount) = patch.amount {
        w.amount = amount;
    }
    if let Some(from_date) = patch.from_date {
        w.from_date = Some(from_date);
    }
    if let Some(to_date) = patch.to_date {
        w.to_date = Some(to_date);
    }
    conn.execute(
        "UPDATE wallets SET name=?1, kind=?2, amount=?3, from_date=?4, to_date=?5,
         updated_at=datetime('now') WHERE id=?6",
        params![
            w.name,
            w.kind,
            w.amount.to_string(),
            w.from_date.map(|d| d.to_string()),
            w.to_date.map(|d| d.to_string()),
            id,
        ],
    )?;
    Ok(Some(w))
}

/// Deliberately leaves the wallet's transactions and budget links behind;
/// `doctor` reports the dangling references.
pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM wallets WHERE id=?1", params![id])?;
    Ok(n > 0)
}
