// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CategoryPatch, EntryKind, NewCategory};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

const COLS: &str = "id, user_id, name, parent_id, kind";

type RawRow = (i64, i64, String, Option<i64>, String);

fn decode((id, user_id, name, parent_id, kind): RawRow) -> Result<Category> {
    Ok(Category {
        id,
        user_id,
        name,
        parent_id,
        kind: EntryKind::parse(&kind)?,
    })
}

pub fn create(conn: &Connection, c: &NewCategory) -> Result<Category> {
    conn.execute(
        "INSERT INTO categories(user_id, name, parent_id, kind) VALUES (?1, ?2, ?3, ?4)",
        params![c.user_id, c.name, c.parent_id, c.kind.as_str()],
    )?;
    Ok(Category {
        id: conn.last_insert_rowid(),
        user_id: c.user_id,
        name: c.name.clone(),
        parent_id: c.parent_id,
        kind: c.kind,
    })
}

pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Category>> {
    let row: Option<RawRow> = conn
        .query_row(
            &format!("SELECT {} FROM categories WHERE id=?1", COLS),
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
        .optional()?;
    row.map(decode).transpose()
}

pub fn list_by_user(conn: &Connection, user_id: i64) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM categories WHERE user_id=?1 ORDER BY name",
        COLS
    ))?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?))
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(decode(row?)?);
    }
    Ok(out)
}

pub fn update(conn: &Connection, id: i64, patch: &CategoryPatch) -> Result<Option<Category>> {
    let Some(mut c) = get_by_id(conn, id)? else {
        return Ok(None);
    };
    if let Some(name) = &patch.name {
        c.name = name.clone();
    }
    if let Some(parent_id) = patch.parent_id {
        c.parent_id = Some(parent_id);
    }
    if let Some(kind) = patch.kind {
        c.kind = kind;
    }
    conn.execute(
        "UPDATE categories SET name=?1, parent_id=?2, kind=?3, updated_at=datetime('now')
         WHERE id=?4",
        params![c.name, c.parent_id, c.kind.as_str(), id],
    )?;
    Ok(Some(c))
}

/// Deliberately leaves transactions and budgets pointing at the removed
/// category; `doctor` reports the dangling references.
pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    Ok(n > 0)
}
