// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewUser, User, UserPatch};
use crate::utils::hash_password;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

const COLS: &str = "id, name, email, password_hash";

fn map_row(r: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: r.get(0)?,
        name: r.get(1)?,
        email: r.get(2)?,
        password_hash: r.get(3)?,
    })
}

pub fn create(conn: &Connection, u: &NewUser) -> Result<User> {
    let password_hash = hash_password(&u.password);
    conn.execute(
        "INSERT INTO users(name, email, password_hash) VALUES (?1, ?2, ?3)",
        params![u.name, u.email, password_hash],
    )?;
    Ok(User {
        id: conn.last_insert_rowid(),
        name: u.name.clone(),
        email: u.email.clone(),
        password_hash,
    })
}

pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<User>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE id=?1", COLS),
            params![id],
            map_row,
        )
        .optional()?;
    Ok(row)
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE email=?1", COLS),
            params![email],
            map_row,
        )
        .optional()?;
    Ok(row)
}

pub fn list(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM users ORDER BY id", COLS))?;
    let rows = stmt.query_map([], map_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn update(conn: &Connection, id: i64, patch: &UserPatch) -> Result<Option<User>> {
    let Some(mut u) = get_by_id(conn, id)? else {
        return Ok(None);
    };
    if let Some(name) = &patch.name {
        u.name = name.clone();
    }
    if let Some(email) = &patch.email {
        u.email = email.clone();
    }
    if let Some(password) = &patch.password {
        u.password_hash = hash_password(password);
    }
    conn.execute(
        "UPDATE users SET name=?1, email=?2, password_hash=?3, updated_at=datetime('now')
         WHERE id=?4",
        params![u.name, u.email, u.password_hash, id],
    )?;
    Ok(Some(u))
}

/// Cascades to the user's wallets, categories, budgets, and notifications.
pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM users WHERE id=?1", params![id])?;
    Ok(n > 0)
}

/// Constant-shape check against the stored hash. Not an auth system, just
/// enough to gate destructive CLI actions.
pub fn verify_password(user: &User, password: &str) -> bool {
    hash_password(password) == user.password_hash
}
