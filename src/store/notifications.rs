// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewNotification, Notification};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

const COLS: &str = "id, user_id, content, link, show_at, read";

fn map_row(r: &rusqlite::Row) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: r.get(0)?,
        user_id: r.get(1)?,
        content: r.get(2)?,
        link: r.get(3)?,
        show_at: r.get(4)?,
        read: r.get(5)?,
    })
}

pub fn create(conn: &Connection, n: &NewNotification) -> Result<Notification> {
    conn.execute(
        "INSERT INTO notifications(user_id, content, link, show_at) VALUES (?1, ?2, ?3, ?4)",
        params![n.user_id, n.content, n.link, n.show_at],
    )?;
    Ok(Notification {
        id: conn.last_insert_rowid(),
        user_id: n.user_id,
        content: n.content.clone(),
        link: n.link.clone(),
        show_at: n.show_at.clone(),
        read: false,
    })
}

pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Notification>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM notifications WHERE id=?1", COLS),
            params![id],
            map_row,
        )
        .optional()?;
    Ok(row)
}

pub fn list_by_user(conn: &Connection, user_id: i64, unread_only: bool) -> Result<Vec<Notification>> {
    let mut sql = format!("SELECT {} FROM notifications WHERE user_id=?1", COLS);
    if unread_only {
        sql.push_str(" AND read=0");
    }
    sql.push_str(" ORDER BY show_at DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], map_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn mark_read(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("UPDATE notifications SET read=1 WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM notifications WHERE id=?1", params![id])?;
    Ok(n > 0)
}
