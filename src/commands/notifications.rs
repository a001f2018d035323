// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::NewNotification;
use crate::store::notifications;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let show_at = match sub.get_one::<String>("at") {
                Some(s) => s.clone(),
                None => chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            };
            let n = notifications::create(
                conn,
                &NewNotification {
                    user_id: *sub.get_one::<i64>("user").unwrap(),
                    content: sub.get_one::<String>("content").unwrap().clone(),
                    link: sub.get_one::<String>("link").cloned(),
                    show_at,
                },
            )?;
            println!("Added notification {} at {}", n.id, n.show_at);
        }
        Some(("list", sub)) => {
            let user_id = *sub.get_one::<i64>("user").unwrap();
            let all = notifications::list_by_user(conn, user_id, sub.get_flag("unread"))?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &all)? {
                let rows = all
                    .iter()
                    .map(|n| {
                        vec![
                            n.id.to_string(),
                            n.show_at.clone(),
                            n.content.clone(),
                            n.link.clone().unwrap_or_default(),
                            if n.read { "read" } else { "unread" }.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "At", "Content", "Link", "State"], rows)
                );
            }
        }
        Some(("read", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if notifications::mark_read(conn, id)? {
                println!("Marked notification {} read", id);
            } else {
                println!("Notification {} not found", id);
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if notifications::delete(conn, id)? {
                println!("Removed notification {}", id);
            } else {
                println!("Notification {} not found", id);
            }
        }
        _ => {}
    }
    Ok(())
}
