// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{EntryKind, NewCategory};
use crate::store::categories;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let category = categories::create(
                conn,
                &NewCategory {
                    user_id: *sub.get_one::<i64>("user").unwrap(),
                    name: sub.get_one::<String>("name").unwrap().clone(),
                    parent_id: sub.get_one::<i64>("parent").copied(),
                    kind: EntryKind::parse(sub.get_one::<String>("kind").unwrap())?,
                },
            )?;
            println!(
                "Added category '{}' ({}) with id {}",
                category.name,
                category.kind.as_str(),
                category.id
            );
        }
        Some(("list", sub)) => {
            let user_id = *sub.get_one::<i64>("user").unwrap();
            let all = categories::list_by_user(conn, user_id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &all)? {
                let rows = all
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.kind.as_str().to_string(),
                            c.parent_id.map(|p| p.to_string()).unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Kind", "Parent"], rows));
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if categories::delete(conn, id)? {
                println!("Removed category {} (its transactions are kept)", id);
            } else {
                println!("Category {} not found", id);
            }
        }
        _ => {}
    }
    Ok(())
}
