// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::NewUser;
use crate::store::users;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user = users::create(
                conn,
                &NewUser {
                    name: sub.get_one::<String>("name").unwrap().clone(),
                    email: sub.get_one::<String>("email").unwrap().clone(),
                    password: sub.get_one::<String>("password").unwrap().clone(),
                },
            )?;
            println!("Added user '{}' <{}> (id {})", user.name, user.email, user.id);
        }
        Some(("list", sub)) => {
            let all = users::list(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &all)? {
                let rows = all
                    .iter()
                    .map(|u| vec![u.id.to_string(), u.name.clone(), u.email.clone()])
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Email"], rows));
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if users::delete(conn, id)? {
                println!("Removed user {}", id);
            } else {
                println!("User {} not found", id);
            }
        }
        _ => {}
    }
    Ok(())
}
