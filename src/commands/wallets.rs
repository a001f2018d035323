// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::NewWallet;
use crate::store::wallets;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if wallets::delete(conn, id)? {
                println!("Removed wallet {} (its transactions are kept)", id);
            } else {
                println!("Wallet {} not found", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let wallet = wallets::create(
        conn,
        &NewWallet {
            user_id: *sub.get_one::<i64>("user").unwrap(),
            name: sub.get_one::<String>("name").unwrap().clone(),
            kind: sub.get_one::<String>("kind").unwrap().clone(),
            amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
            from_date: sub
                .get_one::<String>("from")
                .map(|s| parse_date(s))
                .transpose()?,
            to_date: sub
                .get_one::<String>("to")
                .map(|s| parse_date(s))
                .transpose()?,
        },
    )?;
    println!(
        "Added wallet '{}' ({}, {}) with id {}",
        wallet.name,
        wallet.kind,
        fmt_money(&wallet.amount),
        wallet.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    let all = wallets::list_by_user(conn, user_id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &all)? {
        let rows = all
            .iter()
            .map(|w| {
                vec![
                    w.id.to_string(),
                    w.name.clone(),
                    w.kind.clone(),
                    fmt_money(&w.amount),
                    w.from_date.map(|d| d.to_string()).unwrap_or_default(),
                    w.to_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Kind", "Balance", "From", "To"], rows)
        );
    }
    Ok(())
}
