// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{EntryKind, NewTransaction, Transaction};
use crate::store::transactions::{self, TxFilter};
use crate::store::{categories, wallets};
use crate::utils::{
    fmt_money, id_for_category, id_for_wallet, maybe_print_json, parse_date, parse_decimal,
    pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if transactions::delete(conn, id)? {
                println!("Removed transaction {}", id);
            } else {
                println!("Transaction {} not found", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    let wallet_id = id_for_wallet(conn, user_id, sub.get_one::<String>("wallet").unwrap())?;
    let category_id = id_for_category(conn, user_id, sub.get_one::<String>("category").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let t = transactions::create(
        conn,
        &NewTransaction {
            wallet_id,
            category_id,
            amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
            kind: EntryKind::parse(sub.get_one::<String>("kind").unwrap())?,
            note: sub.get_one::<String>("note").cloned(),
            date,
        },
    )?;
    println!(
        "Recorded {} {} on {} (tx {})",
        t.kind.as_str(),
        fmt_money(&t.amount),
        t.date,
        t.id
    );
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TxFilter> {
    Ok(TxFilter {
        wallet_id: sub.get_one::<i64>("wallet-id").copied(),
        category_id: sub.get_one::<i64>("category-id").copied(),
        kind: sub
            .get_one::<String>("kind")
            .map(|s| EntryKind::parse(s))
            .transpose()?,
        from: sub
            .get_one::<String>("from")
            .map(|s| parse_date(s))
            .transpose()?,
        to: sub
            .get_one::<String>("to")
            .map(|s| parse_date(s))
            .transpose()?,
        limit: sub.get_one::<usize>("limit").copied(),
    })
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let filter = filter_from_args(sub)?;
    let all = transactions::list(conn, &filter)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &all)? {
        let mut rows = Vec::new();
        for t in &all {
            rows.push(vec![
                t.id.to_string(),
                t.date.to_string(),
                wallet_label(conn, t)?,
                category_label(conn, t)?,
                t.kind.as_str().to_string(),
                fmt_money(&t.amount),
                t.note.clone().unwrap_or_default(),
            ]);
        }
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Wallet", "Category", "Kind", "Amount", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

// A deleted wallet/category leaves transactions behind; show the raw id
// when the name no longer resolves.
fn wallet_label(conn: &Connection, t: &Transaction) -> Result<String> {
    Ok(wallets::get_by_id(conn, t.wallet_id)?
        .map(|w| w.name)
        .unwrap_or_else(|| format!("#{}", t.wallet_id)))
}

fn category_label(conn: &Connection, t: &Transaction) -> Result<String> {
    Ok(categories::get_by_id(conn, t.category_id)?
        .map(|c| c.name)
        .unwrap_or_else(|| format!("#{}", t.category_id)))
}
