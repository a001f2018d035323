// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::NewBudget;
use crate::spending;
use crate::store::budgets;
use crate::utils::{
    fmt_money, id_for_category, id_for_wallet, maybe_print_json, parse_date, parse_decimal,
    pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        Some(("refresh", sub)) => refresh(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if budgets::delete(conn, id)? {
                println!("Removed budget {}", id);
            } else {
                println!("Budget {} not found", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    let category_id = id_for_category(conn, user_id, sub.get_one::<String>("category").unwrap())?;
    let mut wallet_ids = Vec::new();
    if let Some(names) = sub.get_many::<String>("wallets") {
        for name in names {
            wallet_ids.push(id_for_wallet(conn, user_id, name)?);
        }
    }
    let budget = budgets::create(
        conn,
        &NewBudget {
            user_id,
            name: sub.get_one::<String>("name").unwrap().clone(),
            amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
            category_id,
            wallet_ids,
            from_date: parse_date(sub.get_one::<String>("from").unwrap())?,
            to_date: parse_date(sub.get_one::<String>("to").unwrap())?,
            recurring: sub.get_flag("recurring"),
            note: sub.get_one::<String>("note").cloned(),
        },
    )?;
    println!(
        "Added budget '{}' of {} for {}..{} (id {})",
        budget.name,
        fmt_money(&budget.amount),
        budget.from_date,
        budget.to_date,
        budget.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    let all = budgets::list_by_user(conn, user_id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &all)? {
        let rows = all
            .iter()
            .map(|b| {
                let wallets = if b.wallet_ids.is_empty() {
                    "all".to_string()
                } else {
                    b.wallet_ids
                        .iter()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                };
                vec![
                    b.id.to_string(),
                    b.name.clone(),
                    fmt_money(&b.amount),
                    fmt_money(&b.remain),
                    b.category_id.to_string(),
                    wallets,
                    b.from_date.to_string(),
                    b.to_date.to_string(),
                    if b.recurring { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Amount", "Remain", "Category", "Wallets", "From", "To", "Recurring"],
                rows,
            )
        );
    }
    Ok(())
}

/// Non-persisting preview over an arbitrary reporting range. Budgets
/// outside the range are simply not listed.
fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    let from = parse_date(sub.get_one::<String>("from").unwrap())?;
    let to = parse_date(sub.get_one::<String>("to").unwrap())?;
    let standings = spending::preview_in_range(conn, user_id, from, to)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &standings)? {
        let rows = standings
            .iter()
            .map(|s| {
                vec![
                    s.budget.name.clone(),
                    format!("{}..{}", s.budget.from_date, s.budget.to_date),
                    fmt_money(&s.budget.amount),
                    fmt_money(&s.spent),
                    fmt_money(&s.remain),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Budget", "Window", "Amount", "Spent", "Remain"], rows)
        );
    }
    Ok(())
}

fn refresh(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(id) = sub.get_one::<i64>("id").copied() {
        match spending::refresh_standing(conn, id)? {
            Some(standing) => println!(
                "Budget '{}': spent {}, remain {} (persisted)",
                standing.budget.name,
                fmt_money(&standing.spent),
                fmt_money(&standing.remain)
            ),
            None => println!("Budget {} not found", id),
        }
    } else if let Some(user_id) = sub.get_one::<i64>("user").copied() {
        let standings = spending::refresh_for_user(conn, user_id)?;
        let rows = standings
            .iter()
            .map(|s| {
                vec![
                    s.budget.name.clone(),
                    fmt_money(&s.budget.amount),
                    fmt_money(&s.spent),
                    fmt_money(&s.remain),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Budget", "Amount", "Spent", "Remain"], rows)
        );
    } else {
        println!("Provide --id or --user");
    }
    Ok(())
}
