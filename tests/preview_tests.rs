// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketbook::models::{
    EntryKind, NewBudget, NewCategory, NewTransaction, NewUser, NewWallet,
};
use pocketbook::store::{budgets, categories, transactions, users, wallets};
use pocketbook::{db, spending};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

struct Fixture {
    conn: Connection,
    user_id: i64,
    wallet: i64,
    food: i64,
}

fn setup() -> Fixture {
    let conn = db::open_in_memory().unwrap();
    let user = users::create(
        &conn,
        &NewUser {
            name: "Ben".into(),
            email: "ben@example.com".into(),
            password: "secret".into(),
        },
    )
    .unwrap();
    let wallet = wallets::create(
        &conn,
        &NewWallet {
            user_id: user.id,
            name: "Main".into(),
            kind: "bank".into(),
            amount: dec("0"),
            from_date: None,
            to_date: None,
        },
    )
    .unwrap()
    .id;
    let food = categories::create(
        &conn,
        &NewCategory {
            user_id: user.id,
            name: "Food".into(),
            parent_id: None,
            kind: EntryKind::Expense,
        },
    )
    .unwrap()
    .id;
    Fixture {
        conn,
        user_id: user.id,
        wallet,
        food,
    }
}

fn spend(conn: &Connection, wallet_id: i64, category_id: i64, amount: &str, date: &str) {
    transactions::create(
        conn,
        &NewTransaction {
            wallet_id,
            category_id,
            amount: dec(amount),
            kind: EntryKind::Expense,
            note: None,
            date: d(date),
        },
    )
    .unwrap();
}

fn budget(f: &mut Fixture, name: &str, amount: &str, from: &str, to: &str) -> i64 {
    budgets::create(
        &mut f.conn,
        &NewBudget {
            user_id: f.user_id,
            name: name.into(),
            amount: dec(amount),
            category_id: f.food,
            wallet_ids: vec![],
            from_date: d(from),
            to_date: d(to),
            recurring: false,
            note: None,
        },
    )
    .unwrap()
    .id
}

#[test]
fn preview_clamps_range_to_budget_window() {
    let mut f = setup();
    budget(&mut f, "Food Jan", "300", "2025-01-01", "2025-01-31");
    // Inside the budget window but before the requested range
    spend(&f.conn, f.wallet, f.food, "30", "2025-01-10");
    // Inside the clamped overlap
    spend(&f.conn, f.wallet, f.food, "40", "2025-01-20");
    // Inside the requested range but past the budget window
    spend(&f.conn, f.wallet, f.food, "60", "2025-02-10");

    let standings =
        spending::preview_in_range(&f.conn, f.user_id, d("2025-01-15"), d("2025-02-15")).unwrap();
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].spent, dec("40"));
    assert_eq!(standings[0].remain, dec("260"));
}

#[test]
fn preview_omits_budgets_with_no_overlap() {
    let mut f = setup();
    budget(&mut f, "Food Mar", "300", "2025-03-01", "2025-03-31");
    let standings =
        spending::preview_in_range(&f.conn, f.user_id, d("2025-04-01"), d("2025-04-30")).unwrap();
    assert!(standings.is_empty());
}

#[test]
fn preview_keeps_overlapping_budgets_with_zero_spend() {
    let mut f = setup();
    budget(&mut f, "Food Jan", "300", "2025-01-01", "2025-01-31");
    let standings =
        spending::preview_in_range(&f.conn, f.user_id, d("2025-01-01"), d("2025-01-31")).unwrap();
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].spent, Decimal::ZERO);
}

#[test]
fn preview_does_not_persist_remain() {
    let mut f = setup();
    let id = budget(&mut f, "Food Jan", "300", "2025-01-01", "2025-01-31");
    spend(&f.conn, f.wallet, f.food, "120", "2025-01-10");

    let standings =
        spending::preview_in_range(&f.conn, f.user_id, d("2025-01-01"), d("2025-01-31")).unwrap();
    assert_eq!(standings[0].remain, dec("180"));

    // Stored cache untouched: still the opening value
    let stored = budgets::get_by_id(&f.conn, id).unwrap().unwrap();
    assert_eq!(stored.remain, dec("300"));
}

#[test]
fn refresh_persists_and_is_idempotent() {
    let mut f = setup();
    let id = budget(&mut f, "Food Jan", "300", "2025-01-01", "2025-01-31");
    spend(&f.conn, f.wallet, f.food, "120", "2025-01-10");

    let first = spending::refresh_standing(&mut f.conn, id).unwrap().unwrap();
    let second = spending::refresh_standing(&mut f.conn, id).unwrap().unwrap();
    assert_eq!(first.remain, dec("180"));
    assert_eq!(second.remain, first.remain);

    let stored = budgets::get_by_id(&f.conn, id).unwrap().unwrap();
    assert_eq!(stored.remain, dec("180"));
}

#[test]
fn refresh_for_user_persists_every_budget() {
    let mut f = setup();
    let jan = budget(&mut f, "Food Jan", "300", "2025-01-01", "2025-01-31");
    let feb = budget(&mut f, "Food Feb", "200", "2025-02-01", "2025-02-28");
    spend(&f.conn, f.wallet, f.food, "100", "2025-01-10");
    spend(&f.conn, f.wallet, f.food, "250", "2025-02-10");

    let standings = spending::refresh_for_user(&mut f.conn, f.user_id).unwrap();
    assert_eq!(standings.len(), 2);

    let jan_row = budgets::get_by_id(&f.conn, jan).unwrap().unwrap();
    let feb_row = budgets::get_by_id(&f.conn, feb).unwrap().unwrap();
    assert_eq!(jan_row.remain, dec("200"));
    assert_eq!(feb_row.remain, Decimal::ZERO);
}

#[test]
fn refresh_missing_budget_is_none() {
    let mut f = setup();
    assert!(spending::refresh_standing(&mut f.conn, 9999).unwrap().is_none());
}

#[test]
fn effective_window_intersection() {
    let jan = (d("2025-01-01"), d("2025-01-31"));
    assert_eq!(
        spending::effective_window(jan.0, jan.1, d("2025-01-15"), d("2025-02-15")),
        Some((d("2025-01-15"), d("2025-01-31")))
    );
    // Touching at a single day still overlaps
    assert_eq!(
        spending::effective_window(jan.0, jan.1, d("2025-01-31"), d("2025-02-28")),
        Some((d("2025-01-31"), d("2025-01-31")))
    );
    assert_eq!(
        spending::effective_window(jan.0, jan.1, d("2025-02-01"), d("2025-02-28")),
        None
    );
}
