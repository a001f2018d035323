// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketbook::cli;
use pocketbook::commands::transactions::filter_from_args;
use pocketbook::db;
use pocketbook::models::{
    EntryKind, NewCategory, NewTransaction, NewUser, NewWallet, TransactionPatch,
};
use pocketbook::store::transactions::{self, TxFilter};
use pocketbook::store::{categories, users, wallets};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> (Connection, i64, i64, i64) {
    let conn = db::open_in_memory().unwrap();
    let user = users::create(
        &conn,
        &NewUser {
            name: "Eve".into(),
            email: "eve@example.com".into(),
            password: "pw".into(),
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
    let category = categories::create(
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
    for i in 1..=3 {
        transactions::create(
            &conn,
            &NewTransaction {
                wallet_id: wallet,
                category_id: category,
                amount: dec("10"),
                kind: EntryKind::Expense,
                note: Some("lunch".into()),
                date: d(&format!("2025-01-0{}", i)),
            },
        )
        .unwrap();
    }
    (conn, user.id, wallet, category)
}

#[test]
fn list_limit_respected_newest_first() {
    let (conn, _, _, _) = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["pocketbook", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let filter = filter_from_args(list_m).unwrap();
            let rows = transactions::list(&conn, &filter).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, d("2025-01-03"));
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn filter_by_kind_and_date_range() {
    let (conn, _, wallet, category) = setup();
    transactions::create(
        &conn,
        &NewTransaction {
            wallet_id: wallet,
            category_id: category,
            amount: dec("500"),
            kind: EntryKind::Income,
            note: None,
            date: d("2025-01-02"),
        },
    )
    .unwrap();

    let expenses = transactions::list(
        &conn,
        &TxFilter {
            kind: Some(EntryKind::Expense),
            from: Some(d("2025-01-02")),
            to: Some(d("2025-01-03")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(expenses.len(), 2);
    assert!(expenses.iter().all(|t| t.kind == EntryKind::Expense));

    let income = transactions::list(
        &conn,
        &TxFilter {
            kind: Some(EntryKind::Income),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].amount, dec("500"));
}

#[test]
fn open_ended_date_filter_works() {
    let (conn, _, _, _) = setup();
    let since = transactions::list(
        &conn,
        &TxFilter {
            from: Some(d("2025-01-02")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(since.len(), 2);

    let until = transactions::list(
        &conn,
        &TxFilter {
            to: Some(d("2025-01-01")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(until.len(), 1);
}

#[test]
fn patch_moves_transaction_between_categories() {
    let (conn, user_id, _, _) = setup();
    let rent = categories::create(
        &conn,
        &NewCategory {
            user_id,
            name: "Rent".into(),
            parent_id: None,
            kind: EntryKind::Expense,
        },
    )
    .unwrap()
    .id;

    let first = transactions::list(&conn, &TxFilter::default()).unwrap()[0].clone();
    let updated = transactions::update(
        &conn,
        first.id,
        &TransactionPatch {
            category_id: Some(rent),
            amount: Some(dec("12.50")),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();
    assert_eq!(updated.category_id, rent);
    assert_eq!(updated.amount, dec("12.50"));
    // Untouched fields survive the patch
    assert_eq!(updated.note.as_deref(), Some("lunch"));
    assert_eq!(updated.date, first.date);
}
