// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketbook::db;
use pocketbook::models::{
    BudgetPatch, EntryKind, NewBudget, NewCategory, NewNotification, NewTransaction, NewUser,
    NewWallet, WalletPatch,
};
use pocketbook::store::{budgets, categories, notifications, transactions, users, wallets};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn seed_user(conn: &Connection) -> i64 {
    users::create(
        conn,
        &NewUser {
            name: "Cara".into(),
            email: "cara@example.com".into(),
            password: "pw".into(),
        },
    )
    .unwrap()
    .id
}

fn seed_wallet(conn: &Connection, user_id: i64, name: &str) -> i64 {
    wallets::create(
        conn,
        &NewWallet {
            user_id,
            name: name.into(),
            kind: "cash".into(),
            amount: dec("100"),
            from_date: None,
            to_date: None,
        },
    )
    .unwrap()
    .id
}

fn seed_category(conn: &Connection, user_id: i64) -> i64 {
    categories::create(
        conn,
        &NewCategory {
            user_id,
            name: "Food".into(),
            parent_id: None,
            kind: EntryKind::Expense,
        },
    )
    .unwrap()
    .id
}

#[test]
fn update_and_delete_missing_ids_return_sentinels() {
    let conn = db::open_in_memory().unwrap();
    assert!(wallets::update(&conn, 42, &WalletPatch::default()).unwrap().is_none());
    assert!(!wallets::delete(&conn, 42).unwrap());
    assert!(transactions::get_by_id(&conn, 42).unwrap().is_none());
    assert!(!notifications::mark_read(&conn, 42).unwrap());
    assert!(!budgets::delete(&conn, 42).unwrap());
}

#[test]
fn wallet_patch_updates_only_set_fields() {
    let conn = db::open_in_memory().unwrap();
    let user_id = seed_user(&conn);
    let id = seed_wallet(&conn, user_id, "Pocket");

    let updated = wallets::update(
        &conn,
        id,
        &WalletPatch {
            amount: Some(dec("250.50")),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Pocket");
    assert_eq!(updated.amount, dec("250.50"));

    let reread = wallets::get_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(reread.amount, dec("250.50"));
    assert_eq!(reread.kind, "cash");
}

#[test]
fn wallet_delete_leaves_transactions_behind() {
    let conn = db::open_in_memory().unwrap();
    let user_id = seed_user(&conn);
    let wallet_id = seed_wallet(&conn, user_id, "Doomed");
    let category_id = seed_category(&conn, user_id);
    let t = transactions::create(
        &conn,
        &NewTransaction {
            wallet_id,
            category_id,
            amount: dec("5"),
            kind: EntryKind::Expense,
            note: None,
            date: d("2025-01-02"),
        },
    )
    .unwrap();

    assert!(wallets::delete(&conn, wallet_id).unwrap());
    // No cascade: the transaction survives with a dangling wallet reference
    let orphan = transactions::get_by_id(&conn, t.id).unwrap().unwrap();
    assert_eq!(orphan.wallet_id, wallet_id);
    assert!(wallets::get_by_id(&conn, wallet_id).unwrap().is_none());
}

#[test]
fn category_delete_leaves_budgets_behind() {
    let mut conn = db::open_in_memory().unwrap();
    let user_id = seed_user(&conn);
    let category_id = seed_category(&conn, user_id);
    let b = budgets::create(
        &mut conn,
        &NewBudget {
            user_id,
            name: "Food Jan".into(),
            amount: dec("100"),
            category_id,
            wallet_ids: vec![],
            from_date: d("2025-01-01"),
            to_date: d("2025-01-31"),
            recurring: false,
            note: None,
        },
    )
    .unwrap();

    assert!(categories::delete(&conn, category_id).unwrap());
    let orphan = budgets::get_by_id(&conn, b.id).unwrap().unwrap();
    assert_eq!(orphan.category_id, category_id);
}

#[test]
fn budget_starts_with_full_remain_and_links() {
    let mut conn = db::open_in_memory().unwrap();
    let user_id = seed_user(&conn);
    let category_id = seed_category(&conn, user_id);
    let w1 = seed_wallet(&conn, user_id, "W1");
    let w2 = seed_wallet(&conn, user_id, "W2");
    let b = budgets::create(
        &mut conn,
        &NewBudget {
            user_id,
            name: "Food Jan".into(),
            amount: dec("200"),
            category_id,
            wallet_ids: vec![w2, w1, w1],
            from_date: d("2025-01-01"),
            to_date: d("2025-01-31"),
            recurring: true,
            note: Some("groceries only".into()),
        },
    )
    .unwrap();
    assert_eq!(b.remain, dec("200"));
    // Links are deduplicated and read back sorted
    assert_eq!(b.wallet_ids, vec![w1, w2]);
    assert!(b.recurring);
}

#[test]
fn budget_patch_replaces_wallet_set_atomically() {
    let mut conn = db::open_in_memory().unwrap();
    let user_id = seed_user(&conn);
    let category_id = seed_category(&conn, user_id);
    let w1 = seed_wallet(&conn, user_id, "W1");
    let w2 = seed_wallet(&conn, user_id, "W2");
    let b = budgets::create(
        &mut conn,
        &NewBudget {
            user_id,
            name: "Food Jan".into(),
            amount: dec("200"),
            category_id,
            wallet_ids: vec![w1],
            from_date: d("2025-01-01"),
            to_date: d("2025-01-31"),
            recurring: false,
            note: None,
        },
    )
    .unwrap();

    let updated = budgets::update(
        &mut conn,
        b.id,
        &BudgetPatch {
            wallet_ids: Some(vec![w2]),
            amount: Some(dec("250")),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();
    assert_eq!(updated.wallet_ids, vec![w2]);
    assert_eq!(updated.amount, dec("250"));

    let reread = budgets::get_by_id(&conn, b.id).unwrap().unwrap();
    assert_eq!(reread.wallet_ids, vec![w2]);
}

#[test]
fn budget_delete_removes_wallet_links() {
    let mut conn = db::open_in_memory().unwrap();
    let user_id = seed_user(&conn);
    let category_id = seed_category(&conn, user_id);
    let w1 = seed_wallet(&conn, user_id, "W1");
    let b = budgets::create(
        &mut conn,
        &NewBudget {
            user_id,
            name: "Food Jan".into(),
            amount: dec("200"),
            category_id,
            wallet_ids: vec![w1],
            from_date: d("2025-01-01"),
            to_date: d("2025-01-31"),
            recurring: false,
            note: None,
        },
    )
    .unwrap();

    assert!(budgets::delete(&conn, b.id).unwrap());
    let links: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM budget_wallets WHERE budget_id=?1",
            [b.id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(links, 0);
}

#[test]
fn transaction_rejects_negative_magnitude() {
    let conn = db::open_in_memory().unwrap();
    let user_id = seed_user(&conn);
    let wallet_id = seed_wallet(&conn, user_id, "W1");
    let category_id = seed_category(&conn, user_id);
    let err = transactions::create(
        &conn,
        &NewTransaction {
            wallet_id,
            category_id,
            amount: dec("-5"),
            kind: EntryKind::Expense,
            note: None,
            date: d("2025-01-02"),
        },
    );
    assert!(err.is_err());
}

#[test]
fn notification_mark_read_flips_flag() {
    let conn = db::open_in_memory().unwrap();
    let user_id = seed_user(&conn);
    let n = notifications::create(
        &conn,
        &NewNotification {
            user_id,
            content: "Budget 'Food Jan' is running low".into(),
            link: None,
            show_at: "2025-01-20 09:00:00".into(),
        },
    )
    .unwrap();
    assert!(!n.read);

    assert!(notifications::mark_read(&conn, n.id).unwrap());
    let unread = notifications::list_by_user(&conn, user_id, true).unwrap();
    assert!(unread.is_empty());
    let all = notifications::list_by_user(&conn, user_id, false).unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].read);
}

#[test]
fn user_credentials_are_hashed_and_verifiable() {
    let conn = db::open_in_memory().unwrap();
    let user = users::create(
        &conn,
        &NewUser {
            name: "Dan".into(),
            email: "dan@example.com".into(),
            password: "correct horse".into(),
        },
    )
    .unwrap();
    assert_ne!(user.password_hash, "correct horse");
    assert!(users::verify_password(&user, "correct horse"));
    assert!(!users::verify_password(&user, "wrong"));

    let found = users::find_by_email(&conn, "dan@example.com").unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert!(users::find_by_email(&conn, "nobody@example.com").unwrap().is_none());
}

#[test]
fn duplicate_user_email_is_rejected() {
    let conn = db::open_in_memory().unwrap();
    seed_user(&conn);
    let dup = users::create(
        &conn,
        &NewUser {
            name: "Other".into(),
            email: "cara@example.com".into(),
            password: "pw2".into(),
        },
    );
    assert!(dup.is_err());
}

#[test]
fn user_delete_cascades_owned_entities() {
    let conn = db::open_in_memory().unwrap();
    let user_id = seed_user(&conn);
    let wallet_id = seed_wallet(&conn, user_id, "W1");
    let category_id = seed_category(&conn, user_id);

    assert!(users::delete(&conn, user_id).unwrap());
    assert!(wallets::get_by_id(&conn, wallet_id).unwrap().is_none());
    assert!(categories::get_by_id(&conn, category_id).unwrap().is_none());
}
