// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of money movement. Amounts are stored as non-negative
/// magnitudes; the direction lives here, never in the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Result<EntryKind> {
        match s {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            other => bail!("Invalid entry kind '{}', expected income|expense", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub kind: String, // cash, bank, ...
    pub amount: Decimal,
    // Validity window: stored and surfaced, no logic attached anywhere.
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub wallet_id: i64,
    pub category_id: i64,
    pub amount: Decimal, // non-negative magnitude
    pub kind: EntryKind,
    pub note: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub amount: Decimal,
    pub remain: Decimal, // cached, refreshed by spending::refresh_standing
    pub category_id: i64,
    pub wallet_ids: Vec<i64>, // empty = all wallets
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub recurring: bool, // stored only, no renewal semantics
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub link: Option<String>,
    pub show_at: String,
    pub read: bool,
}

/// A budget together with its computed spend and remaining balance.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStanding {
    pub budget: Budget,
    pub spent: Decimal,
    pub remain: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewWallet {
    pub user_id: i64,
    pub name: String,
    pub kind: String,
    pub amount: Decimal,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub user_id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub kind: EntryKind,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub wallet_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub kind: EntryKind,
    pub note: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub user_id: i64,
    pub name: String,
    pub amount: Decimal,
    pub category_id: i64,
    pub wallet_ids: Vec<i64>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub recurring: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: i64,
    pub content: String,
    pub link: Option<String>,
    pub show_at: String,
}

// Partial updates: a Some field overwrites, a None field is left alone.

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WalletPatch {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub amount: Option<Decimal>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub parent_id: Option<i64>,
    pub kind: Option<EntryKind>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub wallet_id: Option<i64>,
    pub category_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub kind: Option<EntryKind>,
    pub note: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub category_id: Option<i64>,
    pub wallet_ids: Option<Vec<i64>>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub recurring: Option<bool>,
    pub note: Option<String>,
}
