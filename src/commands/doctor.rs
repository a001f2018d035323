// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

/// Wallet and category deletion never cascades, so references can dangle,
/// and `remain` caches can go stale between refreshes. Report both.
pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Transactions pointing at deleted wallets
    let mut stmt = conn.prepare(
        "SELECT t.id, t.wallet_id FROM transactions t
         WHERE NOT EXISTS (SELECT 1 FROM wallets w WHERE w.id=t.wallet_id)",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let (tid, wid): (i64, i64) = (r.get(0)?, r.get(1)?);
        rows.push(vec!["tx_missing_wallet".into(), format!("tx {} -> wallet {}", tid, wid)]);
    }

    // 2) Transactions pointing at deleted categories
    let mut stmt2 = conn.prepare(
        "SELECT t.id, t.category_id FROM transactions t
         WHERE NOT EXISTS (SELECT 1 FROM categories c WHERE c.id=t.category_id)",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let (tid, cid): (i64, i64) = (r.get(0)?, r.get(1)?);
        rows.push(vec![
            "tx_missing_category".into(),
            format!("tx {} -> category {}", tid, cid),
        ]);
    }

    // 3) Budgets pointing at deleted categories
    let mut stmt3 = conn.prepare(
        "SELECT b.id, b.category_id FROM budgets b
         WHERE NOT EXISTS (SELECT 1 FROM categories c WHERE c.id=b.category_id)",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let (bid, cid): (i64, i64) = (r.get(0)?, r.get(1)?);
        rows.push(vec![
            "budget_missing_category".into(),
            format!("budget {} -> category {}", bid, cid),
        ]);
    }

    // 4) Budget wallet links pointing at deleted wallets
    let mut stmt4 = conn.prepare(
        "SELECT bw.budget_id, bw.wallet_id FROM budget_wallets bw
         WHERE NOT EXISTS (SELECT 1 FROM wallets w WHERE w.id=bw.wallet_id)",
    )?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let (bid, wid): (i64, i64) = (r.get(0)?, r.get(1)?);
        rows.push(vec![
            "budget_missing_wallet".into(),
            format!("budget {} -> wallet {}", bid, wid),
        ]);
    }

    // 5) Stale remain caches (remain above the ceiling)
    let mut stmt5 = conn.prepare("SELECT id, amount, remain FROM budgets")?;
    let mut cur5 = stmt5.query([])?;
    while let Some(r) = cur5.next()? {
        let id: i64 = r.get(0)?;
        let amount = parse_decimal(&r.get::<_, String>(1)?)?;
        let remain = parse_decimal(&r.get::<_, String>(2)?)?;
        if remain > amount {
            rows.push(vec![
                "stale_remain".into(),
                format!("budget {} remain {} > amount {}", id, remain, amount),
            ]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
