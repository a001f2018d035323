// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget spending aggregation. Two read paths exist on purpose:
//! `refresh_standing` recomputes and persists the cached `remain` on the
//! budget row, `preview_in_range` answers "what would this range look
//! like" without writing anything.

use crate::models::BudgetStanding;
use crate::query::{Pred, where_clause};
use crate::store::budgets;
use crate::utils::parse_decimal;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, params_from_iter};
use rust_decimal::Decimal;

/// Intersection of a budget's own window with a requested reporting
/// range. `None` when they do not overlap.
pub fn effective_window(
    budget_from: NaiveDate,
    budget_to: NaiveDate,
    range_from: NaiveDate,
    range_to: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let from = budget_from.max(range_from);
    let to = budget_to.min(range_to);
    if from > to { None } else { Some((from, to)) }
}

/// Sum of expense magnitudes for a category inside `[from, to]`,
/// restricted to `wallet_ids` when the set is non-empty. No matches is
/// zero, not an error; an inverted range sums over nothing.
pub fn spent_between(
    conn: &Connection,
    category_id: i64,
    wallet_ids: &[i64],
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Decimal> {
    let mut preds = vec![
        Pred::eq("kind", "expense"),
        Pred::eq("category_id", category_id),
        Pred::range("date", from, to),
    ];
    if !wallet_ids.is_empty() {
        preds.push(Pred::in_set("wallet_id", wallet_ids.iter().copied()));
    }
    let (where_sql, values) = where_clause(&preds);
    let mut stmt = conn.prepare(&format!("SELECT amount FROM transactions{}", where_sql))?;
    let mut rows = stmt.query(params_from_iter(values.iter()))?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let amount: String = r.get(0)?;
        total += parse_decimal(&amount)?;
    }
    Ok(total)
}

/// Remaining balance, floored at zero.
pub fn remain_after(amount: Decimal, spent: Decimal) -> Decimal {
    (amount - spent).max(Decimal::ZERO)
}

/// Whole-window spend for one budget, with the recomputed `remain`
/// persisted back onto the row in the same atomic scope. `None` when the
/// budget does not exist.
pub fn refresh_standing(conn: &mut Connection, budget_id: i64) -> Result<Option<BudgetStanding>> {
    let tx = conn.transaction()?;
    let Some(mut budget) = budgets::get_by_id(&tx, budget_id)? else {
        return Ok(None);
    };
    let spent = spent_between(
        &tx,
        budget.category_id,
        &budget.wallet_ids,
        budget.from_date,
        budget.to_date,
    )?;
    let remain = remain_after(budget.amount, spent);
    budgets::update_remain(&tx, budget_id, remain)?;
    tx.commit()?;
    budget.remain = remain;
    Ok(Some(BudgetStanding {
        budget,
        spent,
        remain,
    }))
}

/// Persisting variant over everything the user owns: each budget is
/// refreshed against its own window, one atomic write per row.
pub fn refresh_for_user(conn: &mut Connection, user_id: i64) -> Result<Vec<BudgetStanding>> {
    let ids: Vec<i64> = budgets::list_by_user(conn, user_id)?
        .into_iter()
        .map(|b| b.id)
        .collect();
    let mut out = Vec::new();
    for id in ids {
        if let Some(standing) = refresh_standing(conn, id)? {
            out.push(standing);
        }
    }
    Ok(out)
}

/// Range-scoped standings for every budget the user owns, clamped to each
/// budget's own window. Budgets with no overlap are omitted entirely.
/// Pure read: cached `remain` values on disk are left untouched.
pub fn preview_in_range(
    conn: &Connection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<BudgetStanding>> {
    let mut out = Vec::new();
    for budget in budgets::list_by_user(conn, user_id)? {
        let Some((eff_from, eff_to)) =
            effective_window(budget.from_date, budget.to_date, from, to)
        else {
            continue;
        };
        let spent = spent_between(conn, budget.category_id, &budget.wallet_ids, eff_from, eff_to)?;
        let remain = remain_after(budget.amount, spent);
        out.push(BudgetStanding {
            budget,
            spent,
            remain,
        });
    }
    Ok(out)
}
