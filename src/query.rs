// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-month views over the store.
//!
//! A month is the ledger rows entered in that month plus the month's bucket,
//! deduplicated by id with the ledger row winning.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{MonthKey, Transaction, TxnType};
use crate::store::{Store, merge_filter_unique};
use crate::utils::round_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    /// Skipped expenses excluded.
    pub expenses: Decimal,
    /// Paid transactions of either kind.
    pub paid: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub total: Decimal,
    pub paid: Decimal,
    pub remaining: Decimal,
    pub progress_percent: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub income: Decimal,
    pub paid_income: Decimal,
    pub expenses: Decimal,
    /// Income actually received minus all expenses.
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    pub income: Decimal,
    pub expenses: Decimal,
}

pub fn month_transactions(store: &Store, view: MonthKey) -> Vec<Transaction> {
    let entered: Vec<Transaction> = store
        .ledger()
        .iter()
        .filter(|t| t.entered_in() == view)
        .cloned()
        .collect();
    merge_filter_unique(&entered, store.bucket(view))
}

pub fn filter_by_type(store: &Store, kind: TxnType, view: MonthKey) -> Vec<Transaction> {
    let entered: Vec<Transaction> = store
        .ledger()
        .iter()
        .filter(|t| t.txn_type() == kind && t.entered_in() == view)
        .cloned()
        .collect();
    let bucketed: Vec<Transaction> = store
        .bucket(view)
        .iter()
        .filter(|t| t.txn_type() == kind)
        .cloned()
        .collect();
    merge_filter_unique(&entered, &bucketed)
}

fn sum<'a>(txns: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    txns.into_iter().map(|t| t.amount).sum()
}

pub fn totals(store: &Store, view: MonthKey) -> Totals {
    let txns = month_transactions(store, view);
    Totals {
        income: sum(txns.iter().filter(|t| t.txn_type() == TxnType::Income)),
        expenses: sum(txns
            .iter()
            .filter(|t| t.txn_type() == TxnType::Expense && !t.is_skipped())),
        paid: sum(txns.iter().filter(|t| t.is_paid())),
    }
}

pub fn payment_summary(store: &Store, view: MonthKey) -> PaymentSummary {
    let expenses = filter_by_type(store, TxnType::Expense, view);
    let total = sum(&expenses);
    let paid = sum(expenses.iter().filter(|t| t.is_paid()));
    let progress_percent = if total.is_zero() {
        Decimal::ZERO
    } else {
        (paid / total * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    };
    PaymentSummary {
        total: round_money(total),
        paid: round_money(paid),
        remaining: round_money(total - paid),
        progress_percent,
    }
}

pub fn monthly_summary(store: &Store, view: MonthKey) -> MonthlySummary {
    let txns = month_transactions(store, view);
    let income = sum(txns.iter().filter(|t| t.txn_type() == TxnType::Income));
    let paid_income = sum(txns
        .iter()
        .filter(|t| t.txn_type() == TxnType::Income && t.is_paid()));
    let expenses = sum(txns.iter().filter(|t| t.txn_type() == TxnType::Expense));
    MonthlySummary {
        income: round_money(income),
        paid_income: round_money(paid_income),
        expenses: round_money(expenses),
        balance: round_money(paid_income - expenses),
    }
}

/// Non-skipped expense totals per category, largest first.
pub fn category_breakdown(store: &Store, view: MonthKey) -> Vec<CategoryTotal> {
    let mut agg: HashMap<String, Decimal> = HashMap::new();
    for t in month_transactions(store, view)
        .iter()
        .filter(|t| !t.is_skipped())
    {
        if let Some(category) = t.kind.category() {
            *agg.entry(category.to_string()).or_insert(Decimal::ZERO) += t.amount;
        }
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category,
            amount: round_money(amount),
        })
        .collect();
    items.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    items
}

/// Income and non-skipped expenses for the `months` months ending at `view`, oldest first.
pub fn trends(store: &Store, view: MonthKey, months: usize) -> Vec<TrendPoint> {
    let mut keys: Vec<MonthKey> = std::iter::successors(Some(view), |k| Some(k.prev()))
        .take(months)
        .collect();
    keys.reverse();
    keys.into_iter()
        .map(|month| {
            let t = totals(store, month);
            TrendPoint {
                month,
                income: round_money(t.income),
                expenses: round_money(t.expenses),
            }
        })
        .collect()
}
