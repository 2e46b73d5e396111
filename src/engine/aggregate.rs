// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Transaction, TxKind};

/// Totals over a (usually pre-filtered) record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LedgerTotals {
    pub count: usize,
    pub total_income: i64,
    pub total_expense: i64,
    /// `total_income - total_expense`. Negative is a valid state the
    /// caller surfaces with its own severity styling.
    pub net_balance: i64,
}

impl LedgerTotals {
    pub fn is_deficit(&self) -> bool {
        self.net_balance < 0
    }
}

/// Sums a record set. Recomputed from scratch on every call; volumes in
/// this domain are small, so there is no incremental mode.
///
/// Amounts below zero should have been rejected at ingestion; if one
/// slips through it counts as zero here so a bad row cannot poison the
/// totals.
pub fn aggregate(records: &[Transaction]) -> LedgerTotals {
    let mut totals = LedgerTotals {
        count: records.len(),
        ..LedgerTotals::default()
    };
    for t in records {
        let amount = t.amount.max(0);
        match t.kind {
            TxKind::Income => totals.total_income += amount,
            TxKind::Expense => totals.total_expense += amount,
        }
    }
    totals.net_balance = totals.total_income - totals.total_expense;
    totals
}

/// Per-owner breakdown, keyed by case-folded display name. Each owner's
/// totals are an independent `aggregate` over that owner's subset, so the
/// group balances sum to the balance of the whole set. The returned label
/// keeps the first casing seen in the data.
pub fn aggregate_by_owner(records: &[Transaction]) -> Vec<(String, LedgerTotals)> {
    let mut groups: BTreeMap<String, (String, Vec<Transaction>)> = BTreeMap::new();
    for t in records {
        let key = t.owner_name.trim().to_lowercase();
        groups
            .entry(key)
            .or_insert_with(|| (t.owner_name.trim().to_string(), Vec::new()))
            .1
            .push(t.clone());
    }
    groups
        .into_values()
        .map(|(label, subset)| (label, aggregate(&subset)))
        .collect()
}
