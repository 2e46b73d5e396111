// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{FilterSpec, Transaction, TxKind};

/// One row of the daybook report.
///
/// `date` is set only on the first row of a calendar-day group and
/// `daily_balance` only on the last, reproducing the ledger-paper layout
/// where a day's entries share one date label and close with a subtotal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaybookRow {
    pub date: Option<NaiveDate>,
    pub label: String,
    pub money_in: i64,
    pub money_out: i64,
    pub daily_balance: Option<i64>,
    pub owner: String,
    pub attachment: String,
}

/// Builds daybook rows from records already sorted ascending by
/// `occurred_at` (see `filter::sort_for_report`). Consecutive records on
/// the same calendar day form one group; each group's subtotal is its
/// income minus its expenses.
pub fn daybook_rows(records: &[Transaction]) -> Vec<DaybookRow> {
    let mut rows = Vec::with_capacity(records.len());
    let mut start = 0;
    while start < records.len() {
        let day = records[start].business_date();
        let mut end = start;
        while end < records.len() && records[end].business_date() == day {
            end += 1;
        }
        let group = &records[start..end];
        let subtotal: i64 = group
            .iter()
            .map(|t| match t.kind {
                TxKind::Income => t.amount.max(0),
                TxKind::Expense => -t.amount.max(0),
            })
            .sum();
        for (i, t) in group.iter().enumerate() {
            let amount = t.amount.max(0);
            let (money_in, money_out) = match t.kind {
                TxKind::Income => (amount, 0),
                TxKind::Expense => (0, amount),
            };
            rows.push(DaybookRow {
                date: (i == 0).then_some(day),
                label: neutralize_separators(t.display_label()),
                money_in,
                money_out,
                daily_balance: (i + 1 == group.len()).then_some(subtotal),
                owner: neutralize_separators(t.owner_name.trim()),
                attachment: t
                    .attachment_url
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .map(neutralize_separators)
                    .unwrap_or_else(|| "-".to_string()),
            });
        }
        start = end;
    }
    rows
}

/// Free text goes into a comma-delimited format downstream, so commas in
/// field values become spaces.
pub fn neutralize_separators(s: &str) -> String {
    s.replace(',', " ")
}

/// Suggested export filename: encodes the owner tab and active date scope
/// plus a generation timestamp, so repeated exports never overwrite each
/// other.
pub fn report_filename(filter: &FilterSpec, now: NaiveDateTime) -> String {
    let tab = filter
        .owner_tab
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "semua".to_string());
    let scope = if filter.all {
        "semua-waktu".to_string()
    } else if let Some(d) = filter.exact_date {
        d.format("%Y-%m-%d").to_string()
    } else if let (Some(m), Some(y)) = (filter.month, filter.year) {
        format!("{:04}-{:02}", y, m)
    } else if let Some(y) = filter.year {
        format!("{:04}", y)
    } else {
        "semua-waktu".to_string()
    };
    format!(
        "laporan_kas_{}_{}_{}.csv",
        tab,
        scope,
        now.format("%Y%m%d%H%M%S")
    )
}
