// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;

use crate::models::{FilterSpec, Transaction};

/// Returns the subset of `records` matching `filter`, newest first.
///
/// Evaluation order is fixed and deliberately reproduced from the ledger's
/// long-settled behavior:
/// 1. `all` skips date filtering entirely; owner and search still apply.
/// 2. Otherwise exactly one date strategy runs: `exact_date`, else
///    `month`+`year`, else `year`. A `month` without a `year` is treated
///    as not specified rather than an error.
/// 3. Owner filters intersect independently of dates.
/// 4. The search term intersects last.
///
/// A filter with nothing set returns everything, sorted newest first.
pub fn query(records: &[Transaction], filter: &FilterSpec) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = records
        .iter()
        .filter(|t| matches(t, filter))
        .cloned()
        .collect();
    sort_newest_first(&mut out);
    out
}

fn matches(t: &Transaction, f: &FilterSpec) -> bool {
    if let Some(id) = &f.owner_id {
        if t.owner_id != *id {
            return false;
        }
    }
    if let Some(tab) = &f.owner_tab {
        let tab = tab.trim().to_lowercase();
        if !tab.is_empty() && !t.owner_name.trim().to_lowercase().contains(&tab) {
            return false;
        }
    }
    if !f.all && !date_matches(t, f) {
        return false;
    }
    if let Some(term) = &f.search {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !search_matches(t, &term) {
            return false;
        }
    }
    true
}

/// Date equality is calendar y/m/d of the business date in local terms,
/// never epoch equality; time-of-day is irrelevant to date filters.
fn date_matches(t: &Transaction, f: &FilterSpec) -> bool {
    let d = t.business_date();
    if let Some(day) = f.exact_date {
        return d == day;
    }
    match (f.month, f.year) {
        (Some(m), Some(y)) => d.year() == y && d.month() == m,
        (_, Some(y)) => d.year() == y,
        _ => true,
    }
}

fn search_matches(t: &Transaction, term: &str) -> bool {
    let note = t.note.as_deref().unwrap_or("");
    note.to_lowercase().contains(term)
        || t.category.to_lowercase().contains(term)
        || t.owner_name.to_lowercase().contains(term)
}

/// Display order: newest first, id as a stable tiebreak for entries
/// sharing a timestamp.
pub fn sort_newest_first(records: &mut [Transaction]) {
    records.sort_by(|a, b| {
        b.occurred_at
            .cmp(&a.occurred_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Report/export order: oldest first. Display and export deliberately use
/// opposite orders; `report::daybook_rows` requires this one.
pub fn sort_for_report(records: &mut [Transaction]) {
    records.sort_by(|a, b| {
        a.occurred_at
            .cmp(&b.occurred_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
