// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed category label recorded for income entries. Workers pick a
/// category for expenses only; incoming funds always carry this label.
pub const INCOME_CATEGORY: &str = "Kas Masuk";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl FromStr for TxKind {
    type Err = InvalidTransaction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "masuk" => Ok(TxKind::Income),
            "expense" | "keluar" => Ok(TxKind::Expense),
            _ => Err(InvalidTransaction::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded kas entry. Immutable once stored; removed only by explicit
/// deletion, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub owner_id: String,
    /// Display name of the recording user. Stored casing is inconsistent
    /// across historical backends, so all comparisons fold case.
    pub owner_name: String,
    pub kind: TxKind,
    pub category: String,
    pub note: Option<String>,
    /// Amount in whole rupiah. Always positive; the sign comes from `kind`.
    pub amount: i64,
    /// Business date/time chosen by the user, in local calendar terms.
    /// Backdating is allowed, postdating is not.
    pub occurred_at: NaiveDateTime,
    pub attachment_url: Option<String>,
}

impl Transaction {
    /// Calendar day of the entry, local terms. Date filters and daybook
    /// grouping compare this, never raw timestamps.
    pub fn business_date(&self) -> NaiveDate {
        self.occurred_at.date()
    }

    /// `note` when present and non-blank, else the category label.
    pub fn display_label(&self) -> &str {
        match self.note.as_deref() {
            Some(n) if !n.trim().is_empty() => n,
            _ => &self.category,
        }
    }
}

/// Validation failures rejected at the store/ingestion boundary.
#[derive(Debug, thiserror::Error)]
pub enum InvalidTransaction {
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i64),
    #[error("entry is dated in the future ({0})")]
    FutureDated(NaiveDateTime),
    #[error("owner is required")]
    MissingOwner,
    #[error("unknown transaction kind '{0}' (use income|expense)")]
    UnknownKind(String),
}

/// Payload for creating an entry; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub owner_id: String,
    pub owner_name: String,
    pub kind: TxKind,
    pub category: Option<String>,
    pub note: Option<String>,
    pub amount: i64,
    pub occurred_at: NaiveDateTime,
    pub attachment_url: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self, now: NaiveDateTime) -> Result<(), InvalidTransaction> {
        if self.amount <= 0 {
            return Err(InvalidTransaction::NonPositiveAmount(self.amount));
        }
        if self.occurred_at > now {
            return Err(InvalidTransaction::FutureDated(self.occurred_at));
        }
        if self.owner_id.trim().is_empty() || self.owner_name.trim().is_empty() {
            return Err(InvalidTransaction::MissingOwner);
        }
        Ok(())
    }

    /// Category actually stored: income entries always get the fixed
    /// incoming-funds label, expenses keep what the user picked.
    pub fn effective_category(&self) -> String {
        match self.kind {
            TxKind::Income => INCOME_CATEGORY.to_string(),
            TxKind::Expense => self
                .category
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or("Lainnya")
                .to_string(),
        }
    }
}

/// One query's worth of filter selections, as supplied by the UI layer.
///
/// Date fields are mutually exclusive in effect: `exact_date` wins over
/// `month`+`year`, which wins over `year` alone. `all` skips date
/// filtering entirely but leaves owner and search filters active. A
/// filter with nothing set behaves like `all` (documented choice; the
/// historical revisions disagreed on this).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub owner_id: Option<String>,
    /// Case-insensitive substring match against the owner display name,
    /// the "tab per person" pattern.
    pub owner_tab: Option<String>,
    pub exact_date: Option<NaiveDate>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub all: bool,
    pub search: Option<String>,
}

impl FilterSpec {
    pub fn everything() -> Self {
        FilterSpec {
            all: true,
            ..FilterSpec::default()
        }
    }
}
