// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction store: SQLite CRUD plus the normalization boundary for
//! backup files written by older backends. The query engine only ever
//! sees the canonical `Transaction` shape produced here.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::engine::aggregate::{self, LedgerTotals};
use crate::models::{INCOME_CATEGORY, NewTransaction, Transaction, TxKind};

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

static ID_SEQ: AtomicU64 = AtomicU64::new(0);

/// Opaque unique id: creation instant plus a process-local sequence so
/// entries created in the same millisecond stay distinct.
fn next_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let seq = ID_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{:x}{:04x}", millis, seq & 0xffff)
}

/// Validates and inserts a new entry, returning the stored record.
pub fn insert(conn: &Connection, new: NewTransaction) -> Result<Transaction> {
    new.validate(Local::now().naive_local())?;
    let tx = Transaction {
        id: next_id(),
        owner_id: new.owner_id.clone(),
        owner_name: new.owner_name.clone(),
        kind: new.kind,
        category: new.effective_category(),
        note: new.note.clone().filter(|n| !n.trim().is_empty()),
        amount: new.amount,
        occurred_at: new.occurred_at,
        attachment_url: new.attachment_url.clone().filter(|u| !u.trim().is_empty()),
    };
    insert_row(conn, &tx)?;
    Ok(tx)
}

fn insert_row(conn: &Connection, tx: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, owner_id, owner_name, kind, category, note, amount, occurred_at, attachment_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            tx.id,
            tx.owner_id,
            tx.owner_name,
            tx.kind.as_str(),
            tx.category,
            tx.note,
            tx.amount,
            tx.occurred_at.format(DATETIME_FMT).to_string(),
            tx.attachment_url,
        ],
    )
    .with_context(|| format!("Insert transaction {}", tx.id))?;
    Ok(())
}

/// Materializes the full record set, newest first. Filtering is the
/// engine's job, not a SQL concern, so this stays a plain scan.
pub fn list_all(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, owner_name, kind, category, note, amount, occurred_at, attachment_url
         FROM transactions ORDER BY occurred_at DESC, id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(row_to_transaction(r)?);
    }
    Ok(data)
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, owner_name, kind, category, note, amount, occurred_at, attachment_url
         FROM transactions WHERE id=?1",
    )?;
    let found = stmt
        .query_row(params![id], |r| {
            // defer parsing errors to row_to_transaction outside the closure
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, Option<String>>(5)?,
                r.get::<_, i64>(6)?,
                r.get::<_, String>(7)?,
                r.get::<_, Option<String>>(8)?,
            ))
        })
        .optional()?;
    match found {
        Some(raw) => Ok(Some(tuple_to_transaction(raw)?)),
        None => Ok(None),
    }
}

/// Permanent removal. Returns whether a row was actually deleted.
pub fn delete(conn: &Connection, id: &str) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM transactions WHERE id=?1", params![id])
        .with_context(|| format!("Delete transaction {}", id))?;
    Ok(n > 0)
}

pub fn count(conn: &Connection) -> Result<usize> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
    Ok(n as usize)
}

/// Totals over the entire database, ignoring any active filter. Feeds the
/// "master database" summary card.
pub fn master_stats(conn: &Connection) -> Result<LedgerTotals> {
    let all = list_all(conn)?;
    Ok(aggregate::aggregate(&all))
}

fn row_to_transaction(r: &rusqlite::Row<'_>) -> Result<Transaction> {
    tuple_to_transaction((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
        r.get(8)?,
    ))
}

type RawRow = (
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    i64,
    String,
    Option<String>,
);

fn tuple_to_transaction(raw: RawRow) -> Result<Transaction> {
    let (id, owner_id, owner_name, kind, category, note, amount, occurred_at, attachment_url) =
        raw;
    let kind = TxKind::from_str(&kind)?;
    let occurred_at = NaiveDateTime::parse_from_str(&occurred_at, DATETIME_FMT)
        .with_context(|| format!("Bad occurred_at '{}' on transaction {}", occurred_at, id))?;
    Ok(Transaction {
        id,
        owner_id,
        owner_name,
        kind,
        category,
        note,
        amount,
        occurred_at,
        attachment_url,
    })
}

// --- Backup / restore -------------------------------------------------

pub fn backup_filename(today: NaiveDate) -> String {
    format!("backup_kas_full_{}.json", today.format("%Y-%m-%d"))
}

/// Writes the full canonical set as pretty JSON. Returns the record count.
pub fn export_backup(conn: &Connection, path: &Path) -> Result<usize> {
    let all = list_all(conn)?;
    let json = serde_json::to_string_pretty(&all)?;
    std::fs::write(path, json)
        .with_context(|| format!("Write backup to {}", path.display()))?;
    Ok(all.len())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// A record as older backends wrote it. Field names drifted across
/// revisions (`name` / `nama` / `nama_user`, millisecond timestamps,
/// Indonesian column labels); everything maps into the canonical shape
/// here and nowhere else.
#[derive(Debug, Deserialize)]
struct LegacyRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default, alias = "nama", alias = "nama_user")]
    name: Option<String>,
    #[serde(default, alias = "kategori")]
    category: Option<String>,
    #[serde(default, alias = "keterangan")]
    note: Option<String>,
    #[serde(default, alias = "nominal")]
    amount: Option<i64>,
    /// Epoch milliseconds in the realtime-store revisions.
    #[serde(default)]
    timestamp: Option<i64>,
    /// `YYYY-MM-DD` business date in the SQL revisions.
    #[serde(default, alias = "tanggal")]
    date: Option<String>,
    #[serde(default, alias = "type")]
    kind: Option<String>,
    #[serde(default, alias = "notaUrl", alias = "nota")]
    attachment_url: Option<String>,
}

impl LegacyRecord {
    /// Maps a legacy document to the canonical shape. Malformed rows
    /// (missing kind or date, non-positive amount) yield `None` and are
    /// dropped at this boundary rather than coerced downstream.
    fn normalize(self) -> Option<Transaction> {
        let kind = TxKind::from_str(self.kind.as_deref()?).ok()?;
        let amount = self.amount.unwrap_or(0);
        if amount <= 0 {
            return None;
        }
        let occurred_at = match (self.timestamp, self.date.as_deref()) {
            (Some(ms), _) => chrono::DateTime::from_timestamp_millis(ms)?
                .with_timezone(&Local)
                .naive_local(),
            (None, Some(d)) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)?,
            (None, None) => return None,
        };
        let owner_name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "User".to_string());
        let owner_id = self
            .uid
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| owner_name.trim().to_lowercase());
        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| match kind {
                TxKind::Income => INCOME_CATEGORY.to_string(),
                TxKind::Expense => "Lainnya".to_string(),
            });
        Some(Transaction {
            id: self.id.filter(|i| !i.trim().is_empty()).unwrap_or_else(next_id),
            owner_id,
            owner_name,
            kind,
            category,
            note: self.note.filter(|n| !n.trim().is_empty()),
            amount,
            occurred_at,
            attachment_url: self.attachment_url.filter(|u| !u.trim().is_empty()),
        })
    }
}

/// Replaces the whole record set with the contents of a backup file.
/// Accepts both canonical backups written by this tool and legacy JSON
/// written by earlier backend revisions.
pub fn restore_backup(conn: &mut Connection, json: &str) -> Result<RestoreSummary> {
    let (records, skipped) = match serde_json::from_str::<Vec<Transaction>>(json) {
        Ok(canonical) => (canonical, 0),
        Err(_) => {
            let legacy: Vec<LegacyRecord> =
                serde_json::from_str(json).context("Backup file is not a transaction array")?;
            let total = legacy.len();
            let records: Vec<Transaction> =
                legacy.into_iter().filter_map(LegacyRecord::normalize).collect();
            let skipped = total - records.len();
            (records, skipped)
        }
    };

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM transactions", [])?;
    for record in &records {
        insert_row(&tx, record)?;
    }
    tx.commit()?;
    Ok(RestoreSummary {
        imported: records.len(),
        skipped,
    })
}
