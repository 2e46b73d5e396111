// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;

use crate::models::{NewTransaction, Transaction, TxKind};
use crate::utils::{filter_from_matches, fmt_money, parse_datetime, pretty_table};
use crate::{auth, engine, store, utils};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("user").unwrap();
    let user = auth::find_user(username).with_context(|| format!("Unknown user '{}'", username))?;
    let kind: TxKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let amount = *sub.get_one::<i64>("amount").unwrap();
    let occurred_at = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s)?,
        None => Local::now().naive_local(),
    };

    let tx = store::insert(
        conn,
        NewTransaction {
            owner_id: user.id.to_string(),
            owner_name: user.name.to_string(),
            kind,
            category: sub.get_one::<String>("category").cloned(),
            note: sub.get_one::<String>("note").cloned(),
            amount,
            occurred_at,
            attachment_url: sub.get_one::<String>("attachment").cloned(),
        },
    )?;
    println!(
        "Recorded {} {} for {} on {} (id: {})",
        tx.kind,
        fmt_money(tx.amount),
        tx.owner_name,
        tx.business_date(),
        tx.id
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub user: String,
    pub kind: String,
    pub category: String,
    pub label: String,
    pub amount: String,
    pub attachment: String,
}

/// Snapshot-then-query: the store hands over everything, the engine does
/// the filtering. Returns display rows, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = filter_from_matches(sub)?;
    let all = store::list_all(conn)?;
    let mut matched = engine::filter::query(&all, &filter);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        matched.truncate(*limit);
    }
    Ok(matched.iter().map(to_row).collect())
}

fn to_row(t: &Transaction) -> TransactionRow {
    TransactionRow {
        id: t.id.clone(),
        date: t.occurred_at.format("%Y-%m-%d %H:%M").to_string(),
        user: t.owner_name.clone(),
        kind: t.kind.to_string(),
        category: t.category.clone(),
        label: t.display_label().to_string(),
        amount: match t.kind {
            TxKind::Income => format!("+{}", fmt_money(t.amount)),
            TxKind::Expense => format!("-{}", fmt_money(t.amount)),
        },
        attachment: t.attachment_url.clone().unwrap_or_else(|| "-".to_string()),
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !utils::maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.user.clone(),
                    r.category.clone(),
                    r.label.clone(),
                    r.amount.clone(),
                    r.attachment.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "User", "Category", "Note", "Amount", "Nota"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let username = sub.get_one::<String>("user").unwrap();
    let user = auth::find_user(username).with_context(|| format!("Unknown user '{}'", username))?;
    let tx = store::get(conn, id)?.with_context(|| format!("No entry with id '{}'", id))?;

    let today = Local::now().date_naive();
    if !auth::can_delete(user, &tx, today) {
        bail!(
            "{} may not delete entry {}: workers can remove only their own same-day entries",
            user.name,
            id
        );
    }
    store::delete(conn, id)?;
    println!(
        "Deleted {} {} from {} ({})",
        tx.kind,
        fmt_money(tx.amount),
        tx.owner_name,
        tx.business_date()
    );
    Ok(())
}
