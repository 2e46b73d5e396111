// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::engine::aggregate::{self, LedgerTotals};
use crate::utils::{filter_from_matches, fmt_money, maybe_print_json, pretty_table};
use crate::{engine, store};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("by-user", sub)) => by_user(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn filtered(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<crate::models::Transaction>> {
    let filter = filter_from_matches(sub)?;
    let all = store::list_all(conn)?;
    Ok(engine::filter::query(&all, &filter))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let matched = filtered(conn, sub)?;
    let totals = aggregate::aggregate(&matched);
    let master = store::master_stats(conn)?;

    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let balance = if totals.is_deficit() {
            format!("{} (defisit)", fmt_money(totals.net_balance))
        } else {
            fmt_money(totals.net_balance)
        };
        let rows = vec![
            vec!["Entries".to_string(), totals.count.to_string()],
            vec!["Total Masuk".to_string(), fmt_money(totals.total_income)],
            vec!["Total Keluar".to_string(), fmt_money(totals.total_expense)],
            vec!["Saldo".to_string(), balance],
        ];
        println!("{}", pretty_table(&["", "Filtered"], rows));
        println!(
            "Master database: {} entries, saldo {}",
            master.count,
            fmt_money(master.net_balance)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct OwnerTotalsRow {
    user: String,
    #[serde(flatten)]
    totals: LedgerTotals,
}

fn by_user(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let matched = filtered(conn, sub)?;
    let breakdown: Vec<OwnerTotalsRow> = aggregate::aggregate_by_owner(&matched)
        .into_iter()
        .map(|(user, totals)| OwnerTotalsRow { user, totals })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        let rows: Vec<Vec<String>> = breakdown
            .iter()
            .map(|r| {
                vec![
                    r.user.clone(),
                    r.totals.count.to_string(),
                    fmt_money(r.totals.total_income),
                    fmt_money(r.totals.total_expense),
                    fmt_money(r.totals.net_balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["User", "Entries", "Masuk", "Keluar", "Saldo"], rows)
        );
    }
    Ok(())
}
