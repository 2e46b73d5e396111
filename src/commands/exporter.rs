// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;

use crate::engine::report;
use crate::utils::filter_from_matches;
use crate::{engine, store};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("daybook", sub)) => export_daybook(conn, sub),
        _ => Ok(()),
    }
}

fn export_daybook(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let filter = filter_from_matches(sub)?;
    let all = store::list_all(conn)?;
    // The daybook reads oldest-first, the opposite of display order.
    let mut matched = engine::filter::query(&all, &filter);
    engine::filter::sort_for_report(&mut matched);
    let rows = report::daybook_rows(&matched);

    let out = match sub.get_one::<String>("out") {
        Some(o) => o.clone(),
        None => report::report_filename(&filter, Local::now().naive_local()),
    };

    let mut wtr = csv::Writer::from_path(&out)?;
    wtr.write_record(["Tgl", "Keterangan", "Masuk", "Keluar", "Saldo Harian", "User", "Nota"])?;
    for row in &rows {
        wtr.write_record([
            row.date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            row.label.clone(),
            if row.money_in > 0 {
                row.money_in.to_string()
            } else {
                String::new()
            },
            if row.money_out > 0 {
                row.money_out.to_string()
            } else {
                String::new()
            },
            row.daily_balance.map(|b| b.to_string()).unwrap_or_default(),
            row.owner.clone(),
            row.attachment.clone(),
        ])?;
    }
    wtr.flush()?;
    println!("Exported {} rows to {}", rows.len(), out);
    Ok(())
}
