// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::Connection;
use std::path::Path;

use crate::store;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => create(conn, sub),
        Some(("restore", sub)) => restore(conn, sub),
        _ => Ok(()),
    }
}

fn create(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out = match sub.get_one::<String>("out") {
        Some(o) => o.clone(),
        None => store::backup_filename(Local::now().date_naive()),
    };
    let count = store::export_backup(conn, Path::new(&out))?;
    println!("Backed up {} entries to {}", count, out);
    Ok(())
}

fn restore(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let file = sub.get_one::<String>("file").unwrap();
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Read backup file {}", file))?;
    let summary = store::restore_backup(conn, &json)?;
    println!(
        "Restored {} entries from {} ({} malformed records skipped)",
        summary.imported, file, summary.skipped
    );
    Ok(())
}
