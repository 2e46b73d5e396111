// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use kasbuku::models::{NewTransaction, TxKind};
use kasbuku::{cli, commands::exporter, commands::transactions, db, store};
use rusqlite::Connection;
use tempfile::tempdir;

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn seeded() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let rows = [
        ("w1", "Wirdan", TxKind::Income, 100_000, at(2025, 1, 5, 8), None),
        ("w1", "Wirdan", TxKind::Expense, 30_000, at(2025, 1, 5, 14), Some("solar")),
        ("w2", "Zulfan", TxKind::Expense, 20_000, at(2025, 1, 6, 9), Some("oli")),
        ("w2", "Zulfan", TxKind::Expense, 5_000, at(2024, 12, 1, 9), Some("lama")),
    ];
    for (uid, name, kind, amount, when, note) in rows {
        store::insert(
            &conn,
            NewTransaction {
                owner_id: uid.to_string(),
                owner_name: name.to_string(),
                kind,
                category: Some("Fuel".to_string()),
                note: note.map(str::to_string),
                amount,
                occurred_at: when,
                attachment_url: None,
            },
        )
        .unwrap();
    }
    conn
}

#[test]
fn list_limit_respected_newest_first() {
    let conn = seeded();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["kasbuku", "tx", "list", "--all", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-06 09:00");
            assert_eq!(rows[1].date, "2025-01-05 14:00");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_month_filter_needs_year_flag_too() {
    let conn = seeded();
    let cli = cli::build_cli();
    // --month alone degrades to no date filter at all.
    let matches = cli.get_matches_from(["kasbuku", "tx", "list", "--month", "1"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 4);
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_user_filter_scopes_to_owner() {
    let conn = seeded();
    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["kasbuku", "tx", "list", "--all", "--user", "zulfan"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert!(rows.iter().all(|r| r.user == "Zulfan"));
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn daybook_export_groups_days_in_csv() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("laporan.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "kasbuku", "export", "daybook", "--month", "1", "--year", "2025", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Tgl,Keterangan,Masuk,Keluar,Saldo Harian,User,Nota");
    // First day: date label once, subtotal on the closing row.
    assert_eq!(lines[1], "05/01/2025,Kas Masuk,100000,,,Wirdan,-");
    assert_eq!(lines[2], ",solar,,30000,70000,Wirdan,-");
    // Next day opens a fresh group; December entry was filtered out.
    assert_eq!(lines[3], "06/01/2025,oli,,20000,-20000,Zulfan,-");
}
