// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use kasbuku::engine::filter::sort_for_report;
use kasbuku::engine::report::{daybook_rows, report_filename};
use kasbuku::models::{FilterSpec, Transaction, TxKind};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn tx(id: &str, kind: TxKind, amount: i64, when: NaiveDateTime) -> Transaction {
    Transaction {
        id: id.to_string(),
        owner_id: "w1".to_string(),
        owner_name: "Wirdan".to_string(),
        kind,
        category: "Fuel".to_string(),
        note: None,
        amount,
        occurred_at: when,
        attachment_url: None,
    }
}

#[test]
fn one_date_label_per_day_subtotal_on_last_row() {
    let mut records = vec![
        tx("t1", TxKind::Income, 100_000, at(2025, 1, 5, 8)),
        tx("t2", TxKind::Expense, 30_000, at(2025, 1, 5, 10)),
        tx("t3", TxKind::Expense, 10_000, at(2025, 1, 5, 15)),
        tx("t4", TxKind::Expense, 20_000, at(2025, 1, 6, 9)),
    ];
    sort_for_report(&mut records);
    let rows = daybook_rows(&records);
    assert_eq!(rows.len(), 4);

    let labeled: Vec<bool> = rows.iter().map(|r| r.date.is_some()).collect();
    assert_eq!(labeled, vec![true, false, false, true]);

    let subtotals: Vec<Option<i64>> = rows.iter().map(|r| r.daily_balance).collect();
    assert_eq!(subtotals, vec![None, None, Some(60_000), Some(-20_000)]);
}

#[test]
fn amount_lands_in_exactly_one_column() {
    let records = vec![
        tx("t1", TxKind::Income, 100_000, at(2025, 1, 5, 8)),
        tx("t2", TxKind::Expense, 30_000, at(2025, 1, 5, 10)),
    ];
    let rows = daybook_rows(&records);
    assert_eq!((rows[0].money_in, rows[0].money_out), (100_000, 0));
    assert_eq!((rows[1].money_in, rows[1].money_out), (0, 30_000));
}

#[test]
fn label_prefers_note_and_neutralizes_commas() {
    let mut t = tx("t1", TxKind::Expense, 5_000, at(2025, 1, 5, 8));
    t.note = Some("beli solar, oli, dan filter".to_string());
    let rows = daybook_rows(&[t]);
    assert_eq!(rows[0].label, "beli solar  oli  dan filter");
    assert!(!rows[0].label.contains(','));
}

#[test]
fn attachment_placeholder_when_absent() {
    let mut with = tx("t1", TxKind::Expense, 5_000, at(2025, 1, 5, 8));
    with.attachment_url = Some("https://img.example/nota1.jpg".to_string());
    let without = tx("t2", TxKind::Expense, 6_000, at(2025, 1, 5, 9));
    let rows = daybook_rows(&[with, without]);
    assert_eq!(rows[0].attachment, "https://img.example/nota1.jpg");
    assert_eq!(rows[1].attachment, "-");
}

#[test]
fn empty_input_builds_no_rows() {
    assert!(daybook_rows(&[]).is_empty());
}

#[test]
fn separate_days_never_share_a_group() {
    // Same wall-clock boundary: 23:00 and next day 01:00 are different
    // business dates even though they are two hours apart.
    let records = vec![
        tx("t1", TxKind::Expense, 1_000, at(2025, 1, 5, 23)),
        tx("t2", TxKind::Expense, 2_000, at(2025, 1, 6, 1)),
    ];
    let rows = daybook_rows(&records);
    assert!(rows[0].date.is_some());
    assert!(rows[1].date.is_some());
    assert_eq!(rows[0].daily_balance, Some(-1_000));
    assert_eq!(rows[1].daily_balance, Some(-2_000));
}

#[test]
fn filename_encodes_tab_scope_and_timestamp() {
    let now = at(2025, 3, 14, 9);
    let monthly = FilterSpec {
        owner_tab: Some("Wirdan".to_string()),
        month: Some(1),
        year: Some(2025),
        ..FilterSpec::default()
    };
    assert_eq!(
        report_filename(&monthly, now),
        "laporan_kas_wirdan_2025-01_20250314090000.csv"
    );

    let all_time = FilterSpec::everything();
    assert_eq!(
        report_filename(&all_time, now),
        "laporan_kas_semua_semua-waktu_20250314090000.csv"
    );

    let yearly = FilterSpec {
        year: Some(2024),
        ..FilterSpec::default()
    };
    assert_eq!(
        report_filename(&yearly, now),
        "laporan_kas_semua_2024_20250314090000.csv"
    );
}

#[test]
fn filenames_differ_across_generations() {
    let f = FilterSpec::everything();
    let a = report_filename(&f, at(2025, 3, 14, 9));
    let b = report_filename(&f, at(2025, 3, 14, 10));
    assert_ne!(a, b);
}
