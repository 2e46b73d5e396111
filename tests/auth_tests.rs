// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use kasbuku::auth::{self, Role};
use kasbuku::models::{Transaction, TxKind};

fn tx_on(owner_id: &str, y: i32, m: u32, d: u32) -> Transaction {
    Transaction {
        id: "t1".to_string(),
        owner_id: owner_id.to_string(),
        owner_name: owner_id.to_string(),
        kind: TxKind::Expense,
        category: "Fuel".to_string(),
        note: None,
        amount: 10_000,
        occurred_at: NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        attachment_url: None,
    }
}

#[test]
fn authenticate_checks_password_exactly() {
    assert!(auth::authenticate("wirdan", "rasau@40").is_some());
    assert!(auth::authenticate("wirdan", "wrong").is_none());
    assert!(auth::authenticate("nobody", "rasau@40").is_none());
}

#[test]
fn username_match_is_case_insensitive() {
    let user = auth::authenticate("WIRDAN", "rasau@40").unwrap();
    assert_eq!(user.id, "w1");
    assert!(auth::find_user(" Mazkafh ").is_some());
}

#[test]
fn roster_has_expected_roles() {
    let admins: Vec<_> = auth::all_users().filter(|u| u.role == Role::Admin).collect();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].username, "mazkafh");
    assert_eq!(auth::all_users().count(), 3);
}

#[test]
fn admin_deletes_anything() {
    let admin = auth::find_user("mazkafh").unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    let old_foreign = tx_on("w1", 2024, 6, 1);
    assert!(auth::can_delete(admin, &old_foreign, today));
}

#[test]
fn worker_deletes_only_own_same_day_entries() {
    let worker = auth::find_user("wirdan").unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

    let own_today = tx_on("w1", 2025, 1, 10);
    assert!(auth::can_delete(worker, &own_today, today));

    let own_yesterday = tx_on("w1", 2025, 1, 9);
    assert!(!auth::can_delete(worker, &own_yesterday, today));

    let foreign_today = tx_on("w2", 2025, 1, 10);
    assert!(!auth::can_delete(worker, &foreign_today, today));
}
