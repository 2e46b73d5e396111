// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};

use crate::models::FilterSpec;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts `YYYY-MM-DD HH:MM` or a bare `YYYY-MM-DD` (midnight).
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    let date = parse_date(s)?;
    date.and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid date '{}'", s))
}

/// Rupiah display: whole units, dot as thousands separator (id-ID style).
pub fn fmt_money(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if negative {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Builds a `FilterSpec` from the shared filter flags carried by `tx list`,
/// `report *`, and `export daybook`.
pub fn filter_from_matches(m: &clap::ArgMatches) -> Result<FilterSpec> {
    let mut filter = FilterSpec {
        all: m.get_flag("all"),
        ..FilterSpec::default()
    };
    if let Some(username) = m.get_one::<String>("user") {
        let user = crate::auth::find_user(username)
            .with_context(|| format!("Unknown user '{}'", username))?;
        filter.owner_id = Some(user.id.to_string());
    }
    if let Some(tab) = m.get_one::<String>("tab") {
        filter.owner_tab = Some(tab.clone());
    }
    if let Some(date) = m.get_one::<String>("date") {
        filter.exact_date = Some(parse_date(date)?);
    }
    filter.month = m.get_one::<u32>("month").copied();
    filter.year = m.get_one::<i32>("year").copied();
    if let Some(term) = m.get_one::<String>("search") {
        filter.search = Some(term.clone());
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::fmt_money;

    #[test]
    fn groups_rupiah_thousands() {
        assert_eq!(fmt_money(0), "Rp 0");
        assert_eq!(fmt_money(950), "Rp 950");
        assert_eq!(fmt_money(100_000), "Rp 100.000");
        assert_eq!(fmt_money(1_234_567), "Rp 1.234.567");
        assert_eq!(fmt_money(-50_000), "-Rp 50.000");
    }
}
