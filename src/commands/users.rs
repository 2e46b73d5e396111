// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::auth;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let users: Vec<_> = auth::all_users().collect();
    if !maybe_print_json(json_flag, jsonl_flag, &users)? {
        let rows: Vec<Vec<String>> = users
            .iter()
            .map(|u| {
                vec![
                    u.username.to_string(),
                    u.name.to_string(),
                    format!("{:?}", u.role).to_lowercase(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Username", "Name", "Role"], rows));
    }
    Ok(())
}
