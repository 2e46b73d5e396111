// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Static user roster and the deletion policy. Kept deliberately outside
//! the query engine; the engine never inspects roles.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Worker,
    Admin,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct User {
    pub id: &'static str,
    pub username: &'static str,
    pub name: &'static str,
    pub role: Role,
}

struct Credential {
    user: User,
    password: &'static str,
}

// The roster is a fixed list; per the system's scope there is no user
// management and no password hashing.
static USERS: &[Credential] = &[
    Credential {
        user: User {
            id: "w1",
            username: "wirdan",
            name: "Wirdan",
            role: Role::Worker,
        },
        password: "rasau@40",
    },
    Credential {
        user: User {
            id: "w2",
            username: "zulfan",
            name: "Zulfan",
            role: Role::Worker,
        },
        password: "Sorek@50",
    },
    Credential {
        user: User {
            id: "a1",
            username: "mazkafh",
            name: "Admin Mazkafh",
            role: Role::Admin,
        },
        password: "Azkanibang",
    },
];

/// Username is matched case-insensitively, the password exactly.
pub fn authenticate(username: &str, password: &str) -> Option<&'static User> {
    USERS
        .iter()
        .find(|c| c.user.username.eq_ignore_ascii_case(username.trim()) && c.password == password)
        .map(|c| &c.user)
}

pub fn find_user(username: &str) -> Option<&'static User> {
    USERS
        .iter()
        .find(|c| c.user.username.eq_ignore_ascii_case(username.trim()))
        .map(|c| &c.user)
}

pub fn all_users() -> impl Iterator<Item = &'static User> {
    USERS.iter().map(|c| &c.user)
}

/// Deletion policy: admins delete anything; workers delete only their own
/// entries dated today. Deletion is permanent either way.
pub fn can_delete(user: &User, tx: &Transaction, today: NaiveDate) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Worker => tx.owner_id == user.id && tx.business_date() == today,
    }
}
