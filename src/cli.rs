// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

/// Filter flags shared by `tx list`, `report *`, and `export daybook`.
fn filter_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("user")
            .long("user")
            .value_name("USERNAME")
            .help("Restrict to one user's entries"),
    )
    .arg(
        Arg::new("tab")
            .long("tab")
            .value_name("NAME")
            .help("Restrict by owner display name (case-insensitive substring)"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .value_name("YYYY-MM-DD")
            .help("Restrict to a single calendar day"),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .value_name("M")
            .value_parser(value_parser!(u32).range(1..=12))
            .help("Restrict to a month (requires --year)"),
    )
    .arg(
        Arg::new("year")
            .long("year")
            .value_name("YYYY")
            .value_parser(value_parser!(i32))
            .help("Restrict to a year"),
    )
    .arg(
        Arg::new("all")
            .long("all")
            .action(ArgAction::SetTrue)
            .help("Ignore date filters and cover all time"),
    )
    .arg(
        Arg::new("search")
            .long("search")
            .value_name("TERM")
            .help("Match note, category, or user name (case-insensitive)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("kasbuku")
        .about("Kas ledger: record, filter, and report team cash entries")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database and print its location"))
        .subcommand(
            Command::new("tx")
                .about("Record, list, and delete entries")
                .subcommand(
                    Command::new("add")
                        .about("Record a kas entry")
                        .arg(
                            Arg::new("user")
                                .long("user")
                                .value_name("USERNAME")
                                .required(true),
                        )
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_name("income|expense")
                                .required(true),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .value_name("RUPIAH")
                                .value_parser(value_parser!(i64))
                                .required(true),
                        )
                        .arg(Arg::new("category").long("category").value_name("LABEL"))
                        .arg(Arg::new("note").long("note").value_name("TEXT"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD [HH:MM]")
                                .help("Business date; defaults to now, future dates rejected"),
                        )
                        .arg(
                            Arg::new("attachment")
                                .long("attachment")
                                .value_name("URL")
                                .help("Receipt image reference"),
                        ),
                )
                .subcommand(json_flags(filter_flags(
                    Command::new("list").about("List entries matching the filters").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_name("N")
                            .value_parser(value_parser!(usize)),
                    ),
                )))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an entry (workers: own same-day entries only)")
                        .arg(Arg::new("id").long("id").value_name("ID").required(true))
                        .arg(
                            Arg::new("user")
                                .long("user")
                                .value_name("USERNAME")
                                .required(true),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Totals and per-user breakdowns")
                .subcommand(json_flags(filter_flags(
                    Command::new("summary").about("Income, expense, and net balance"),
                )))
                .subcommand(json_flags(filter_flags(
                    Command::new("by-user").about("Independent totals per user"),
                ))),
        )
        .subcommand(
            Command::new("export").about("Write reports to files").subcommand(filter_flags(
                Command::new("daybook")
                    .about("CSV daybook: grouped date labels and daily subtotals")
                    .arg(
                        Arg::new("out")
                            .long("out")
                            .value_name("FILE")
                            .help("Output path; defaults to a scope-stamped name in the current dir"),
                    ),
            )),
        )
        .subcommand(
            Command::new("backup")
                .about("Full-database JSON backup and restore")
                .subcommand(
                    Command::new("create")
                        .about("Write all entries to a JSON file")
                        .arg(Arg::new("out").long("out").value_name("FILE")),
                )
                .subcommand(
                    Command::new("restore")
                        .about("Replace all entries from a JSON file (accepts legacy layouts)")
                        .arg(
                            Arg::new("file")
                                .long("file")
                                .value_name("FILE")
                                .required(true),
                        ),
                ),
        )
        .subcommand(json_flags(
            Command::new("users").about("List known users and roles"),
        ))
}
