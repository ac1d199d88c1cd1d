// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analyzer::MAX_TREND_MONTHS;
use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use std::path::PathBuf;

fn json_args(cmd: Command) -> Command {
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
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn year_month_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("year").long("year").required(true).help("Year (YYYY)"))
        .arg(
            Arg::new("month")
                .long("month")
                .required(true)
                .help("Month number (1-12)"),
        )
}

fn kind_arg(required: bool) -> Arg {
    Arg::new("kind")
        .long("kind")
        .required(required)
        .value_parser(["income", "expense"])
        .help("Entry kind")
}

fn entry_command(name: &'static str, counterparty: &'static str) -> Command {
    Command::new(name)
        .about(format!("Record and inspect {} entries", name))
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about(format!("Record a new {} entry", name))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("counterparty")
                        .long(counterparty)
                        .required(true)
                        .help(format!("Who the {} is with", name)),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("description").long("description"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD or 'YYYY-MM-DD HH:MM:SS'; defaults to now"),
                ),
        )
        .subcommand(json_args(
            Command::new("list")
                .about(format!("List {} entries", name))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_args(
            Command::new("summary").about(format!("Totals per {} category", name)),
        ))
}

pub fn build_cli() -> Command {
    Command::new("budget-tracker")
        .version(crate_version!())
        .about("Personal budget tracker: income, expenses, monthly reports and trends")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("BUDGET_TRACKER_DB")
                .value_parser(value_parser!(PathBuf))
                .help("SQLite database path"),
        )
        .arg(
            Arg::new("reports_dir")
                .long("reports-dir")
                .global(true)
                .env("BUDGET_TRACKER_REPORTS_DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory for exported reports"),
        )
        .arg(
            Arg::new("init_db")
                .long("init-db")
                .action(ArgAction::SetTrue)
                .help("Initialize the database and exit"),
        )
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(Command::new("menu").about("Interactive menu (the default)"))
        .subcommand(entry_command("income", "source"))
        .subcommand(entry_command("expense", "vendor"))
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add a custom category")
                        .arg(kind_arg(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .default_value(""),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List built-in and custom categories")
                        .arg(kind_arg(false)),
                )),
        )
        .subcommand(json_args(
            Command::new("summary").about("All-time income, expenses and balance"),
        ))
        .subcommand(
            Command::new("report")
                .about("Text reports")
                .subcommand_required(true)
                .subcommand(json_args(year_month_args(
                    Command::new("monthly").about("Monthly financial report"),
                )))
                .subcommand(json_args(
                    Command::new("trend").about("Month-by-month trend").arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(
                                value_parser!(u32).range(0..=i64::from(MAX_TREND_MONTHS)),
                            )
                            .default_value("6")
                            .help("Months to look back (0-1200)"),
                    ),
                )),
        )
        .subcommand(year_month_args(
            Command::new("export")
                .about("Export a monthly report")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("all")
                        .help("csv, xlsx or all"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output file (single format only)"),
                ),
        ))
}
