// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

use crate::models::CATEGORIES;

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month being viewed, YYYY-MM (default: current month)")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Transaction id")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

fn frequency_arg() -> Arg {
    Arg::new("frequency")
        .long("frequency")
        .short('f')
        .default_value("Monthly")
        .help("One-time, Weekly, Bi-Weekly or Monthly")
}

fn all_future_arg() -> Arg {
    Arg::new("all-future")
        .long("all-future")
        .action(ArgAction::SetTrue)
        .help("Apply to this and every later occurrence of a recurring series")
}

fn add_cmd() -> Command {
    Command::new("add")
        .about("Record income or an expense")
        .subcommand_required(true)
        .subcommand(
            Command::new("income")
                .arg(Arg::new("desc").long("desc").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("due")
                        .long("due")
                        .help("YYYY-MM-DD (default: today)"),
                )
                .arg(frequency_arg())
                .arg(month_arg()),
        )
        .subcommand(
            Command::new("expense")
                .arg(Arg::new("desc").long("desc").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("due").long("due").required(true).help("YYYY-MM-DD"))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .default_value("Bills")
                        .help(format!("{}, or any custom name", CATEGORIES.join(", "))),
                )
                .arg(frequency_arg())
                .arg(month_arg()),
        )
}

fn report_cmd() -> Command {
    let sub = |name: &'static str, about: &'static str| {
        Command::new(name)
            .about(about)
            .arg(month_arg())
            .args(json_args())
    };
    Command::new("report")
        .about("Monthly totals and summaries")
        .subcommand_required(true)
        .subcommand(sub("totals", "Income, expenses and paid totals"))
        .subcommand(sub("payments", "Expense payment progress"))
        .subcommand(sub("summary", "Income received against expenses"))
        .subcommand(sub("categories", "Expenses by category"))
        .subcommand(sub("trends", "Income and expenses over recent months").arg(
            Arg::new("months")
                .long("months")
                .value_parser(value_parser!(u16).range(1..=120))
                .default_value("6")
                .help("Number of months, 1 to 120"),
        ))
}

fn card_cmd() -> Command {
    Command::new("card")
        .about("Credit cards and loans")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("balance").long("balance").required(true))
                .arg(Arg::new("rate").long("rate").default_value("0"))
                .arg(Arg::new("min").long("min").required(true)),
        )
        .subcommand(Command::new("list").args(json_args()))
        .subcommand(
            Command::new("edit")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("balance").long("balance"))
                .arg(Arg::new("rate").long("rate"))
                .arg(Arg::new("min").long("min")),
        )
        .subcommand(
            Command::new("delete")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("budget")
                .about("Show or set the monthly debt-payment budget")
                .arg(Arg::new("amount")),
        )
}

pub fn build_cli() -> Command {
    Command::new("duebook")
        .version(crate_version!())
        .about("Monthly bills, recurring transactions and debt records")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Database file (default: $DUEBOOK_DB or the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(add_cmd())
        .subcommand(
            Command::new("list")
                .about("Transactions of a month")
                .arg(month_arg())
                .arg(Arg::new("type").long("type").help("income or expense"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("edit")
                .about("Change a transaction")
                .arg(id_arg())
                .arg(month_arg())
                .arg(Arg::new("desc").long("desc"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("due").long("due"))
                .arg(all_future_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a transaction")
                .arg(id_arg())
                .arg(month_arg())
                .arg(all_future_arg())
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Do not ask for confirmation"),
                ),
        )
        .subcommand(
            Command::new("pay")
                .about("Toggle paid")
                .arg(id_arg())
                .arg(month_arg()),
        )
        .subcommand(
            Command::new("skip")
                .about("Toggle skipped")
                .arg(id_arg())
                .arg(month_arg()),
        )
        .subcommand(report_cmd())
        .subcommand(card_cmd())
        .subcommand(
            Command::new("export")
                .about("Write a month's transactions to a file")
                .arg(month_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv or json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}
