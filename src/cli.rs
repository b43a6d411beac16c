// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

use crate::aggregate::Granularity;
use crate::router::SearchMode;

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Transaction id")
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .short('p')
        .value_parser(value_parser!(Granularity))
        .default_value("month")
        .help("Bucket size")
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .required(true)
        .help("csv|json")
}

fn out_arg() -> Arg {
    Arg::new("out")
        .long("out")
        .short('o')
        .required(true)
        .help("Output file")
}

fn tx_command() -> Command {
    Command::new("tx")
        .about("Record, edit and look up transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("amount").long("amount").required(true).allow_hyphen_values(true))
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .help("inflow|outflow (entrada|saida also accepted)"),
                )
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD")),
        )
        .subcommand(
            Command::new("update")
                .about("Replace fields of an existing transaction")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount").allow_hyphen_values(true))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("kind").long("kind"))
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg()))
        .subcommand(
            Command::new("show")
                .about("Show one transaction")
                .arg(id_arg())
                .args(json_args()),
        )
        .subcommand(Command::new("list").about("List every transaction").args(json_args()))
        .subcommand(
            Command::new("search")
                .about("Find transactions by date")
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .value_parser(value_parser!(SearchMode))
                        .default_value("auto")
                        .help("auto treats Jan 1 as the whole year and other 1sts as the whole month"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("find")
                .about("Find transactions whose name contains the given text")
                .arg(Arg::new("name").long("name").required(true))
                .args(json_args()),
        )
}

pub fn build_cli() -> Command {
    Command::new("cashbook")
        .about("Local transaction ledger with weekly, monthly and yearly totals")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Database file (overrides CASHBOOK_DB)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log every storage operation to stderr"),
        )
        .subcommand(Command::new("init").about("Create the database and print its location"))
        .subcommand(tx_command())
        .subcommand(
            Command::new("report")
                .about("Period totals and ledger summary")
                .subcommand_required(true)
                .subcommand(
                    Command::new("totals")
                        .about("Signed totals per week, month or year")
                        .arg(period_arg())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("summary")
                        .about("Net total and record count")
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write transactions or totals to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(format_arg())
                        .arg(out_arg()),
                )
                .subcommand(
                    Command::new("totals")
                        .arg(period_arg())
                        .arg(format_arg())
                        .arg(out_arg()),
                ),
        )
        .subcommand(Command::new("doctor").about("Report rows that aggregation cannot use"))
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand_required(true)
                .subcommand(
                    Command::new("currency")
                        .about("Show or set the currency symbol used in reports")
                        .arg(Arg::new("symbol")),
                ),
        )
}
