// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

pub fn build_cli() -> Command {
    Command::new("ledgerclip")
        .version(clap::crate_version!())
        .about("A simple cli to manage income and expenses")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print compiled queries and debug messages"),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print trace messages"),
        )
        .arg(
            Arg::new("dry")
                .long("dry")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Dry run: build queries without executing them"),
        )
        .arg(
            Arg::new("data_dir")
                .long("data-dir")
                .env("LEDGERCLIP_HOME")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the ledger database"),
        )
        .subcommand(Command::new("init").about("Initializes the application"))
        .subcommand(
            Command::new("add")
                .about("Add a new income or expense")
                .after_help("Example: ledgerclip add -t income -d \"Paycheck\" -a 1000")
                .arg(
                    Arg::new("type")
                        .short('t')
                        .long("type")
                        .required(true)
                        .help("Type of transaction (income or expense)"),
                )
                .arg(
                    Arg::new("description")
                        .short('d')
                        .long("description")
                        .required(true)
                        .help("Description"),
                )
                .arg(
                    Arg::new("amount")
                        .short('a')
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Amount"),
                ),
        )
        .subcommand(list_command())
        .subcommand(
            Command::new("rm")
                .about("Remove transactions by id or all transactions")
                .arg(
                    Arg::new("all")
                        .short('A')
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("id")
                        .help("Remove all transactions"),
                )
                .arg(
                    Arg::new("id")
                        .short('i')
                        .long("id")
                        .action(ArgAction::Append)
                        .help("Remove transactions by id. Example: -i 1 -i 2 or --id 1,2"),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Do not ask for confirmation"),
                ),
        )
}

fn list_command() -> Command {
    Command::new("list")
        .about("List transactions")
        .arg(
            Arg::new("date_help")
                .long("date-help")
                .action(ArgAction::SetTrue)
                .help("Show help for supported date formats"),
        )
        .arg(
            Arg::new("type")
                .short('t')
                .long("type")
                .help("Filter by type (income, expense)"),
        )
        .arg(
            Arg::new("date")
                .short('d')
                .long("date")
                .help("Filter by date or date range"),
        )
        .arg(
            Arg::new("amount")
                .short('a')
                .long("amount")
                .help("Filter by amount or amount range"),
        )
        .arg(
            Arg::new("desc")
                .short('D')
                .long("desc")
                .help("Filter by description"),
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .help("Sort by date or amt"),
        )
        .arg(
            Arg::new("asc")
                .short('A')
                .long("asc")
                .action(ArgAction::SetTrue)
                .help("Sort in ascending order"),
        )
        .arg(
            Arg::new("page")
                .short('p')
                .long("page")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("1")
                .help("Page number"),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("10")
                .help("Limit per page"),
        )
        .arg(
            Arg::new("all")
                .short('x')
                .long("all")
                .action(ArgAction::SetTrue)
                .help("Print all transactions"),
        )
        .arg(
            Arg::new("columns")
                .short('c')
                .long("columns")
                .action(ArgAction::Append)
                .help("Columns to print (id, type, amt, desc, date). Example: -c id,type or -c id -c type"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(["table", "json", "csv"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Pretty print json"),
        )
        .arg(
            Arg::new("htime")
                .short('H')
                .long("htime")
                .action(ArgAction::SetTrue)
                .help("Human friendly time format"),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .action(ArgAction::SetTrue)
                .help("Browse pages interactively"),
        )
}
