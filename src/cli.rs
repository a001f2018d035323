// Copyright (c) 2025 Pocketbook Maintainers.
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
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Owning user id")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .about("Local-first personal finance tracking: wallets, categories, budgets, spending")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("wallet")
                .about("Manage wallets")
                .subcommand(
                    Command::new("add")
                        .arg(user_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .default_value("cash")
                                .help("cash, bank, ..."),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .default_value("0")
                                .help("Opening balance"),
                        )
                        .arg(Arg::new("from").long("from").help("Validity start YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("Validity end YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list").arg(user_arg())))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(user_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(
                            Arg::new("parent")
                                .long("parent")
                                .value_parser(value_parser!(i64))
                                .help("Parent category id"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").arg(user_arg())))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(user_arg())
                        .arg(
                            Arg::new("wallet")
                                .long("wallet")
                                .required(true)
                                .help("Wallet name"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category name"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    json_flags(Command::new("list"))
                        .arg(
                            Arg::new("wallet-id")
                                .long("wallet-id")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("category-id")
                                .long("category-id")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("kind").long("kind").help("income or expense"))
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("budget")
                .about("Budgets and spending")
                .subcommand(
                    Command::new("add")
                        .arg(user_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category name"),
                        )
                        .arg(
                            Arg::new("wallets")
                                .long("wallets")
                                .value_delimiter(',')
                                .help("Wallet names; empty = all wallets"),
                        )
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(Command::new("list").arg(user_arg())))
                .subcommand(
                    json_flags(
                        Command::new("status")
                            .about("Preview spend/remain in a range without persisting"),
                    )
                    .arg(user_arg())
                    .arg(Arg::new("from").long("from").required(true))
                    .arg(Arg::new("to").long("to").required(true)),
                )
                .subcommand(
                    Command::new("refresh")
                        .about("Recompute and persist remaining balances")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .help("Refresh a single budget"),
                        )
                        .arg(
                            Arg::new("user")
                                .long("user")
                                .value_parser(value_parser!(i64))
                                .help("Refresh every budget owned by a user"),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("notify")
                .about("Notifications")
                .subcommand(
                    Command::new("add")
                        .arg(user_arg())
                        .arg(Arg::new("content").long("content").required(true))
                        .arg(Arg::new("link").long("link"))
                        .arg(
                            Arg::new("at")
                                .long("at")
                                .help("Display time, default now"),
                        ),
                )
                .subcommand(
                    json_flags(Command::new("list").arg(user_arg())).arg(
                        Arg::new("unread")
                            .long("unread")
                            .action(ArgAction::SetTrue),
                    ),
                )
                .subcommand(Command::new("read").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Report dangling references and stale caches"))
}
