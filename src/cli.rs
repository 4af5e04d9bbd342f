// Copyright (c) 2025 FinWise.
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

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .help("Reporting period: 'yearly' or YYYY-MM (default: current month)")
}

pub fn build_cli() -> Command {
    Command::new("finwise")
        .about("Personal finance tracker: transactions, budgets, goals, and period reports")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users and the login session")
                .subcommand(
                    Command::new("register")
                        .about("Create a user")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("password").long("password").required(true))
                        .arg(Arg::new("dob").long("dob").help("Date of birth, YYYY-MM-DD"))
                        .arg(
                            Arg::new("admin")
                                .long("admin")
                                .action(ArgAction::SetTrue)
                                .help("Create with the admin account type"),
                        ),
                )
                .subcommand(
                    Command::new("login")
                        .about("Log in and remember the session")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout").about("Forget the session"))
                .subcommand(Command::new("whoami").about("Show the logged-in user")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(period_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction (goal credits are not recomputed)")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction (goal credits are not rolled back)")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Create a budget, or update one by id")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .help("Update this budget instead of creating one"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets")))
                .subcommand(
                    Command::new("rm").about("Delete a budget").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Create a goal")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(
                            Arg::new("current")
                                .long("current")
                                .help("Starting amount (default 0)"),
                        )
                        .arg(Arg::new("date").long("date").required(true).help("Target date, YYYY-MM-DD")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List goals with keyword and progress"),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a goal")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("current").long("current"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("rm").about("Delete a goal").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Manage recurring items (informational, never auto-posted)")
                .subcommand(
                    Command::new("add")
                        .about("Create a recurring item")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .required(true)
                                .value_parser(["Monthly", "Weekly", "Yearly"]),
                        )
                        .arg(
                            Arg::new("day-of-month")
                                .long("day-of-month")
                                .value_parser(value_parser!(u32).range(1..=31)),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List recurring items")))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a recurring item")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .value_parser(["Monthly", "Weekly", "Yearly"]),
                        )
                        .arg(
                            Arg::new("day-of-month")
                                .long("day-of-month")
                                .value_parser(value_parser!(u32).range(1..=31)),
                        ),
                )
                .subcommand(
                    Command::new("rm").about("Delete a recurring item").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Period-based dashboard reports")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Totals: spent, income, budget, remaining")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("breakdown")
                        .about("Expense totals per category")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("budget-status")
                        .about("Budget vs. actuals per category")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(Command::new("goals").about("Goal progress")))
                .subcommand(json_flags(
                    Command::new("periods").about("Months with recorded transactions, newest first"),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Import records from files")
                .subcommand(
                    Command::new("transactions")
                        .about("Import transactions from CSV (Date,Description,Amount,Category)")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export records to files")
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Report data inconsistencies"))
}
