// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, command, value_parser};

fn book_arg() -> Arg {
    arg!(--book <BOOK> "personal|business")
        .required(false)
        .default_value("personal")
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print pretty JSON").action(ArgAction::SetTrue))
        .arg(
            arg!(--jsonl "Print one JSON object per line")
                .action(ArgAction::SetTrue)
                .conflicts_with("json"),
        )
}

fn id_arg() -> Arg {
    arg!(--id <ID> "Record id or unambiguous id prefix").required(true)
}

fn rm_cmd(what: &'static str) -> Command {
    Command::new("rm")
        .about(format!("Remove {} by id", what))
        .arg(id_arg())
        .arg(arg!(--yes "Confirm removal").action(ArgAction::SetTrue))
}

/// Income and expense share one shape; `required` is false for edits.
fn transaction_args(cmd: Command, required: bool, expense: bool) -> Command {
    let mut cmd = cmd
        .arg(book_arg())
        .arg(arg!(--date <DATE> "YYYY-MM-DD, defaults to today").required(false))
        .arg(arg!(--description <DESC> "What was received or paid").required(required))
        .arg(arg!(--amount <AMOUNT> "Positive amount").required(required))
        .arg(arg!(--category <CATEGORY>).required(required && expense))
        .arg(arg!(--currency <CCY> "Defaults to the display currency").required(false))
        .arg(arg!(--method <METHOD> "Payment method").required(false))
        .arg(arg!(--kind <KIND> "fixed|variable").required(false))
        .arg(arg!(--goal <GOAL> "Savings goal id this record feeds").required(false))
        .arg(arg!(--note <NOTE>).required(false));
    if expense {
        cmd = cmd.arg(
            arg!(--class <CLASS> "essential|non-essential|superfluous").required(false),
        );
    }
    cmd
}

fn transaction_cmd(name: &'static str, about: &'static str, expense: bool) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(transaction_args(Command::new("add"), true, expense))
        .subcommand(json_args(
            Command::new("list")
                .arg(book_arg())
                .arg(arg!(--month <MONTH> "YYYY-MM").required(false))
                .arg(arg!(--category <CATEGORY>).required(false))
                .arg(
                    arg!(--limit <N>)
                        .required(false)
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(transaction_args(Command::new("edit").arg(id_arg()), false, expense))
        .subcommand(rm_cmd(name).arg(book_arg()))
}

fn budget_args(cmd: Command, required: bool) -> Command {
    cmd.arg(book_arg())
        .arg(arg!(--description <DESC>).required(required))
        .arg(arg!(--amount <AMOUNT> "Average monthly amount").required(required))
        .arg(arg!(--target <AMOUNT> "Target amount, defaults to the average").required(false))
        .arg(arg!(--currency <CCY>).required(false))
        .arg(arg!(--kind <KIND> "fixed|variable").required(false))
        .arg(arg!(--ideal <PCT> "Ideal share of total spend, 0-100").required(false))
        .arg(
            arg!(--due <DAY> "Due day of month")
                .required(false)
                .value_parser(value_parser!(u8)),
        )
        .arg(arg!(--recurrence <REC> "monthly|quarterly|yearly").required(false))
}

fn debt_args(cmd: Command, required: bool) -> Command {
    cmd.arg(arg!(--creditor <NAME>).required(required))
        .arg(arg!(--total <AMOUNT> "Total contracted amount").required(required))
        .arg(arg!(--installment <AMOUNT> "Installment amount").required(required))
        .arg(arg!(--currency <CCY>).required(false))
        .arg(arg!(--start <DATE> "YYYY-MM-DD, defaults to today").required(false))
        .arg(arg!(--status <STATUS> "regular|late|negotiating|settled").required(false))
        .arg(arg!(--reason <REASON> "financing|loan|credit-card|personal|other").required(false))
        .arg(
            arg!(--paid <N> "Installments paid")
                .required(false)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--installments <N> "Total installments")
                .required(required)
                .value_parser(value_parser!(u32)),
        )
}

fn report_cmd(name: &'static str, about: &'static str, default_book: &'static str) -> Command {
    json_args(
        Command::new(name).about(about).arg(
            arg!(--book <BOOK> "personal|business")
                .required(false)
                .default_value(default_book),
        ),
    )
}

pub fn build_cli() -> Command {
    command!()
        .name("tallybook")
        .about("Personal and business finance tracking")
        .subcommand(Command::new("init").about("Create the data store"))
        .subcommand(
            Command::new("login")
                .about("Start a session; records are stored per user")
                .arg(arg!(--email <EMAIL>).required(true)),
        )
        .subcommand(Command::new("logout").about("End the active session"))
        .subcommand(Command::new("whoami").about("Show the active user"))
        .subcommand(transaction_cmd("income", "Manage incomes", false))
        .subcommand(transaction_cmd("expense", "Manage expenses", true))
        .subcommand(
            Command::new("budget")
                .about("Manage monthly budget lines")
                .subcommand_required(true)
                .subcommand(budget_args(Command::new("add"), true))
                .subcommand(json_args(Command::new("list").arg(book_arg())))
                .subcommand(rm_cmd("budget line").arg(book_arg())),
        )
        .subcommand(
            Command::new("debt")
                .about("Manage debts")
                .subcommand_required(true)
                .subcommand(debt_args(Command::new("add"), true))
                .subcommand(json_args(Command::new("list")))
                .subcommand(debt_args(Command::new("edit").arg(id_arg()), false))
                .subcommand(rm_cmd("debt"))
                .subcommand(json_args(Command::new("summary"))),
        )
        .subcommand(
            Command::new("remit")
                .about("Manage remittances sent abroad")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, defaults to today").required(false))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--destination <DEST>).required(true))
                        .arg(arg!(--currency <CCY>).required(false))
                        .arg(arg!(--note <NOTE>).required(false)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(rm_cmd("remittance"))
                .subcommand(json_args(
                    Command::new("years").arg(
                        arg!(--year <YEAR> "Current year, defaults to today's")
                            .required(false)
                            .value_parser(value_parser!(i32)),
                    ),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--target <AMOUNT>).required(false))
                        .arg(arg!(--currency <CCY>).required(false)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(rm_cmd("goal"))
                .subcommand(json_args(
                    Command::new("balance")
                        .arg(arg!(--id <ID> "Limit to one goal").required(false)),
                ))
                .subcommand(
                    Command::new("step")
                        .about("Manual contributions and withdrawals")
                        .subcommand_required(true)
                        .subcommand(
                            Command::new("add")
                                .arg(arg!(--goal <GOAL> "Goal id").required(true))
                                .arg(arg!(--amount <AMOUNT>).required(true))
                                .arg(arg!(--date <DATE>).required(false))
                                .arg(arg!(--currency <CCY>).required(false))
                                .arg(arg!(--method <METHOD>).required(false))
                                .arg(arg!(--monthly <AMOUNT> "Planned monthly investment").required(false))
                                .arg(arg!(--kind <KIND> "contribution|withdrawal").required(false))
                                .arg(arg!(--note <NOTE>).required(false)),
                        )
                        .subcommand(json_args(
                            Command::new("list")
                                .arg(arg!(--goal <GOAL> "Goal id").required(false)),
                        ))
                        .subcommand(rm_cmd("goal step")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Analysis over the live records")
                .subcommand_required(true)
                .subcommand(report_cmd("balance", "Income, expense and balance", "personal"))
                .subcommand(report_cmd("services", "Profitability per service", "business"))
                .subcommand(report_cmd(
                    "categories",
                    "Spend per category against ideal shares",
                    "personal",
                ))
                .subcommand(report_cmd("profile", "Spend per classification", "personal")),
        )
        .subcommand(
            Command::new("archive")
                .about("Saved period reports")
                .subcommand_required(true)
                .subcommand(Command::new("save").about("Snapshot the live book").arg(book_arg()))
                .subcommand(
                    Command::new("reset")
                        .about("Snapshot the live book, then clear incomes and expenses")
                        .arg(book_arg())
                        .arg(arg!(--yes "Confirm the reset").action(ArgAction::SetTrue)),
                )
                .subcommand(json_args(Command::new("list").arg(book_arg())))
                .subcommand(rm_cmd("saved report").arg(book_arg())),
        )
        .subcommand(
            Command::new("export")
                .about("Write a saved report, or the live book, to a file")
                .arg(book_arg())
                .arg(arg!(--format <FORMAT> "csv|json").required(true))
                .arg(arg!(--out <PATH>).required(true))
                .arg(arg!(--id <ID> "Saved report id; the live book when absent").required(false)),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect settings")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(Command::new("path")),
        )
}
