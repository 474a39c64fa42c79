// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use tallybook::commands::goals::balances;
use tallybook::engine::debt_summary;
use tallybook::models::DebtStatus;
use tallybook::records;
use tallybook::{cli, commands, config::Config, db};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["tallybook"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    commands::run(conn, &matches, &Config::default())
}

fn goal_id(conn: &Connection) -> String {
    records::goals(conn).list().unwrap()[0].id.to_string()
}

#[test]
fn goal_balance_sums_tagged_and_steps() {
    let conn = setup();
    let cfg = Config::default();
    run(&conn, &["goal", "add", "--name", "Trip", "--target", "1000"]).unwrap();
    let id = goal_id(&conn);

    // Unlinked, matched by goal category and name.
    run(
        &conn,
        &["expense", "add", "--description", "trip", "--amount", "100", "--category", "Savings"],
    )
    .unwrap();
    // Linked explicitly; name and category do not matter.
    run(
        &conn,
        &["expense", "add", "--description", "Transfer", "--amount", "50", "--category", "Bank", "--goal", &id],
    )
    .unwrap();
    run(
        &conn,
        &["goal", "step", "add", "--goal", &id, "--amount", "30", "--kind", "withdrawal"],
    )
    .unwrap();
    // Unrelated expense.
    run(
        &conn,
        &["expense", "add", "--description", "Trip", "--amount", "70", "--category", "Leisure"],
    )
    .unwrap();

    let all = balances(&conn, None, &cfg).unwrap();
    assert_eq!(all.len(), 1);
    let b = &all[0];
    assert_eq!(b.contributions, Decimal::from(150));
    assert_eq!(b.withdrawals, Decimal::from(30));
    assert_eq!(b.balance, Decimal::from(120));
    assert_eq!(b.tagged_transactions, 2);
    assert_eq!(b.progress_percent, Some(Decimal::from(12)));
}

#[test]
fn duplicate_goal_and_bad_step_rejected() {
    let conn = setup();
    run(&conn, &["goal", "add", "--name", "House"]).unwrap();
    assert!(run(&conn, &["goal", "add", "--name", " house "]).is_err());
    let id = goal_id(&conn);
    assert!(run(&conn, &["goal", "step", "add", "--goal", &id, "--amount", "0"]).is_err());
    assert!(run(&conn, &["goal", "step", "add", "--goal", "ffffffff", "--amount", "5"]).is_err());
    assert!(records::goal_steps(&conn).list().unwrap().is_empty());
}

#[test]
fn removing_goal_drops_its_steps() {
    let conn = setup();
    run(&conn, &["goal", "add", "--name", "Car"]).unwrap();
    run(&conn, &["goal", "add", "--name", "Bike"]).unwrap();
    let goals = records::goals(&conn).list().unwrap();
    let car = goals[0].id.to_string();
    let bike = goals[1].id.to_string();
    run(&conn, &["goal", "step", "add", "--goal", &car, "--amount", "10"]).unwrap();
    run(&conn, &["goal", "step", "add", "--goal", &bike, "--amount", "20"]).unwrap();

    run(&conn, &["goal", "rm", "--id", &car, "--yes"]).unwrap();
    let steps = records::goal_steps(&conn).list().unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].amount, Decimal::from(20));
    assert_eq!(records::goals(&conn).list().unwrap().len(), 1);
}

#[test]
fn debts_stay_out_of_the_balance() {
    let conn = setup();
    run(
        &conn,
        &[
            "debt", "add", "--creditor", "Bank", "--total", "1200", "--installment", "100",
            "--installments", "12", "--paid", "3", "--reason", "credit-card",
        ],
    )
    .unwrap();
    let id = records::debts(&conn).list().unwrap()[0].id.to_string();
    run(&conn, &["debt", "edit", "--id", &id, "--status", "late", "--paid", "6"]).unwrap();
    assert!(run(&conn, &["debt", "edit", "--id", &id, "--paid", "13"]).is_err());

    let s = debt_summary(&records::debts(&conn).list().unwrap());
    assert_eq!(s.paid, Decimal::from(600));
    assert_eq!(s.outstanding, Decimal::from(600));
    assert_eq!(s.progress_percent, Decimal::from(50));
    assert_eq!(s.by_status.get(&DebtStatus::Late), Some(&1));
    assert!(
        records::expenses(&conn, tallybook::records::Book::Personal)
            .list()
            .unwrap()
            .is_empty()
    );
}

#[test]
fn remittance_years_split_current_and_history() {
    let conn = setup();
    for (date, amount) in [("2026-02-01", "100"), ("2025-06-01", "50"), ("2025-12-01", "25")] {
        run(
            &conn,
            &["remit", "add", "--date", date, "--amount", amount, "--destination", "Family"],
        )
        .unwrap();
    }
    let years = tallybook::engine::remittance_years(&records::remittances(&conn).list().unwrap(), 2026);
    assert_eq!(years.current.total, Decimal::from(100));
    assert_eq!(years.historical.len(), 1);
    assert_eq!(years.historical[0].year, 2025);
    assert_eq!(years.historical[0].total, Decimal::from(75));
    assert!(run(&conn, &["remit", "years", "--year", "2026", "--json"]).is_ok());
}
