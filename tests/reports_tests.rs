// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use tallybook::commands::reports;
use tallybook::engine::{Adherence, IdealSource, MarginTier};
use tallybook::records::Book;
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

fn add(conn: &Connection, what: &str, book: &str, desc: &str, amount: &str, kind: &str) {
    run(
        conn,
        &[
            what, "add", "--book", book, "--date", "2026-10-10", "--description", desc,
            "--amount", amount, "--category", "Services", "--kind", kind,
        ],
    )
    .unwrap();
}

#[test]
fn consulting_service_end_to_end() {
    let conn = setup();
    add(&conn, "income", "business", "Consulting", "1000", "variable");
    add(&conn, "income", "business", "Design", "400", "variable");
    add(&conn, "expense", "business", "consulting ", "200", "variable");
    add(&conn, "expense", "business", "Rent", "600", "fixed");
    add(&conn, "expense", "business", "Stationery", "50", "variable");

    let out = reports::build_services(&conn, Book::Business).unwrap();
    let r = &out.report;
    assert_eq!(r.total_fixed, Decimal::from(600));
    assert_eq!(r.fixed_share, Decimal::from(300));
    assert_eq!(r.lines.len(), 2);

    let consulting = &r.lines[0];
    assert_eq!(consulting.name, "Consulting");
    assert_eq!(consulting.revenue, Decimal::from(1000));
    assert_eq!(consulting.direct_cost, Decimal::from(200));
    assert_eq!(consulting.fixed_share, Decimal::from(300));
    assert_eq!(consulting.total_cost, Decimal::from(500));
    assert_eq!(consulting.profit, Decimal::from(500));
    assert_eq!(consulting.margin, Decimal::from(50));
    assert_eq!(consulting.tier, MarginTier::Healthy);

    let fixed_total: Decimal = r.lines.iter().map(|l| l.fixed_share).sum();
    assert_eq!(fixed_total, r.total_fixed);
    // Stationery matches no service and stays out of the per-service costs.
    let direct_total: Decimal = r.lines.iter().map(|l| l.direct_cost).sum();
    assert_eq!(direct_total, Decimal::from(200));
}

#[test]
fn balance_report_per_book() {
    let conn = setup();
    add(&conn, "income", "personal", "Salary", "2000", "variable");
    add(&conn, "expense", "personal", "Rent", "500", "fixed");
    add(&conn, "income", "business", "Consulting", "999", "variable");

    let personal = reports::build_balance(&conn, Book::Personal).unwrap();
    assert_eq!(personal.totals.total_income, Decimal::from(2000));
    assert_eq!(personal.totals.total_expense, Decimal::from(500));
    assert_eq!(personal.totals.balance, Decimal::from(1500));
    assert_eq!(personal.margin, Decimal::from(75));

    let empty = setup();
    let zero = reports::build_balance(&empty, Book::Business).unwrap();
    assert_eq!(zero.totals.balance, Decimal::ZERO);
    assert_eq!(zero.margin, Decimal::ZERO);
}

#[test]
fn oversized_amounts_never_reach_reports() {
    let conn = setup();
    let huge = "79228162514264337593543950335";
    for _ in 0..2 {
        assert!(
            run(&conn, &["income", "add", "--description", "Windfall", "--amount", huge]).is_err()
        );
    }
    add(&conn, "income", "personal", "Salary", "1000000000000000", "variable");
    add(&conn, "income", "personal", "Bonus", "1000000000000000", "variable");

    let report = reports::build_balance(&conn, Book::Personal).unwrap();
    assert_eq!(report.totals.total_income, Decimal::from(2_000_000_000_000_000i64));
    assert_eq!(report.margin, Decimal::from(100));
}

#[test]
fn category_trend_follows_latest_saved_report() {
    let conn = setup();
    let cfg = Config::default();
    run(
        &conn,
        &["expense", "add", "--date", "2026-09-10", "--description", "Market", "--amount", "100", "--category", "Food"],
    )
    .unwrap();
    let first = reports::build_categories(&conn, Book::Personal, &cfg).unwrap();
    assert_eq!(first[0].trend_percent, Decimal::ZERO);

    run(&conn, &["archive", "reset", "--yes"]).unwrap();
    run(
        &conn,
        &["expense", "add", "--date", "2026-10-10", "--description", "Market", "--amount", "150", "--category", "food"],
    )
    .unwrap();
    run(
        &conn,
        &["expense", "add", "--date", "2026-10-11", "--description", "Bus", "--amount", "50", "--category", "Transport"],
    )
    .unwrap();

    let shares = reports::build_categories(&conn, Book::Personal, &cfg).unwrap();
    assert_eq!(shares.len(), 2);
    let food = &shares[0];
    assert_eq!(food.total, Decimal::from(150));
    assert_eq!(food.percent, Decimal::from(75));
    assert_eq!(food.trend_percent, Decimal::from(50));
    assert_eq!(food.ideal_source, IdealSource::Lexicon);
    // 150 against an ideal of 20% of 200.
    assert_eq!(food.status, Adherence::AtRisk);

    let transport = &shares[1];
    assert_eq!(transport.trend_percent, Decimal::ZERO);
    let total_pct: Decimal = shares.iter().map(|s| s.percent).sum();
    assert_eq!(total_pct, Decimal::ONE_HUNDRED);
}

#[test]
fn budget_line_ideal_overrides_lexicon() {
    let conn = setup();
    let cfg = Config::default();
    run(
        &conn,
        &["budget", "add", "--description", "Food", "--amount", "300", "--ideal", "60"],
    )
    .unwrap();
    run(
        &conn,
        &["expense", "add", "--description", "Market", "--amount", "100", "--category", "Food"],
    )
    .unwrap();
    let shares = reports::build_categories(&conn, Book::Personal, &cfg).unwrap();
    assert_eq!(shares[0].ideal_percent, Decimal::from(60));
    assert_eq!(shares[0].ideal_source, IdealSource::User);
    assert_eq!(shares[0].status, Adherence::AtRisk);
}
