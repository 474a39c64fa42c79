// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use tallybook::models::Snapshot;
use tallybook::records::Book;
use tallybook::{archive, cli, commands, config::Config, db};
use tempfile::tempdir;

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

#[test]
fn export_saved_report_as_csv() {
    let conn = setup();
    run(
        &conn,
        &["income", "add", "--date", "2026-10-01", "--description", "Salary", "--amount", "3000"],
    )
    .unwrap();
    run(&conn, &["archive", "save"]).unwrap();
    let saved = archive::latest(&conn, Book::Personal).unwrap().unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("report.csv");
    let out_str = out_path.to_string_lossy().to_string();
    run(
        &conn,
        &["export", "--format", "csv", "--out", &out_str, "--id", &saved.id.to_string()],
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "INCOMES");
    assert!(lines[1].starts_with("amount,category,classification,currency,date,description"));
    assert!(lines[2].starts_with("3000,,,USD,2026-10-01,Salary"));
    assert_eq!(lines[3], "");
    // Empty expense and budget sections are skipped.
    assert!(!contents.contains("EXPENSES"));
    assert!(contents.contains("SPENDING_PROFILE"));
}

#[test]
fn export_live_book_as_json() {
    let conn = setup();
    run(
        &conn,
        &[
            "income", "add", "--book", "business", "--description", "Consulting", "--amount", "1000",
        ],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("live.json");
    let out_str = out_path.to_string_lossy().to_string();
    run(
        &conn,
        &["export", "--book", "business", "--format", "json", "--out", &out_str],
    )
    .unwrap();

    let snap: Snapshot =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let services = snap.section("service_report").unwrap();
    assert_eq!(services.rows[0]["name"], "Consulting");
    assert!(archive::history(&conn, Book::Business).unwrap().is_empty());
}

#[test]
fn export_rejects_unknown_format() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(run(&conn, &["export", "--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}

#[test]
fn saved_reports_can_be_removed() {
    let conn = setup();
    run(&conn, &["archive", "save"]).unwrap();
    let saved = archive::latest(&conn, Book::Personal).unwrap().unwrap();
    let id = saved.id.to_string();

    assert!(run(&conn, &["archive", "rm", "--id", &id]).is_err());
    run(&conn, &["archive", "rm", "--id", &id, "--yes"]).unwrap();
    assert!(archive::history(&conn, Book::Personal).unwrap().is_empty());
}
