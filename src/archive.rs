// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period archival. A saved report is a deep JSON snapshot of a book, stored
//! newest first and never modified afterwards; it can only be deleted.

use crate::engine::{classification_profile, profitability};
use crate::error::Result;
use crate::models::{SavedReport, Snapshot, Transaction};
use crate::records::{self, Book};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

pub const INCOMES: &str = "incomes";
pub const EXPENSES: &str = "expenses";
pub const BUDGET_LINES: &str = "budget_lines";
pub const SERVICE_REPORT: &str = "service_report";
pub const CATEGORY_TOTALS: &str = "category_totals";
pub const SPENDING_PROFILE: &str = "spending_profile";

#[derive(Debug, Serialize)]
struct CategoryTotal {
    name: String,
    value: Decimal,
}

fn category_totals(expenses: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for e in expenses {
        match totals
            .iter_mut()
            .find(|t| crate::engine::same_name(&t.name, &e.category))
        {
            Some(t) => t.value += e.amount,
            None => totals.push(CategoryTotal {
                name: e.category.trim().to_string(),
                value: e.amount,
            }),
        }
    }
    totals.retain(|t| t.value > Decimal::ZERO);
    totals
}

/// Captures the live collections of `book` plus its derived analysis.
pub fn build_snapshot(store: &dyn Storage, book: Book) -> Result<Snapshot> {
    let incomes = records::incomes(store, book).list()?;
    let expenses = records::expenses(store, book).list()?;
    let lines = records::budget_lines(store, book).list()?;

    let mut snap = Snapshot::default();
    snap.push(INCOMES, &incomes)?;
    snap.push(EXPENSES, &expenses)?;
    snap.push(BUDGET_LINES, &lines)?;
    match book {
        Book::Business => {
            let report = profitability(&incomes, &expenses);
            snap.push(SERVICE_REPORT, &report.lines)?;
        }
        Book::Personal => {
            snap.push(CATEGORY_TOTALS, &category_totals(&expenses))?;
            snap.push(SPENDING_PROFILE, &classification_profile(&expenses))?;
        }
    }
    Ok(snap)
}

pub fn period_label(now: DateTime<Utc>) -> String {
    now.format("%B/%Y").to_string()
}

pub fn file_name(book: Book, now: DateTime<Utc>) -> String {
    format!(
        "{}-report-{}-{}",
        book,
        now.format("%B").to_string().to_lowercase(),
        now.format("%Y")
    )
}

/// Stores `data` as the newest entry of the book's history.
pub fn save(
    store: &dyn Storage,
    book: Book,
    data: Snapshot,
    now: DateTime<Utc>,
) -> Result<SavedReport> {
    if data.is_empty() {
        warn!(%book, "archiving a period with no records");
    }
    let report = SavedReport {
        id: Uuid::new_v4(),
        timestamp: now,
        period_label: period_label(now),
        file_name: file_name(book, now),
        data,
    };
    let saved = records::history(store, book).add_front(report)?;
    info!(%book, period = %saved.period_label, "report archived");
    Ok(saved)
}

/// Archives the current period, then empties its incomes and expenses.
/// Budget lines carry over to the next period.
pub fn archive_and_reset(store: &dyn Storage, book: Book, now: DateTime<Utc>) -> Result<SavedReport> {
    let snap = build_snapshot(store, book)?;
    let saved = save(store, book, snap, now)?;
    records::incomes(store, book).replace_all(&[])?;
    records::expenses(store, book).replace_all(&[])?;
    info!(%book, "live collections reset");
    Ok(saved)
}

/// Newest first.
pub fn history(store: &dyn Storage, book: Book) -> Result<Vec<SavedReport>> {
    records::history(store, book).list()
}

/// Looks a report up by full id or unambiguous id prefix.
pub fn find(store: &dyn Storage, book: Book, id: &str) -> Result<SavedReport> {
    records::history(store, book).find(id)
}

pub fn delete(store: &dyn Storage, book: Book, id: Uuid) -> Result<SavedReport> {
    let removed = records::history(store, book).remove(id)?;
    info!(%book, period = %removed.period_label, "archived report deleted");
    Ok(removed)
}

pub fn latest(store: &dyn Storage, book: Book) -> Result<Option<SavedReport>> {
    Ok(history(store, book)?.into_iter().next())
}

/// Expenses of the most recently archived period, if any.
pub fn previous_expenses(store: &dyn Storage, book: Book) -> Result<Option<Vec<Transaction>>> {
    Ok(latest(store, book)?.map(|r| r.data.rows_as::<Transaction>(EXPENSES)))
}
