// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::book_of;
use crate::archive;
use crate::storage::Storage;
use crate::utils::{maybe_print_json, output_flags, pretty_table, require_confirmation, short_id};
use anyhow::Result;
use chrono::Utc;

pub fn handle(store: &dyn Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("save", sub)) => save(store, sub)?,
        Some(("reset", sub)) => reset(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn save(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let book = book_of(sub)?;
    let snap = archive::build_snapshot(store, book)?;
    let saved = archive::save(store, book, snap, Utc::now())?;
    println!(
        "Saved {} report for {} [{}]",
        book,
        saved.period_label,
        short_id(&saved.id)
    );
    Ok(())
}

fn reset(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let book = book_of(sub)?;
    require_confirmation(sub, &format!("the live {} incomes and expenses", book))?;
    let saved = archive::archive_and_reset(store, book, Utc::now())?;
    println!(
        "Archived {} as '{}' and started a new period [{}]",
        saved.period_label,
        saved.file_name,
        short_id(&saved.id)
    );
    Ok(())
}

fn list(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = archive::history(store, book_of(sub)?)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let rows: usize = r.data.sections.iter().map(|s| s.rows.len()).sum();
                vec![
                    short_id(&r.id),
                    r.period_label.clone(),
                    r.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                    r.file_name.clone(),
                    rows.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Period", "Saved at", "File", "Rows"], rows)
        );
    }
    Ok(())
}

fn remove(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let book = book_of(sub)?;
    let report = archive::find(store, book, sub.get_one::<String>("id").unwrap())?;
    require_confirmation(sub, &format!("saved report '{}'", report.period_label))?;
    archive::delete(store, book, report.id)?;
    println!("Removed saved report for {}", report.period_label);
    Ok(())
}
