// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{book_of, currency_of, opt_text};
use crate::config::Config;
use crate::models::{BudgetLine, CostKind, Recurrence};
use crate::records;
use crate::storage::Storage;
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, opt_choice, output_flags, parse_decimal,
    pretty_table, require_confirmation, short_id,
};
use anyhow::Result;
use uuid::Uuid;

pub fn handle(store: &dyn Storage, m: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub, cfg)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let book = book_of(sub)?;
    let average = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let target = match sub.get_one::<String>("target") {
        Some(t) => parse_decimal(t)?,
        None => average,
    };
    let ideal_percent = sub
        .get_one::<String>("ideal")
        .map(|p| parse_decimal(p))
        .transpose()?;

    let line = BudgetLine {
        id: Uuid::new_v4(),
        description: opt_text(sub, "description").unwrap_or_default(),
        average_amount: average,
        currency: currency_of(sub, cfg),
        kind: opt_choice::<CostKind>(sub, "kind")?.unwrap_or_default(),
        target_amount: target,
        ideal_percent,
        due_day: sub.get_one::<u8>("due").copied(),
        recurrence: opt_choice::<Recurrence>(sub, "recurrence")?.unwrap_or_default(),
    };
    records::validate_budget_line(&line)?;
    let line = records::budget_lines(store, book).add(line)?;
    println!(
        "Budget line '{}' set to {} ({} book) [{}]",
        line.description,
        fmt_money(&line.target_amount, &line.currency),
        book,
        short_id(&line.id)
    );
    Ok(())
}

fn list(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = records::budget_lines(store, book_of(sub)?).list()?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|l| {
                vec![
                    short_id(&l.id),
                    l.description.clone(),
                    fmt_money(&l.average_amount, &l.currency),
                    fmt_money(&l.target_amount, &l.currency),
                    l.kind.to_string(),
                    l.ideal_percent.map(|p| fmt_percent(&p)).unwrap_or_default(),
                    l.due_day.map(|d| d.to_string()).unwrap_or_default(),
                    l.recurrence.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Description", "Average", "Target", "Kind", "Ideal", "Due", "Recurrence"],
                rows,
            )
        );
    }
    Ok(())
}

fn remove(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let col = records::budget_lines(store, book_of(sub)?);
    let line = col.find(sub.get_one::<String>("id").unwrap())?;
    require_confirmation(sub, &format!("budget line '{}'", line.description))?;
    col.remove(line.id)?;
    println!("Removed budget line '{}'", line.description);
    Ok(())
}
