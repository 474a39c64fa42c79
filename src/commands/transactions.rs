// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{book_of, currency_of, opt_text};
use crate::config::Config;
use crate::engine::same_name;
use crate::models::{Classification, CostKind, Transaction};
use crate::records::{self, Book, Collection};
use crate::storage::Storage;
use crate::utils::{
    fmt_money, maybe_print_json, opt_choice, output_flags, parse_date, parse_decimal, parse_month,
    pretty_table, require_confirmation, short_id, today,
};
use anyhow::{Context, Result};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    fn noun(&self) -> &'static str {
        match self {
            Direction::Income => "income",
            Direction::Expense => "expense",
        }
    }

    fn collection<'s>(&self, store: &'s dyn Storage, book: Book) -> Collection<'s, Transaction> {
        match self {
            Direction::Income => records::incomes(store, book),
            Direction::Expense => records::expenses(store, book),
        }
    }
}

pub fn handle(
    store: &dyn Storage,
    m: &clap::ArgMatches,
    dir: Direction,
    cfg: &Config,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub, dir, cfg)?,
        Some(("list", sub)) => list(store, sub, dir)?,
        Some(("edit", sub)) => edit(store, sub, dir)?,
        Some(("rm", sub)) => remove(store, sub, dir)?,
        _ => {}
    }
    Ok(())
}

fn goal_link(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<Option<Uuid>> {
    match sub.get_one::<String>("goal") {
        Some(g) => {
            let goal = records::goals(store)
                .find(g)
                .with_context(|| format!("Goal '{}' not found", g))?;
            Ok(Some(goal.id))
        }
        None => Ok(None),
    }
}

fn announce_fixed_line(store: &dyn Storage, book: Book, tx: &Transaction) -> Result<()> {
    if let Some(line) = records::sync_fixed_expense(store, book, tx)? {
        println!(
            "Fixed cost '{}' added to the {} budget (due day {})",
            line.description,
            book,
            line.due_day.map(|d| d.to_string()).unwrap_or_default()
        );
    }
    Ok(())
}

fn add(store: &dyn Storage, sub: &clap::ArgMatches, dir: Direction, cfg: &Config) -> Result<()> {
    let book = book_of(sub)?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let classification = if dir == Direction::Expense {
        opt_choice::<Classification>(sub, "class")?
    } else {
        None
    };

    let tx = Transaction {
        id: Uuid::new_v4(),
        date,
        description: sub.get_one::<String>("description").unwrap().trim().to_string(),
        amount,
        currency: currency_of(sub, cfg),
        category: opt_text(sub, "category").unwrap_or_default(),
        payment_method: opt_text(sub, "method").unwrap_or_default(),
        kind: opt_choice::<CostKind>(sub, "kind")?.unwrap_or_default(),
        classification,
        goal_id: goal_link(store, sub)?,
        note: opt_text(sub, "note"),
    };
    records::validate_transaction(&tx)?;
    let tx = dir.collection(store, book).add(tx)?;
    if dir == Direction::Expense {
        announce_fixed_line(store, book, &tx)?;
    }
    println!(
        "Recorded {} {} on {} '{}' [{}] ({} book)",
        dir.noun(),
        fmt_money(&tx.amount, &tx.currency),
        tx.date,
        tx.description,
        short_id(&tx.id),
        book
    );
    Ok(())
}

fn edit(store: &dyn Storage, sub: &clap::ArgMatches, dir: Direction) -> Result<()> {
    let book = book_of(sub)?;
    let col = dir.collection(store, book);
    let mut tx = col.find(sub.get_one::<String>("id").unwrap())?;

    if let Some(d) = sub.get_one::<String>("date") {
        tx.date = parse_date(d)?;
    }
    if let Some(d) = opt_text(sub, "description") {
        tx.description = d;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        tx.amount = parse_decimal(a)?;
    }
    if let Some(c) = opt_text(sub, "category") {
        tx.category = c;
    }
    if let Some(c) = opt_text(sub, "currency") {
        tx.currency = c.to_uppercase();
    }
    if let Some(m) = opt_text(sub, "method") {
        tx.payment_method = m;
    }
    if let Some(k) = opt_choice::<CostKind>(sub, "kind")? {
        tx.kind = k;
    }
    if dir == Direction::Expense {
        if let Some(c) = opt_choice::<Classification>(sub, "class")? {
            tx.classification = Some(c);
        }
    }
    if let Some(g) = goal_link(store, sub)? {
        tx.goal_id = Some(g);
    }
    if let Some(n) = opt_text(sub, "note") {
        tx.note = Some(n);
    }

    records::validate_transaction(&tx)?;
    col.update(tx.clone())?;
    if dir == Direction::Expense {
        announce_fixed_line(store, book, &tx)?;
    }
    println!("Updated {} [{}]", dir.noun(), short_id(&tx.id));
    Ok(())
}

fn remove(store: &dyn Storage, sub: &clap::ArgMatches, dir: Direction) -> Result<()> {
    let book = book_of(sub)?;
    let col = dir.collection(store, book);
    let tx = col.find(sub.get_one::<String>("id").unwrap())?;
    require_confirmation(sub, &format!("{} '{}'", dir.noun(), tx.description))?;
    col.remove(tx.id)?;
    println!("Removed {} '{}' [{}]", dir.noun(), tx.description, short_id(&tx.id));
    Ok(())
}

fn list(store: &dyn Storage, sub: &clap::ArgMatches, dir: Direction) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = query_rows(store, sub, dir)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    short_id(&t.id),
                    t.date.to_string(),
                    t.description.clone(),
                    fmt_money(&t.amount, &t.currency),
                    t.category.clone(),
                    t.kind.to_string(),
                    t.classification.map(|c| c.to_string()).unwrap_or_default(),
                    t.payment_method.clone(),
                    t.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "Category", "Kind", "Class", "Method", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

/// Newest first, after the optional month and category filters.
pub fn query_rows(
    store: &dyn Storage,
    sub: &clap::ArgMatches,
    dir: Direction,
) -> Result<Vec<Transaction>> {
    let book = book_of(sub)?;
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let category = opt_text(sub, "category");

    let mut data: Vec<Transaction> = dir
        .collection(store, book)
        .list()?
        .into_iter()
        .filter(|t| {
            month
                .as_ref()
                .is_none_or(|m| t.date.format("%Y-%m").to_string() == *m)
        })
        .filter(|t| category.as_ref().is_none_or(|c| same_name(c, &t.category)))
        .collect();
    data.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
