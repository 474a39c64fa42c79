// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{currency_of, opt_text};
use crate::config::Config;
use crate::engine::{GoalBalance, goal_balance};
use crate::models::{Goal, GoalStep, StepKind};
use crate::records::{self, Book};
use crate::storage::Storage;
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, opt_choice, output_flags, parse_date, parse_decimal,
    pretty_table, require_confirmation, short_id, today,
};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

pub fn handle(store: &dyn Storage, m: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub, cfg)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("balance", sub)) => balance(store, sub, cfg)?,
        Some(("step", sub)) => match sub.subcommand() {
            Some(("add", s)) => add_step(store, s, cfg)?,
            Some(("list", s)) => list_steps(store, s)?,
            Some(("rm", s)) => remove_step(store, s)?,
            _ => {}
        },
        _ => {}
    }
    Ok(())
}

fn add(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let col = records::goals(store);
    let goal = Goal {
        id: Uuid::new_v4(),
        name: opt_text(sub, "name").unwrap_or_default(),
        target_amount: sub
            .get_one::<String>("target")
            .map(|t| parse_decimal(t))
            .transpose()?,
        currency: currency_of(sub, cfg),
    };
    records::validate_new_goal(&col.list()?, &goal)?;
    let goal = col.add(goal)?;
    println!("Goal '{}' created [{}]", goal.name, short_id(&goal.id));
    Ok(())
}

fn list(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = records::goals(store).list()?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|g| {
                vec![
                    short_id(&g.id),
                    g.name.clone(),
                    g.target_amount
                        .map(|t| fmt_money(&t, &g.currency))
                        .unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Goal", "Target"], rows));
    }
    Ok(())
}

/// Removes the goal together with its steps.
fn remove(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let col = records::goals(store);
    let goal = col.find(sub.get_one::<String>("id").unwrap())?;
    require_confirmation(sub, &format!("goal '{}' and its steps", goal.name))?;

    let steps = records::goal_steps(store);
    let (dropped, kept): (Vec<GoalStep>, Vec<GoalStep>) =
        steps.list()?.into_iter().partition(|s| s.goal_id == goal.id);
    steps.replace_all(&kept)?;
    col.remove(goal.id)?;
    info!(goal = %goal.name, steps = dropped.len(), "goal removed");
    println!("Removed goal '{}' and {} step(s)", goal.name, dropped.len());
    Ok(())
}

/// Balances for every goal, or for `--id` alone. Transactions come from the
/// personal expense book.
pub fn balances(
    store: &dyn Storage,
    id: Option<&str>,
    cfg: &Config,
) -> Result<Vec<GoalBalance>> {
    let col = records::goals(store);
    let goals = match id {
        Some(id) => vec![col.find(id)?],
        None => col.list()?,
    };
    let expenses = records::expenses(store, Book::Personal).list()?;
    let steps = records::goal_steps(store).list()?;
    Ok(goals
        .iter()
        .map(|g| goal_balance(g, &expenses, &steps, &cfg.goal_categories))
        .collect())
}

fn balance(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = balances(store, sub.get_one::<String>("id").map(|s| s.as_str()), cfg)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = &cfg.display_currency;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    b.goal.clone(),
                    fmt_money(&b.contributions, ccy),
                    fmt_money(&b.withdrawals, ccy),
                    fmt_money(&b.balance, ccy),
                    b.tagged_transactions.to_string(),
                    b.progress_percent
                        .map(|p| fmt_percent(&p))
                        .unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Goal", "Contributions", "Withdrawals", "Balance", "Tagged", "Progress"],
                rows,
            )
        );
    }
    Ok(())
}

fn add_step(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let goal_ref = sub.get_one::<String>("goal").unwrap();
    let goal = records::goals(store)
        .find(goal_ref)
        .with_context(|| format!("Goal '{}' not found", goal_ref))?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let monthly_investment = match sub.get_one::<String>("monthly") {
        Some(m) => parse_decimal(m)?,
        None => Decimal::ZERO,
    };

    let step = GoalStep {
        id: Uuid::new_v4(),
        goal_id: goal.id,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        currency: currency_of(sub, cfg),
        date,
        method: opt_text(sub, "method").unwrap_or_default(),
        monthly_investment,
        note: opt_text(sub, "note"),
        kind: opt_choice::<StepKind>(sub, "kind")?.unwrap_or_default(),
    };
    records::validate_goal_step(&step)?;
    let step = records::goal_steps(store).add(step)?;
    println!(
        "{} of {} recorded for '{}' [{}]",
        step.kind,
        fmt_money(&step.amount, &step.currency),
        goal.name,
        short_id(&step.id)
    );
    Ok(())
}

fn list_steps(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let goals = records::goals(store).list()?;
    let filter = match sub.get_one::<String>("goal") {
        Some(g) => Some(records::goals(store).find(g)?.id),
        None => None,
    };
    let mut data: Vec<GoalStep> = records::goal_steps(store)
        .list()?
        .into_iter()
        .filter(|s| filter.is_none_or(|id| s.goal_id == id))
        .collect();
    data.sort_by(|a, b| b.date.cmp(&a.date));

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                let goal = goals
                    .iter()
                    .find(|g| g.id == s.goal_id)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| "(removed)".into());
                vec![
                    short_id(&s.id),
                    s.date.to_string(),
                    goal,
                    s.kind.to_string(),
                    fmt_money(&s.amount, &s.currency),
                    s.method.clone(),
                    fmt_money(&s.monthly_investment, &s.currency),
                    s.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Goal", "Kind", "Amount", "Method", "Monthly", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

fn remove_step(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let col = records::goal_steps(store);
    let step = col.find(sub.get_one::<String>("id").unwrap())?;
    require_confirmation(sub, &format!("goal step of {}", step.amount))?;
    col.remove(step.id)?;
    println!("Removed goal step [{}]", short_id(&step.id));
    Ok(())
}
