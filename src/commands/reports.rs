// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::book_of;
use crate::archive;
use crate::config::Config;
use crate::engine::profitability::Advice;
use crate::engine::{
    Balance, CategoryShare, ProfitabilityReport, balance, category_distribution,
    classification_profile, profitability,
};
use crate::records::{self, Book};
use crate::storage::Storage;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, output_flags, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

pub fn handle(store: &dyn Storage, m: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => balance_report(store, sub, cfg)?,
        Some(("services", sub)) => services(store, sub, cfg)?,
        Some(("categories", sub)) => categories(store, sub, cfg)?,
        Some(("profile", sub)) => profile(store, sub, cfg)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BalanceReport {
    pub book: Book,
    #[serde(flatten)]
    pub totals: Balance,
    pub margin: Decimal,
}

pub fn build_balance(store: &dyn Storage, book: Book) -> Result<BalanceReport> {
    let incomes = records::incomes(store, book).list()?;
    let expenses = records::expenses(store, book).list()?;
    let totals = balance(&incomes, &expenses);
    debug!(%book, incomes = incomes.len(), expenses = expenses.len(), "balance built");
    Ok(BalanceReport {
        book,
        margin: totals.margin(),
        totals,
    })
}

fn balance_report(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let report = build_balance(store, book_of(sub)?)?;
    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let ccy = &cfg.display_currency;
        let rows = vec![
            vec!["Income".to_string(), fmt_money(&report.totals.total_income, ccy)],
            vec!["Expense".to_string(), fmt_money(&report.totals.total_expense, ccy)],
            vec!["Balance".to_string(), fmt_money(&report.totals.balance, ccy)],
            vec!["Margin".to_string(), fmt_percent(&report.margin)],
        ];
        println!(
            "{}",
            pretty_table(&[&format!("{} book", report.book), "Value"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ServicesReport {
    #[serde(flatten)]
    pub report: ProfitabilityReport,
    pub advice: Advice,
}

pub fn build_services(store: &dyn Storage, book: Book) -> Result<ServicesReport> {
    let incomes = records::incomes(store, book).list()?;
    let expenses = records::expenses(store, book).list()?;
    let report = profitability(&incomes, &expenses);
    debug!(%book, services = report.lines.len(), "profitability built");
    Ok(ServicesReport {
        advice: report.overall_tier.advice(),
        report,
    })
}

fn services(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let out = build_services(store, book_of(sub)?)?;
    if maybe_print_json(json_flag, jsonl_flag, &out)? {
        return Ok(());
    }
    let ccy = &cfg.display_currency;
    let r = &out.report;
    let rows: Vec<Vec<String>> = r
        .lines
        .iter()
        .map(|l| {
            vec![
                l.name.clone(),
                fmt_money(&l.revenue, ccy),
                fmt_money(&l.direct_cost, ccy),
                fmt_money(&l.fixed_share, ccy),
                fmt_money(&l.total_cost, ccy),
                fmt_money(&l.profit, ccy),
                fmt_percent(&l.margin),
                l.tier.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Service", "Revenue", "Direct", "Fixed share", "Total cost", "Profit", "Margin", "Tier"],
            rows,
        )
    );
    println!(
        "Fixed costs {} split over {} service(s); overall margin {} ({})",
        fmt_money(&r.total_fixed, ccy),
        r.lines.len(),
        fmt_percent(&r.overall_margin),
        r.overall_tier
    );
    println!("{}", out.advice.message);
    println!("{}", out.advice.detail);
    println!("Recommendation: {}", out.advice.recommendation);
    Ok(())
}

/// Category shares with the trend measured against the latest saved report.
pub fn build_categories(
    store: &dyn Storage,
    book: Book,
    cfg: &Config,
) -> Result<Vec<CategoryShare>> {
    let expenses = records::expenses(store, book).list()?;
    let lines = records::budget_lines(store, book).list()?;
    let previous = archive::previous_expenses(store, book)?;
    let shares = category_distribution(&expenses, &lines, previous.as_deref(), &cfg.ideals);
    debug!(%book, categories = shares.len(), has_previous = previous.is_some(), "distribution built");
    Ok(shares)
}

fn categories(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = build_categories(store, book_of(sub)?, cfg)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = &cfg.display_currency;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.count.to_string(),
                    fmt_money(&c.total, ccy),
                    fmt_percent(&c.percent),
                    format!("{} ({:?})", fmt_percent(&c.ideal_percent), c.ideal_source),
                    c.status.to_string(),
                    fmt_percent(&c.trend_percent),
                    fmt_money(&c.saving_insight, ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Count", "Total", "Share", "Ideal", "Status", "Trend", "Save 10%"],
                rows,
            )
        );
    }
    Ok(())
}

fn profile(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let expenses = records::expenses(store, book_of(sub)?).list()?;
    let data = classification_profile(&expenses);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = &cfg.display_currency;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.classification.to_string(),
                    fmt_money(&s.total, ccy),
                    fmt_percent(&s.percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Classification", "Total", "Share"], rows));
    }
    Ok(())
}
