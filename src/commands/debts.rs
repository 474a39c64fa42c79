// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{currency_of, opt_text};
use crate::config::Config;
use crate::engine::{debt_summary, debts::paid_amount};
use crate::models::{Debt, DebtReason, DebtStatus};
use crate::records;
use crate::storage::Storage;
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, opt_choice, output_flags, parse_date, parse_decimal,
    pretty_table, require_confirmation, short_id, today,
};
use anyhow::Result;
use uuid::Uuid;

pub fn handle(store: &dyn Storage, m: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub, cfg)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("summary", sub)) => summary(store, sub, cfg)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let start_date = match sub.get_one::<String>("start") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let debt = Debt {
        id: Uuid::new_v4(),
        creditor: opt_text(sub, "creditor").unwrap_or_default(),
        total_amount: parse_decimal(sub.get_one::<String>("total").unwrap())?,
        installment_amount: parse_decimal(sub.get_one::<String>("installment").unwrap())?,
        currency: currency_of(sub, cfg),
        start_date,
        status: opt_choice::<DebtStatus>(sub, "status")?.unwrap_or_default(),
        reason: opt_choice::<DebtReason>(sub, "reason")?.unwrap_or_default(),
        installments_paid: sub.get_one::<u32>("paid").copied().unwrap_or(0),
        installments_total: *sub.get_one::<u32>("installments").unwrap(),
    };
    records::validate_debt(&debt)?;
    let debt = records::debts(store).add(debt)?;
    println!(
        "Debt with {} recorded: {} in {} installments [{}]",
        debt.creditor,
        fmt_money(&debt.total_amount, &debt.currency),
        debt.installments_total,
        short_id(&debt.id)
    );
    Ok(())
}

fn edit(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let col = records::debts(store);
    let mut debt = col.find(sub.get_one::<String>("id").unwrap())?;

    if let Some(c) = opt_text(sub, "creditor") {
        debt.creditor = c;
    }
    if let Some(t) = sub.get_one::<String>("total") {
        debt.total_amount = parse_decimal(t)?;
    }
    if let Some(i) = sub.get_one::<String>("installment") {
        debt.installment_amount = parse_decimal(i)?;
    }
    if let Some(c) = opt_text(sub, "currency") {
        debt.currency = c.to_uppercase();
    }
    if let Some(d) = sub.get_one::<String>("start") {
        debt.start_date = parse_date(d)?;
    }
    if let Some(s) = opt_choice::<DebtStatus>(sub, "status")? {
        debt.status = s;
    }
    if let Some(r) = opt_choice::<DebtReason>(sub, "reason")? {
        debt.reason = r;
    }
    if let Some(p) = sub.get_one::<u32>("paid") {
        debt.installments_paid = *p;
    }
    if let Some(n) = sub.get_one::<u32>("installments") {
        debt.installments_total = *n;
    }

    records::validate_debt(&debt)?;
    col.update(debt.clone())?;
    println!(
        "Updated debt with {}: {}/{} installments, {}",
        debt.creditor, debt.installments_paid, debt.installments_total, debt.status
    );
    Ok(())
}

fn remove(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let col = records::debts(store);
    let debt = col.find(sub.get_one::<String>("id").unwrap())?;
    require_confirmation(sub, &format!("debt with {}", debt.creditor))?;
    col.remove(debt.id)?;
    println!("Removed debt with {}", debt.creditor);
    Ok(())
}

fn list(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = records::debts(store).list()?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|d| {
                vec![
                    short_id(&d.id),
                    d.creditor.clone(),
                    d.reason.to_string(),
                    fmt_money(&d.total_amount, &d.currency),
                    fmt_money(&d.installment_amount, &d.currency),
                    format!("{}/{}", d.installments_paid, d.installments_total),
                    fmt_money(&paid_amount(d), &d.currency),
                    d.start_date.to_string(),
                    d.status.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Creditor", "Reason", "Total", "Installment", "Paid #", "Paid", "Start", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

fn summary(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let s = debt_summary(&records::debts(store).list()?);
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let ccy = &cfg.display_currency;
        let mut rows = vec![
            vec!["Total".to_string(), fmt_money(&s.total, ccy)],
            vec!["Paid".to_string(), fmt_money(&s.paid, ccy)],
            vec!["Outstanding".to_string(), fmt_money(&s.outstanding, ccy)],
            vec!["Progress".to_string(), fmt_percent(&s.progress_percent)],
        ];
        for (status, count) in &s.by_status {
            rows.push(vec![format!("{} debts", status), count.to_string()]);
        }
        println!("{}", pretty_table(&["Debts", "Value"], rows));
    }
    Ok(())
}
