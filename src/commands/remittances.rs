// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{currency_of, opt_text};
use crate::config::Config;
use crate::engine::remittance_years;
use crate::models::Remittance;
use crate::records;
use crate::storage::Storage;
use crate::utils::{
    fmt_money, maybe_print_json, output_flags, parse_date, parse_decimal, pretty_table,
    require_confirmation, short_id, today,
};
use anyhow::Result;
use chrono::Datelike;
use uuid::Uuid;

pub fn handle(store: &dyn Storage, m: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub, cfg)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("years", sub)) => years(store, sub, cfg)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let r = Remittance {
        id: Uuid::new_v4(),
        date,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        currency: currency_of(sub, cfg),
        destination: opt_text(sub, "destination").unwrap_or_default(),
        note: opt_text(sub, "note"),
    };
    records::validate_remittance(&r)?;
    let r = records::remittances(store).add(r)?;
    println!(
        "Remittance of {} to {} on {} [{}]",
        fmt_money(&r.amount, &r.currency),
        r.destination,
        r.date,
        short_id(&r.id)
    );
    Ok(())
}

fn remove(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let col = records::remittances(store);
    let r = col.find(sub.get_one::<String>("id").unwrap())?;
    require_confirmation(sub, &format!("remittance to {} on {}", r.destination, r.date))?;
    col.remove(r.id)?;
    println!("Removed remittance to {} on {}", r.destination, r.date);
    Ok(())
}

fn list(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let mut data = records::remittances(store).list()?;
    data.sort_by(|a, b| b.date.cmp(&a.date));
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    short_id(&r.id),
                    r.date.to_string(),
                    fmt_money(&r.amount, &r.currency),
                    r.destination.clone(),
                    r.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Amount", "Destination", "Note"], rows)
        );
    }
    Ok(())
}

fn years(store: &dyn Storage, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| today().year());
    let summary = remittance_years(&records::remittances(store).list()?, year);
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let ccy = &cfg.display_currency;
        let mut rows = vec![vec![
            format!("{} (current)", summary.current.year),
            summary.current.items.len().to_string(),
            fmt_money(&summary.current.total, ccy),
        ]];
        for y in &summary.historical {
            rows.push(vec![
                y.year.to_string(),
                y.items.len().to_string(),
                fmt_money(&y.total, ccy),
            ]);
        }
        println!("{}", pretty_table(&["Year", "Remittances", "Total"], rows));
    }
    Ok(())
}
