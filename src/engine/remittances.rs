// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Remittance;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub total: Decimal,
    pub items: Vec<Remittance>,
}

/// Remittances split into the running calendar year and closed years. A year
/// becomes historical as soon as the calendar moves past it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemittanceYears {
    pub current: YearSummary,
    pub historical: Vec<YearSummary>,
}

pub fn remittance_years(remittances: &[Remittance], current_year: i32) -> RemittanceYears {
    let mut years: BTreeMap<i32, Vec<Remittance>> = BTreeMap::new();
    for r in remittances {
        years.entry(r.date.year()).or_default().push(r.clone());
    }

    let summarize = |year: i32, mut items: Vec<Remittance>| {
        items.sort_by_key(|r| r.date);
        YearSummary {
            year,
            total: items.iter().map(|r| r.amount).sum(),
            items,
        }
    };

    let current_items = years.remove(&current_year).unwrap_or_default();
    let current = summarize(current_year, current_items);
    let historical = years
        .into_iter()
        .rev()
        .filter(|(y, _)| *y < current_year)
        .map(|(y, items)| summarize(y, items))
        .collect();
    RemittanceYears {
        current,
        historical,
    }
}
