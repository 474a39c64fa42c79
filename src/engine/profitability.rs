// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Profitability per service line.
//!
//! Groups are the distinct income descriptions. Variable expenses are charged
//! to the group whose name they carry; fixed expenses form a single pool that
//! is split evenly across all groups, regardless of revenue. Variable
//! expenses naming no group are left out of every line.

use super::{Balance, balance, percent, ratio, same_name};
use crate::models::{CostKind, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceLine {
    pub name: String,
    pub revenue: Decimal,
    pub direct_cost: Decimal,
    pub fixed_share: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
    pub margin: Decimal,
    pub tier: MarginTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitabilityReport {
    pub total_fixed: Decimal,
    pub fixed_share: Decimal,
    pub lines: Vec<ServiceLine>,
    pub overall: Balance,
    pub overall_margin: Decimal,
    pub overall_tier: MarginTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginTier {
    Alert,
    Healthy,
    Excellent,
}

/// Advisory copy attached to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub message: &'static str,
    pub detail: &'static str,
    pub recommendation: &'static str,
}

impl MarginTier {
    /// `< 30` alert, `30..=50` healthy, `> 50` excellent.
    pub fn from_margin(margin: Decimal) -> Self {
        if margin < Decimal::from(30) {
            MarginTier::Alert
        } else if margin <= Decimal::from(50) {
            MarginTier::Healthy
        } else {
            MarginTier::Excellent
        }
    }

    pub fn advice(&self) -> Advice {
        match self {
            MarginTier::Alert => Advice {
                message: "Profit margin is below what a healthy business needs: revenue comes in but little of it is kept.",
                detail: "Costs may be too high or prices too low.",
                recommendation: "Review pricing, variable costs and the time invested per service.",
            },
            MarginTier::Healthy => Advice {
                message: "The business runs on a healthy margin with room to improve.",
                detail: "The model works; strategic adjustments can add financial safety.",
                recommendation: "Streamline processes, cut costs and revisit price positioning to lift the margin.",
            },
            MarginTier::Excellent => Advice {
                message: "Excellent margin: the business is efficient and well structured.",
                detail: "This margin leaves room for stability, reinvestment and growth.",
                recommendation: "Keep monitoring costs and look at expansion or standardisation while staying healthy.",
            },
        }
    }
}

impl fmt::Display for MarginTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MarginTier::Alert => "Alert",
            MarginTier::Healthy => "Healthy",
            MarginTier::Excellent => "Excellent",
        })
    }
}

/// Distinct trimmed, non-empty income descriptions in first-seen order.
/// The first spelling of a name is the one reported.
pub fn service_groups(incomes: &[Transaction]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for income in incomes {
        let name = income.description.trim();
        if name.is_empty() {
            continue;
        }
        if !groups.iter().any(|g| same_name(g, name)) {
            groups.push(name.to_string());
        }
    }
    groups
}

pub fn profitability(incomes: &[Transaction], expenses: &[Transaction]) -> ProfitabilityReport {
    let total_fixed: Decimal = expenses
        .iter()
        .filter(|e| e.kind == CostKind::Fixed)
        .map(|e| e.amount)
        .sum();

    let groups = service_groups(incomes);
    let group_count = Decimal::from(groups.len().max(1));
    let fixed_share = ratio(total_fixed, group_count);

    let lines = groups
        .into_iter()
        .map(|name| {
            let revenue: Decimal = incomes
                .iter()
                .filter(|i| same_name(&i.description, &name))
                .map(|i| i.amount)
                .sum();
            let direct_cost: Decimal = expenses
                .iter()
                .filter(|e| e.kind == CostKind::Variable && same_name(&e.description, &name))
                .map(|e| e.amount)
                .sum();
            let total_cost = direct_cost + fixed_share;
            let profit = revenue - total_cost;
            let margin = percent(profit, revenue);
            ServiceLine {
                name,
                revenue,
                direct_cost,
                fixed_share,
                total_cost,
                profit,
                margin,
                tier: MarginTier::from_margin(margin),
            }
        })
        .collect();

    let overall = balance(incomes, expenses);
    let overall_margin = overall.margin();
    ProfitabilityReport {
        total_fixed,
        fixed_share,
        lines,
        overall,
        overall_margin,
        overall_tier: MarginTier::from_margin(overall_margin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;
    use uuid::Uuid;

    fn tx(desc: &str, amount: &str, kind: CostKind) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            description: desc.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            currency: "USD".into(),
            category: "Services".into(),
            payment_method: String::new(),
            kind,
            classification: None,
            goal_id: None,
            note: None,
        }
    }

    #[test]
    fn consulting_example_is_healthy() {
        let incomes = vec![tx("Consulting", "1000", CostKind::Variable)];
        let expenses = vec![
            tx("Consulting", "200", CostKind::Variable),
            tx("Office Rent", "300", CostKind::Fixed),
        ];
        let report = profitability(&incomes, &expenses);
        assert_eq!(report.lines.len(), 1);
        let line = &report.lines[0];
        assert_eq!(line.name, "Consulting");
        assert_eq!(line.revenue, Decimal::from(1000));
        assert_eq!(line.direct_cost, Decimal::from(200));
        assert_eq!(line.fixed_share, Decimal::from(300));
        assert_eq!(line.total_cost, Decimal::from(500));
        assert_eq!(line.profit, Decimal::from(500));
        assert_eq!(line.margin, Decimal::from(50));
        assert_eq!(line.tier, MarginTier::Healthy);
    }

    #[test]
    fn fixed_pool_is_split_evenly_and_closes() {
        let incomes = vec![
            tx("Design", "900", CostKind::Variable),
            tx("Audit", "100", CostKind::Variable),
            tx(" design ", "100", CostKind::Variable),
            tx("Hosting", "50", CostKind::Variable),
        ];
        let expenses = vec![
            tx("Rent", "100", CostKind::Fixed),
            tx("Insurance", "0.01", CostKind::Fixed),
            tx("Audit", "20", CostKind::Variable),
        ];
        let report = profitability(&incomes, &expenses);
        let names: Vec<_> = report.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Design", "Audit", "Hosting"]);
        assert_eq!(report.lines[0].revenue, Decimal::from(1000));

        let shares: Decimal = report.lines.iter().map(|l| l.fixed_share).sum();
        let diff = (shares - report.total_fixed).abs();
        assert!(diff < Decimal::from_str("0.000001").unwrap());

        for line in &report.lines {
            assert_eq!(line.profit, line.revenue - line.direct_cost - line.fixed_share);
        }
    }

    #[test]
    fn zero_revenue_line_has_zero_margin() {
        let incomes = vec![tx("Pro bono", "0", CostKind::Variable)];
        let expenses = vec![tx("Pro bono", "40", CostKind::Variable)];
        let report = profitability(&incomes, &expenses);
        assert_eq!(report.lines[0].margin, Decimal::ZERO);
        assert_eq!(report.lines[0].profit, Decimal::from(-40));
        assert_eq!(report.lines[0].tier, MarginTier::Alert);
    }

    #[test]
    fn unmatched_variable_expense_is_left_out() {
        let incomes = vec![tx("Consulting", "500", CostKind::Variable)];
        let expenses = vec![tx("Travel", "80", CostKind::Variable)];
        let report = profitability(&incomes, &expenses);
        assert_eq!(report.lines[0].total_cost, Decimal::ZERO);
        assert_eq!(report.overall.total_expense, Decimal::from(80));
    }

    #[test]
    fn no_income_means_no_lines() {
        let expenses = vec![tx("Rent", "300", CostKind::Fixed)];
        let report = profitability(&[], &expenses);
        assert!(report.lines.is_empty());
        assert_eq!(report.fixed_share, Decimal::from(300));
        assert_eq!(report.overall_margin, Decimal::ZERO);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(
            MarginTier::from_margin(Decimal::from_str("29.99").unwrap()),
            MarginTier::Alert
        );
        assert_eq!(MarginTier::from_margin(Decimal::from(30)), MarginTier::Healthy);
        assert_eq!(MarginTier::from_margin(Decimal::from(50)), MarginTier::Healthy);
        assert_eq!(
            MarginTier::from_margin(Decimal::from_str("50.01").unwrap()),
            MarginTier::Excellent
        );
    }
}
