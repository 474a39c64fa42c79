// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{IdealSource, IdealTable, percent, ratio, same_name};
use crate::models::{BudgetLine, Classification, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Adherence {
    UnderControl,
    Caution,
    AtRisk,
}

impl Adherence {
    /// `ratio > 1.2` at risk, `ratio > 0.9` caution, otherwise under control.
    pub fn from_ratio(ratio: Decimal) -> Self {
        if ratio > Decimal::new(12, 1) {
            Adherence::AtRisk
        } else if ratio > Decimal::new(9, 1) {
            Adherence::Caution
        } else {
            Adherence::UnderControl
        }
    }
}

impl fmt::Display for Adherence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Adherence::UnderControl => "under control",
            Adherence::Caution => "caution",
            Adherence::AtRisk => "at risk",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub total: Decimal,
    pub count: usize,
    pub percent: Decimal,
    pub ideal_percent: Decimal,
    pub ideal_source: IdealSource,
    pub ratio: Decimal,
    pub status: Adherence,
    pub trend_percent: Decimal,
    pub saving_insight: Decimal,
}

struct Bucket {
    name: String,
    total: Decimal,
    count: usize,
}

fn bucket_by_category(expenses: &[Transaction]) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    for e in expenses {
        match buckets.iter_mut().find(|b| same_name(&b.name, &e.category)) {
            Some(b) => {
                b.total += e.amount;
                b.count += 1;
            }
            None => buckets.push(Bucket {
                name: e.category.trim().to_string(),
                total: e.amount,
                count: 1,
            }),
        }
    }
    buckets
}

/// Spend share per category with its budget-adherence status.
///
/// `previous` holds the expenses of the latest archived period; a category
/// with no spend there reports a zero trend.
pub fn category_distribution(
    expenses: &[Transaction],
    lines: &[BudgetLine],
    previous: Option<&[Transaction]>,
    ideals: &IdealTable,
) -> Vec<CategoryShare> {
    let total_spend: Decimal = expenses.iter().map(|e| e.amount).sum();
    if total_spend.is_zero() {
        return Vec::new();
    }

    let mut shares: Vec<CategoryShare> = bucket_by_category(expenses)
        .into_iter()
        .map(|b| {
            let (ideal_percent, ideal_source) = ideals.resolve(&b.name, lines);
            let ideal_amount = total_spend * ideal_percent / Decimal::ONE_HUNDRED;
            let ratio = ratio(b.total, ideal_amount);
            let previous_total: Decimal = previous
                .unwrap_or_default()
                .iter()
                .filter(|p| same_name(&p.category, &b.name))
                .map(|p| p.amount)
                .sum();
            let trend_percent = if previous_total > Decimal::ZERO {
                percent(b.total - previous_total, previous_total)
            } else {
                Decimal::ZERO
            };
            CategoryShare {
                percent: percent(b.total, total_spend),
                ideal_percent,
                ideal_source,
                ratio,
                status: Adherence::from_ratio(ratio),
                trend_percent,
                saving_insight: b.total * Decimal::new(1, 1),
                name: b.name,
                total: b.total,
                count: b.count,
            }
        })
        .collect();
    shares.sort_by(|a, b| b.total.cmp(&a.total));
    shares
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationShare {
    pub classification: Classification,
    pub total: Decimal,
    pub percent: Decimal,
}

/// Spending profile by classification. Every classification is listed;
/// unclassified expenses count as essential.
pub fn classification_profile(expenses: &[Transaction]) -> Vec<ClassificationShare> {
    let total: Decimal = expenses.iter().map(|e| e.amount).sum();
    Classification::ALL
        .iter()
        .map(|c| {
            let sum: Decimal = expenses
                .iter()
                .filter(|e| e.classification.unwrap_or(Classification::Essential) == *c)
                .map(|e| e.amount)
                .sum();
            ClassificationShare {
                classification: *c,
                total: sum,
                percent: percent(sum, total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostKind;
    use chrono::NaiveDate;
    use std::str::FromStr;
    use uuid::Uuid;

    fn expense(category: &str, amount: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            description: format!("{} bill", category),
            amount: Decimal::from_str(amount).unwrap(),
            currency: "USD".into(),
            category: category.into(),
            payment_method: "card".into(),
            kind: CostKind::Variable,
            classification: None,
            goal_id: None,
            note: None,
        }
    }

    #[test]
    fn empty_spend_reports_nothing() {
        let table = IdealTable::default();
        assert!(category_distribution(&[], &[], None, &table).is_empty());
        let zero = vec![expense("Food", "0")];
        assert!(category_distribution(&zero, &[], None, &table).is_empty());
    }

    #[test]
    fn percents_close_to_one_hundred() {
        let table = IdealTable::default();
        let expenses = vec![
            expense("Food", "33.33"),
            expense("Housing", "33.33"),
            expense("Pets", "33.34"),
            expense("food", "10"),
        ];
        let shares = category_distribution(&expenses, &[], None, &table);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].name, "Food");
        assert_eq!(shares[0].count, 2);
        let total: Decimal = shares.iter().map(|s| s.percent).sum();
        assert!((total - Decimal::ONE_HUNDRED).abs() < Decimal::from_str("0.0001").unwrap());
    }

    #[test]
    fn adherence_boundaries() {
        assert_eq!(Adherence::from_ratio(Decimal::from_str("1.2").unwrap()), Adherence::Caution);
        assert_eq!(Adherence::from_ratio(Decimal::from_str("1.21").unwrap()), Adherence::AtRisk);
        assert_eq!(
            Adherence::from_ratio(Decimal::from_str("0.9").unwrap()),
            Adherence::UnderControl
        );
        assert_eq!(Adherence::from_ratio(Decimal::from_str("0.91").unwrap()), Adherence::Caution);
    }

    #[test]
    fn ratio_uses_ideal_share_of_total() {
        // Housing: 60 of 100 against an ideal of 30% => ratio 2.0.
        // Food: 20 of 100 against 20% => ratio 1.0.
        // Pets: 20 of 100 against the 10% fallback => ratio 2.0.
        let table = IdealTable::default();
        let expenses = vec![
            expense("Housing", "60"),
            expense("Food", "20"),
            expense("Pets", "20"),
        ];
        let shares = category_distribution(&expenses, &[], None, &table);
        let by_name = |n: &str| shares.iter().find(|s| s.name == n).unwrap();
        assert_eq!(by_name("Housing").ratio, Decimal::from(2));
        assert_eq!(by_name("Housing").status, Adherence::AtRisk);
        assert_eq!(by_name("Food").ratio, Decimal::ONE);
        assert_eq!(by_name("Food").status, Adherence::Caution);
        assert_eq!(by_name("Pets").ideal_source, IdealSource::Fallback);
        assert_eq!(by_name("Housing").saving_insight, Decimal::from(6));
    }

    #[test]
    fn trend_against_previous_period() {
        let table = IdealTable::default();
        let previous = vec![expense("Food", "100"), expense("Leisure", "0")];
        let current = vec![expense("Food", "150"), expense("Leisure", "40"), expense("Pets", "10")];
        let shares = category_distribution(&current, &[], Some(&previous), &table);
        let by_name = |n: &str| shares.iter().find(|s| s.name == n).unwrap();
        assert_eq!(by_name("Food").trend_percent, Decimal::from(50));
        assert_eq!(by_name("Leisure").trend_percent, Decimal::ZERO);
        assert_eq!(by_name("Pets").trend_percent, Decimal::ZERO);
    }

    #[test]
    fn profile_defaults_to_essential() {
        let mut treat = expense("Leisure", "25");
        treat.classification = Some(Classification::Superfluous);
        let expenses = vec![expense("Food", "75"), treat];
        let profile = classification_profile(&expenses);
        assert_eq!(profile.len(), 3);
        assert_eq!(profile[0].total, Decimal::from(75));
        assert_eq!(profile[1].total, Decimal::ZERO);
        assert_eq!(profile[2].percent, Decimal::from(25));
    }
}
