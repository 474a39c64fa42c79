// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation engine: pure functions from record collections to balances,
//! profitability, budget adherence, goal balances and yearly summaries.
//!
//! Nothing in here performs I/O or can fail. Every division is guarded and
//! yields zero on a zero divisor. Amounts tagged with different currencies
//! are summed nominally, as if they were all in the display currency.

pub mod balance;
pub mod debts;
pub mod distribution;
pub mod goals;
pub mod ideals;
pub mod profitability;
pub mod remittances;

pub use balance::{Balance, balance};
pub use debts::{DebtSummary, debt_summary};
pub use distribution::{
    Adherence, CategoryShare, ClassificationShare, category_distribution, classification_profile,
};
pub use goals::{GoalBalance, goal_balance};
pub use ideals::{IdealSource, IdealTable};
pub use profitability::{MarginTier, ProfitabilityReport, ServiceLine, profitability};
pub use remittances::{RemittanceYears, YearSummary, remittance_years};

use crate::models::{GoalStep, Remittance, Transaction};
use rust_decimal::Decimal;

/// Anything carrying a non-negative amount that can be summed.
pub trait Monetary {
    fn amount(&self) -> Decimal;
}

impl Monetary for Transaction {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Monetary for Remittance {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Monetary for GoalStep {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Monetary for Decimal {
    fn amount(&self) -> Decimal {
        *self
    }
}

impl<T: Monetary + ?Sized> Monetary for &T {
    fn amount(&self) -> Decimal {
        (**self).amount()
    }
}

pub fn sum<T: Monetary>(items: &[T]) -> Decimal {
    items.iter().map(Monetary::amount).sum()
}

/// Trimmed, case-insensitive name equality used to link independent records.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// `a / b`, or zero when `b` is zero.
pub fn ratio(a: Decimal, b: Decimal) -> Decimal {
    if b.is_zero() {
        Decimal::ZERO
    } else {
        a / b
    }
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub fn percent(part: Decimal, whole: Decimal) -> Decimal {
    ratio(part, whole) * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_ignoring_case_and_padding() {
        assert!(same_name(" Consulting ", "consulting"));
        assert!(!same_name("Consulting", "Consult"));
    }

    #[test]
    fn zero_divisor_yields_zero() {
        assert_eq!(ratio(Decimal::from(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percent(Decimal::from(1), Decimal::from(4)), Decimal::from(25));
    }
}
