// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Monetary, percent, sum};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Balance {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

impl Balance {
    /// Net result as a share of income; zero when there is no income.
    pub fn margin(&self) -> Decimal {
        percent(self.balance, self.total_income)
    }
}

pub fn balance<I: Monetary, E: Monetary>(incomes: &[I], expenses: &[E]) -> Balance {
    let total_income = sum(incomes);
    let total_expense = sum(expenses);
    Balance {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}
