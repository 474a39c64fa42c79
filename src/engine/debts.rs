// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::percent;
use crate::models::{Debt, DebtStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtSummary {
    pub total: Decimal,
    pub paid: Decimal,
    pub outstanding: Decimal,
    pub progress_percent: Decimal,
    pub by_status: BTreeMap<DebtStatus, usize>,
}

/// Amount already repaid, never more than the contracted total.
pub fn paid_amount(debt: &Debt) -> Decimal {
    let paid = debt.installment_amount * Decimal::from(debt.installments_paid);
    paid.min(debt.total_amount)
}

pub fn debt_summary(debts: &[Debt]) -> DebtSummary {
    let total: Decimal = debts.iter().map(|d| d.total_amount).sum();
    let paid: Decimal = debts.iter().map(paid_amount).sum();
    let mut by_status = BTreeMap::new();
    for d in debts {
        *by_status.entry(d.status).or_insert(0) += 1;
    }
    DebtSummary {
        total,
        paid,
        outstanding: total - paid,
        progress_percent: percent(paid, total),
        by_status,
    }
}
