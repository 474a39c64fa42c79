// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Balance, balance, percent, same_name};
use crate::models::{Goal, GoalStep, StepKind, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalBalance {
    pub goal: String,
    pub contributions: Decimal,
    pub withdrawals: Decimal,
    pub balance: Decimal,
    pub tagged_transactions: usize,
    pub progress_percent: Option<Decimal>,
}

/// True when `t` feeds `goal`: linked by id, or, for unlinked records, filed
/// under one of the goal categories with the goal's name as description.
pub fn feeds_goal(t: &Transaction, goal: &Goal, goal_categories: &[String]) -> bool {
    match t.goal_id {
        Some(id) => id == goal.id,
        None => {
            goal_categories.iter().any(|c| same_name(c, &t.category))
                && same_name(&t.description, &goal.name)
        }
    }
}

pub fn goal_balance(
    goal: &Goal,
    transactions: &[Transaction],
    steps: &[GoalStep],
    goal_categories: &[String],
) -> GoalBalance {
    let tagged: Vec<Decimal> = transactions
        .iter()
        .filter(|t| feeds_goal(t, goal, goal_categories))
        .map(|t| t.amount)
        .collect();
    let own_steps = steps
        .iter()
        .filter(|s| s.goal_id == goal.id && s.amount > Decimal::ZERO);

    let mut contributions = tagged.clone();
    let mut withdrawals: Vec<Decimal> = Vec::new();
    for step in own_steps {
        match step.kind {
            StepKind::Contribution => contributions.push(step.amount),
            StepKind::Withdrawal => withdrawals.push(step.amount),
        }
    }

    let Balance {
        total_income,
        total_expense,
        balance,
    } = balance(contributions.as_slice(), withdrawals.as_slice());
    GoalBalance {
        goal: goal.name.clone(),
        contributions: total_income,
        withdrawals: total_expense,
        balance,
        tagged_transactions: tagged.len(),
        progress_percent: goal
            .target_amount
            .filter(|t| *t > Decimal::ZERO)
            .map(|t| percent(balance, t)),
    }
}
