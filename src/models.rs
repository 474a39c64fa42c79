// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Whether a cost recurs every period or follows activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostKind {
    Fixed,
    #[default]
    Variable,
}

impl CostKind {
    pub fn label(&self) -> &'static str {
        match self {
            CostKind::Fixed => "fixed",
            CostKind::Variable => "variable",
        }
    }
}

impl fmt::Display for CostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CostKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(CostKind::Fixed),
            "variable" => Ok(CostKind::Variable),
            other => Err(format!("unknown cost kind '{}' (use fixed|variable)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Essential,
    NonEssential,
    Superfluous,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::Essential,
        Classification::NonEssential,
        Classification::Superfluous,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Classification::Essential => "essential",
            Classification::NonEssential => "non_essential",
            Classification::Superfluous => "superfluous",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "essential" => Ok(Classification::Essential),
            "non_essential" => Ok(Classification::NonEssential),
            "superfluous" => Ok(Classification::Superfluous),
            other => Err(format!(
                "unknown classification '{}' (use essential|non-essential|superfluous)",
                other
            )),
        }
    }
}

/// An income or an expense. The direction is given by the collection the
/// record is stored in, so `amount` is always a positive magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub category: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub kind: CostKind,
    #[serde(default)]
    pub classification: Option<Classification>,
    /// Explicit link to a savings goal; unlinked records fall back to name matching.
    #[serde(default)]
    pub goal_id: Option<Uuid>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Recurrence::Monthly),
            "quarterly" => Ok(Recurrence::Quarterly),
            "yearly" => Ok(Recurrence::Yearly),
            other => Err(format!(
                "unknown recurrence '{}' (use monthly|quarterly|yearly)",
                other
            )),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Recurrence::Monthly => "monthly",
            Recurrence::Quarterly => "quarterly",
            Recurrence::Yearly => "yearly",
        })
    }
}

/// Planned monthly spending. Only used as the reference for ideal-vs-actual
/// comparisons, never summed as a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub id: Uuid,
    pub description: String,
    pub average_amount: Decimal,
    pub currency: String,
    pub kind: CostKind,
    pub target_amount: Decimal,
    #[serde(default)]
    pub ideal_percent: Option<Decimal>,
    #[serde(default)]
    pub due_day: Option<u8>,
    #[serde(default)]
    pub recurrence: Recurrence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    #[default]
    Regular,
    Late,
    Negotiating,
    Settled,
}

impl DebtStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DebtStatus::Regular => "regular",
            DebtStatus::Late => "late",
            DebtStatus::Negotiating => "negotiating",
            DebtStatus::Settled => "settled",
        }
    }
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DebtStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(DebtStatus::Regular),
            "late" => Ok(DebtStatus::Late),
            "negotiating" => Ok(DebtStatus::Negotiating),
            "settled" => Ok(DebtStatus::Settled),
            other => Err(format!(
                "unknown debt status '{}' (use regular|late|negotiating|settled)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtReason {
    #[default]
    Financing,
    Loan,
    CreditCard,
    Personal,
    Other,
}

impl fmt::Display for DebtReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DebtReason::Financing => "financing",
            DebtReason::Loan => "loan",
            DebtReason::CreditCard => "credit_card",
            DebtReason::Personal => "personal",
            DebtReason::Other => "other",
        })
    }
}

impl FromStr for DebtReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "financing" => Ok(DebtReason::Financing),
            "loan" => Ok(DebtReason::Loan),
            "credit_card" => Ok(DebtReason::CreditCard),
            "personal" => Ok(DebtReason::Personal),
            "other" => Ok(DebtReason::Other),
            other => Err(format!(
                "unknown debt reason '{}' (use financing|loan|credit-card|personal|other)",
                other
            )),
        }
    }
}

/// Independent ledger; never folded into the income/expense balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: Uuid,
    pub creditor: String,
    pub total_amount: Decimal,
    pub installment_amount: Decimal,
    pub currency: String,
    pub start_date: NaiveDate,
    pub status: DebtStatus,
    pub reason: DebtReason,
    pub installments_paid: u32,
    pub installments_total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remittance {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub destination: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub target_amount: Option<Decimal>,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    #[default]
    Contribution,
    Withdrawal,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StepKind::Contribution => "contribution",
            StepKind::Withdrawal => "withdrawal",
        })
    }
}

impl FromStr for StepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contribution" => Ok(StepKind::Contribution),
            "withdrawal" => Ok(StepKind::Withdrawal),
            other => Err(format!(
                "unknown step kind '{}' (use contribution|withdrawal)",
                other
            )),
        }
    }
}

/// A manual ledger event against a savings goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalStep {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub monthly_investment: Decimal,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub kind: StepKind,
}

/// One named array inside an archived snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub rows: Vec<Value>,
}

/// Deep copy of a book's collections, kept as plain JSON values so it can
/// never alias live data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sections: Vec<Section>,
}

impl Snapshot {
    pub fn push<T: Serialize>(&mut self, name: &str, rows: &[T]) -> serde_json::Result<()> {
        let rows = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        self.sections.push(Section {
            name: name.to_string(),
            rows,
        });
        Ok(())
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Decodes a section back into typed records. Rows that no longer match
    /// the record shape are skipped.
    pub fn rows_as<T: serde::de::DeserializeOwned>(&self, name: &str) -> Vec<T> {
        self.section(name)
            .map(|s| {
                s.rows
                    .iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.rows.is_empty())
    }
}

/// Write-once archive entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedReport {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub period_label: String,
    pub file_name: String,
    pub data: Snapshot,
}
