// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed collections over the key-value store.
//!
//! A collection is read whole, a new vector is produced, and the whole array
//! is written back. Edits replace a record by id; there are no partial writes.

use crate::engine::same_name;
use crate::error::{Error, Result};
use crate::models::{
    BudgetLine, CostKind, Debt, Goal, GoalStep, Recurrence, Remittance, SavedReport, Transaction,
};
use crate::storage::{self, Storage};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

pub const DEBTS: &str = "debts";
pub const REMITTANCES: &str = "remittances";
pub const GOALS: &str = "goals";
pub const GOAL_STEPS: &str = "goal_steps";

/// Personal and business finances are tracked in separate books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Book {
    #[default]
    Personal,
    Business,
}

impl Book {
    pub fn incomes_key(&self) -> &'static str {
        match self {
            Book::Personal => "incomes",
            Book::Business => "business_incomes",
        }
    }

    pub fn expenses_key(&self) -> &'static str {
        match self {
            Book::Personal => "expenses",
            Book::Business => "business_expenses",
        }
    }

    pub fn budget_key(&self) -> &'static str {
        match self {
            Book::Personal => "monthly_budget",
            Book::Business => "business_monthly_budget",
        }
    }

    pub fn history_key(&self) -> &'static str {
        match self {
            Book::Personal => "personal_history",
            Book::Business => "business_history",
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Book::Personal => "personal",
            Book::Business => "business",
        })
    }
}

impl FromStr for Book {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Book::Personal),
            "business" => Ok(Book::Business),
            other => Err(format!("unknown book '{}' (use personal|business)", other)),
        }
    }
}

pub trait Record: Serialize + DeserializeOwned + Clone {
    fn id(&self) -> Uuid;
}

macro_rules! impl_record {
    ($($t:ty),*) => {
        $(impl Record for $t {
            fn id(&self) -> Uuid {
                self.id
            }
        })*
    };
}

impl_record!(Transaction, BudgetLine, Debt, Remittance, Goal, GoalStep, SavedReport);

pub struct Collection<'s, T> {
    store: &'s dyn Storage,
    key: String,
    _marker: PhantomData<T>,
}

impl<'s, T: Record> Collection<'s, T> {
    pub fn new(store: &'s dyn Storage, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            _marker: PhantomData,
        }
    }

    pub fn list(&self) -> Result<Vec<T>> {
        storage::load(self.store, &self.key)
    }

    /// Finds a record by full id or by an unambiguous id prefix.
    pub fn find(&self, id: &str) -> Result<T> {
        let id = id.trim().to_lowercase();
        let mut hits: Vec<T> = self
            .list()?
            .into_iter()
            .filter(|r| r.id().to_string().starts_with(&id))
            .collect();
        match hits.len() {
            0 => Err(Error::NotFound {
                collection: self.key.clone(),
                id,
            }),
            1 if !id.is_empty() => Ok(hits.remove(0)),
            _ => Err(Error::Validation(format!(
                "id '{}' is ambiguous in {}; give more characters",
                id, self.key
            ))),
        }
    }

    pub fn add(&self, item: T) -> Result<T> {
        let mut items = self.list()?;
        items.push(item.clone());
        storage::save(self.store, &self.key, &items)?;
        info!(collection = %self.key, id = %item.id(), "record added");
        Ok(item)
    }

    /// Prepends instead of appending; used for newest-first histories.
    pub fn add_front(&self, item: T) -> Result<T> {
        let mut items = self.list()?;
        items.insert(0, item.clone());
        storage::save(self.store, &self.key, &items)?;
        info!(collection = %self.key, id = %item.id(), "record added");
        Ok(item)
    }

    pub fn update(&self, item: T) -> Result<()> {
        let mut items = self.list()?;
        let slot = items
            .iter_mut()
            .find(|r| r.id() == item.id())
            .ok_or_else(|| Error::NotFound {
                collection: self.key.clone(),
                id: item.id().to_string(),
            })?;
        *slot = item;
        storage::save(self.store, &self.key, &items)
    }

    pub fn remove(&self, id: Uuid) -> Result<T> {
        let mut items = self.list()?;
        let pos = items
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Error::NotFound {
                collection: self.key.clone(),
                id: id.to_string(),
            })?;
        let removed = items.remove(pos);
        storage::save(self.store, &self.key, &items)?;
        info!(collection = %self.key, %id, "record removed");
        Ok(removed)
    }

    pub fn replace_all(&self, items: &[T]) -> Result<()> {
        storage::save(self.store, &self.key, items)
    }
}

pub fn incomes(store: &dyn Storage, book: Book) -> Collection<'_, Transaction> {
    Collection::new(store, book.incomes_key())
}

pub fn expenses(store: &dyn Storage, book: Book) -> Collection<'_, Transaction> {
    Collection::new(store, book.expenses_key())
}

pub fn budget_lines(store: &dyn Storage, book: Book) -> Collection<'_, BudgetLine> {
    Collection::new(store, book.budget_key())
}

pub fn history(store: &dyn Storage, book: Book) -> Collection<'_, SavedReport> {
    Collection::new(store, book.history_key())
}

pub fn debts(store: &dyn Storage) -> Collection<'_, Debt> {
    Collection::new(store, DEBTS)
}

pub fn remittances(store: &dyn Storage) -> Collection<'_, Remittance> {
    Collection::new(store, REMITTANCES)
}

pub fn goals(store: &dyn Storage) -> Collection<'_, Goal> {
    Collection::new(store, GOALS)
}

pub fn goal_steps(store: &dyn Storage) -> Collection<'_, GoalStep> {
    Collection::new(store, GOAL_STEPS)
}

/// Largest amount accepted for any money field. Keeps report sums and
/// percentages well inside `Decimal` range.
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000_000i64)
}

fn check_ceiling(field: &str, amount: Decimal) -> Result<()> {
    if amount > max_amount() {
        return Err(Error::Validation(format!(
            "{} {} exceeds the maximum of {}",
            field,
            amount,
            max_amount()
        )));
    }
    Ok(())
}

/// Entry-time rule for incomes, expenses and remittances.
pub fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::Validation(format!(
            "amount must be greater than zero (got {})",
            amount
        )));
    }
    check_ceiling("amount", amount)
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

pub fn validate_transaction(t: &Transaction) -> Result<()> {
    require_text("description", &t.description)?;
    validate_amount(t.amount)
}

pub fn validate_remittance(r: &Remittance) -> Result<()> {
    require_text("destination", &r.destination)?;
    validate_amount(r.amount)
}

pub fn validate_debt(d: &Debt) -> Result<()> {
    require_text("creditor", &d.creditor)?;
    if d.total_amount < Decimal::ZERO || d.installment_amount < Decimal::ZERO {
        return Err(Error::Validation("debt amounts cannot be negative".into()));
    }
    check_ceiling("total", d.total_amount)?;
    check_ceiling("installment", d.installment_amount)?;
    if d.installments_paid > d.installments_total {
        return Err(Error::Validation(format!(
            "installments paid ({}) exceed the total ({})",
            d.installments_paid, d.installments_total
        )));
    }
    Ok(())
}

pub fn validate_budget_line(l: &BudgetLine) -> Result<()> {
    require_text("description", &l.description)?;
    check_ceiling("average amount", l.average_amount)?;
    check_ceiling("target amount", l.target_amount)?;
    if let Some(p) = l.ideal_percent {
        if p < Decimal::ZERO || p > Decimal::ONE_HUNDRED {
            return Err(Error::Validation(format!(
                "ideal percentage must be between 0 and 100 (got {})",
                p
            )));
        }
    }
    if let Some(day) = l.due_day {
        if !(1..=31).contains(&day) {
            return Err(Error::Validation(format!("due day {} is not a day of month", day)));
        }
    }
    Ok(())
}

pub fn validate_goal_step(s: &GoalStep) -> Result<()> {
    validate_amount(s.amount)?;
    if s.monthly_investment < Decimal::ZERO {
        return Err(Error::Validation("monthly investment cannot be negative".into()));
    }
    check_ceiling("monthly investment", s.monthly_investment)
}

/// Goal names must be unique because unlinked records are matched by name.
pub fn validate_new_goal(existing: &[Goal], g: &Goal) -> Result<()> {
    require_text("goal name", &g.name)?;
    if let Some(target) = g.target_amount {
        check_ceiling("target", target)?;
    }
    if existing
        .iter()
        .any(|e| e.id != g.id && same_name(&e.name, &g.name))
    {
        return Err(Error::Validation(format!("goal '{}' already exists", g.name.trim())));
    }
    Ok(())
}

/// A fixed business expense implies a recurring commitment: mirror it as a
/// monthly budget line unless one with the same name exists.
pub fn sync_fixed_expense(
    store: &dyn Storage,
    book: Book,
    expense: &Transaction,
) -> Result<Option<BudgetLine>> {
    if book != Book::Business || expense.kind != CostKind::Fixed {
        return Ok(None);
    }
    let lines = budget_lines(store, book);
    if lines
        .list()?
        .iter()
        .any(|l| same_name(&l.description, &expense.description))
    {
        return Ok(None);
    }
    let line = BudgetLine {
        id: Uuid::new_v4(),
        description: expense.description.trim().to_string(),
        average_amount: expense.amount,
        currency: expense.currency.clone(),
        kind: CostKind::Fixed,
        target_amount: expense.amount,
        ideal_percent: None,
        due_day: u8::try_from(expense.date.day()).ok(),
        recurrence: Recurrence::Monthly,
    };
    Ok(Some(lines.add(line)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn tx(desc: &str, amount: i64, kind: CostKind) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
            description: desc.into(),
            amount: Decimal::from(amount),
            currency: "USD".into(),
            category: "Operations".into(),
            payment_method: "card".into(),
            kind,
            classification: None,
            goal_id: None,
            note: None,
        }
    }

    #[test]
    fn add_edit_remove_cycle() {
        let mem = MemoryStorage::new();
        let col = expenses(&mem, Book::Personal);
        let added = col.add(tx("Groceries", 40, CostKind::Variable)).unwrap();

        let mut edited = col.find(&added.id.to_string()[..8]).unwrap();
        edited.amount = Decimal::from(45);
        col.update(edited).unwrap();
        assert_eq!(col.list().unwrap()[0].amount, Decimal::from(45));

        col.remove(added.id).unwrap();
        assert!(col.list().unwrap().is_empty());
        assert!(matches!(col.remove(added.id), Err(Error::NotFound { .. })));
    }

    #[test]
    fn books_use_separate_keys() {
        let mem = MemoryStorage::new();
        incomes(&mem, Book::Business)
            .add(tx("Consulting", 10, CostKind::Variable))
            .unwrap();
        assert!(incomes(&mem, Book::Personal).list().unwrap().is_empty());
        assert_eq!(mem.keys(), vec!["business_incomes".to_string()]);
    }

    #[test]
    fn non_positive_amounts_rejected() {
        assert!(validate_transaction(&tx("Rent", 0, CostKind::Fixed)).is_err());
        assert!(validate_transaction(&tx("Rent", -5, CostKind::Fixed)).is_err());
        assert!(validate_transaction(&tx("  ", 5, CostKind::Fixed)).is_err());
        assert!(validate_transaction(&tx("Rent", 5, CostKind::Fixed)).is_ok());
    }

    #[test]
    fn amounts_above_ceiling_rejected() {
        let mut t = tx("Rent", 5, CostKind::Fixed);
        t.amount = max_amount();
        assert!(validate_transaction(&t).is_ok());
        t.amount = Decimal::MAX;
        assert!(matches!(validate_transaction(&t), Err(Error::Validation(_))));
    }

    #[test]
    fn fixed_business_expense_creates_budget_line_once() {
        let mem = MemoryStorage::new();
        let rent = tx("Office Rent", 300, CostKind::Fixed);
        let line = sync_fixed_expense(&mem, Book::Business, &rent)
            .unwrap()
            .unwrap();
        assert_eq!(line.due_day, Some(12));
        assert_eq!(line.target_amount, Decimal::from(300));
        assert!(
            sync_fixed_expense(&mem, Book::Business, &tx("office rent", 310, CostKind::Fixed))
                .unwrap()
                .is_none()
        );
        assert!(
            sync_fixed_expense(&mem, Book::Personal, &rent)
                .unwrap()
                .is_none()
        );
        assert_eq!(budget_lines(&mem, Book::Business).list().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_goal_names_rejected() {
        let a = Goal {
            id: Uuid::new_v4(),
            name: "Trip".into(),
            target_amount: None,
            currency: "USD".into(),
        };
        let b = Goal {
            id: Uuid::new_v4(),
            name: " trip ".into(),
            ..a.clone()
        };
        assert!(validate_new_goal(&[a.clone()], &b).is_err());
        assert!(validate_new_goal(&[a.clone()], &a).is_ok());
    }
}
