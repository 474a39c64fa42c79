// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::same_name;
use crate::models::BudgetLine;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where an ideal percentage came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdealSource {
    User,
    Lexicon,
    Fallback,
}

/// Default share of total spend per well-known category, plus the value used
/// for everything else. Lives in the user config so it can be localised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealTable {
    pub entries: BTreeMap<String, Decimal>,
    pub fallback: Decimal,
}

impl Default for IdealTable {
    fn default() -> Self {
        let entries = [
            ("housing", 30),
            ("food", 20),
            ("utilities", 10),
            ("transport", 15),
            ("savings", 10),
            ("investment", 5),
            ("debt", 15),
            ("leisure", 10),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Decimal::from(v)))
        .collect();
        Self {
            entries,
            fallback: Decimal::from(10),
        }
    }
}

impl IdealTable {
    pub fn lexicon(&self, category: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(k, _)| same_name(k, category))
            .map(|(_, v)| *v)
    }

    /// Resolution order: a positive percentage on a budget line named like the
    /// category (by description or cost kind), then the lexicon, then the
    /// fallback. Only the first budget line matching the category is consulted;
    /// later matches are ignored even when they carry a percentage.
    pub fn resolve(&self, category: &str, lines: &[BudgetLine]) -> (Decimal, IdealSource) {
        let user = lines
            .iter()
            .find(|l| same_name(&l.description, category) || same_name(l.kind.label(), category))
            .and_then(|l| l.ideal_percent)
            .filter(|p| *p > Decimal::ZERO);
        if let Some(p) = user {
            return (p, IdealSource::User);
        }
        match self.lexicon(category) {
            Some(p) => (p, IdealSource::Lexicon),
            None => (self.fallback, IdealSource::Fallback),
        }
    }
}
