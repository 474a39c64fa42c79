// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::IdealTable;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// All amounts are shown in this currency without conversion.
    pub display_currency: String,
    pub ideals: IdealTable,
    /// Expense categories whose records can feed a savings goal by name.
    pub goal_categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_currency: "USD".to_string(),
            ideals: IdealTable::default(),
            goal_categories: vec!["goal".into(), "savings".into(), "investment".into()],
        }
    }
}

impl Config {
    /// Reads `config.json` from `dir`; a missing file yields the defaults.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(CONFIG_FILE), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.ideals.lexicon("transport"), Some(Decimal::from(15)));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"display_currency":"BRL","ideals":{"entries":{"moradia":"35"},"fallback":"8"}}"#,
        )
        .unwrap();
        let cfg = Config::load_from(dir.path()).unwrap();
        assert_eq!(cfg.display_currency, "BRL");
        assert_eq!(cfg.ideals.lexicon("Moradia"), Some(Decimal::from(35)));
        assert_eq!(cfg.ideals.fallback, Decimal::from(8));
        assert_eq!(cfg.goal_categories.len(), 3);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.display_currency = "CAD".into();
        cfg.save_to(dir.path()).unwrap();
        assert_eq!(Config::load_from(dir.path()).unwrap(), cfg);
    }
}
