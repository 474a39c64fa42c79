// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod archive;
pub mod budgets;
pub mod config;
pub mod debts;
pub mod exporter;
pub mod goals;
pub mod remittances;
pub mod reports;
pub mod session;
pub mod transactions;

use crate::config::Config;
use crate::records::Book;
use crate::storage::Storage;
use crate::utils::parse_choice;
use anyhow::Result;
use transactions::Direction;

/// Routes a parsed command line. Session commands see the raw store; every
/// other command sees the store scoped to the active user.
pub fn run(store: &dyn Storage, matches: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    match matches.subcommand() {
        Some(("login", sub)) => return session::login(store, sub),
        Some(("logout", _)) => return session::logout(store),
        Some(("whoami", _)) => return session::whoami(store),
        Some(("config", sub)) => return config::handle(cfg, sub),
        _ => {}
    }

    let scoped = crate::session::scoped(store)?;
    let store: &dyn Storage = &scoped;
    match matches.subcommand() {
        Some(("income", sub)) => transactions::handle(store, sub, Direction::Income, cfg),
        Some(("expense", sub)) => transactions::handle(store, sub, Direction::Expense, cfg),
        Some(("budget", sub)) => budgets::handle(store, sub, cfg),
        Some(("debt", sub)) => debts::handle(store, sub, cfg),
        Some(("remit", sub)) => remittances::handle(store, sub, cfg),
        Some(("goal", sub)) => goals::handle(store, sub, cfg),
        Some(("report", sub)) => reports::handle(store, sub, cfg),
        Some(("archive", sub)) => archive::handle(store, sub),
        Some(("export", sub)) => exporter::handle(store, sub),
        _ => Ok(()),
    }
}

pub(crate) fn book_of(m: &clap::ArgMatches) -> Result<Book> {
    match m.get_one::<String>("book") {
        Some(b) => parse_choice(b),
        None => Ok(Book::default()),
    }
}

/// Explicit `--currency`, upper-cased, or the configured display currency.
pub(crate) fn currency_of(m: &clap::ArgMatches, cfg: &Config) -> String {
    m.get_one::<String>("currency")
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| cfg.display_currency.to_uppercase())
}

pub(crate) fn opt_text(m: &clap::ArgMatches, name: &str) -> Option<String> {
    m.get_one::<String>(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
