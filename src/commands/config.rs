// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{CONFIG_FILE, Config};
use crate::db;
use anyhow::Result;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => println!("{}", serde_json::to_string_pretty(cfg)?),
        Some(("path", _)) => {
            println!("config: {}", db::config_dir()?.join(CONFIG_FILE).display());
            println!("data:   {}", db::db_path()?.display());
        }
        _ => {}
    }
    Ok(())
}
