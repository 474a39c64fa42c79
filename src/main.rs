// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use tallybook::{cli, commands, config::Config, db, logging};

fn main() -> Result<()> {
    logging::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let cfg_dir = db::config_dir()?;
    let cfg = Config::load_from(&cfg_dir)
        .with_context(|| format!("Invalid config in {}", cfg_dir.display()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(_) => commands::run(&conn, &matches, &cfg)?,
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
