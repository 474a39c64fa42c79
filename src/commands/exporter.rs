// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::book_of;
use crate::archive;
use crate::export::{self, Format};
use crate::storage::Storage;
use anyhow::{Context, Result};
use std::path::Path;

/// Exports a saved report by `--id`, or a snapshot of the live book.
pub fn handle(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let format: Format = sub.get_one::<String>("format").unwrap().parse()?;
    let out = sub.get_one::<String>("out").unwrap();
    let book = book_of(sub)?;

    let (snapshot, what) = match sub.get_one::<String>("id") {
        Some(id) => {
            let report = archive::find(store, book, id)?;
            (report.data, format!("saved report {}", report.period_label))
        }
        None => (
            archive::build_snapshot(store, book)?,
            format!("live {} book", book),
        ),
    };

    export::write(&snapshot, format, Path::new(out))
        .with_context(|| format!("Export to {} failed", out))?;
    println!("Exported {} to {}", what, out);
    Ok(())
}
