// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Renders archived snapshots as CSV or JSON documents.

use crate::error::{Error, Result};
use crate::models::{Section, Snapshot};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(Error::Validation(format!(
                "unknown export format '{}' (use csv|json)",
                other
            ))),
        }
    }
}

fn cell(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        // Nested arrays and objects are embedded as JSON text.
        other => other.to_string(),
    }
}

fn section_csv(section: &Section) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    wtr.write_record([section.name.to_uppercase()])?;

    let headers: Vec<String> = match section.rows.first() {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        _ => vec!["value".to_string()],
    };
    wtr.write_record(&headers)?;
    for row in &section.rows {
        let record: Vec<String> = match row {
            Value::Object(map) => headers
                .iter()
                .map(|h| map.get(h).map(cell).unwrap_or_default())
                .collect(),
            other => vec![cell(other)],
        };
        wtr.write_record(&record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::Validation(e.to_string()))
}

/// One block per non-empty section, separated by a blank line.
pub fn to_csv(snapshot: &Snapshot) -> Result<String> {
    let blocks = snapshot
        .sections
        .iter()
        .filter(|s| !s.rows.is_empty())
        .map(section_csv)
        .collect::<Result<Vec<_>>>()?;
    Ok(blocks.join("\n"))
}

pub fn to_json(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn render(snapshot: &Snapshot, format: Format) -> Result<String> {
    match format {
        Format::Csv => to_csv(snapshot),
        Format::Json => to_json(snapshot),
    }
}

/// Renders first so that a failed render never leaves a partial file.
pub fn write(snapshot: &Snapshot, format: Format, out: &Path) -> Result<()> {
    let body = render(snapshot, format)?;
    fs::write(out, body)?;
    info!(path = %out.display(), ?format, "snapshot exported");
    Ok(())
}
