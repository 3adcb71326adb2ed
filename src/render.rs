// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use comfy_table::Table;
use serde_json::{Map, Value, json};

use crate::models::{Column, Transaction};
use crate::utils::pretty_table;

const STORE_TIME: &str = "%Y-%m-%d %H:%M:%S";
const HUMAN_TIME: &str = "%d %b %Y %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(anyhow!("Unknown format: {} (use table|json|csv)", other)),
        }
    }
}

/// Stored timestamps are UTC; the human form is shown in local time.
pub fn human_time(ts: &NaiveDateTime) -> String {
    Utc.from_utc_datetime(ts)
        .with_timezone(&Local)
        .format(HUMAN_TIME)
        .to_string()
}

fn cell(tx: &Transaction, col: Column, human: bool) -> String {
    match col {
        Column::Id => tx.id.to_string(),
        Column::Type => tx.kind.to_string(),
        Column::Amount => tx.amount.to_string(),
        Column::Description => tx.description.clone(),
        Column::Date if human => human_time(&tx.created_at),
        Column::Date => tx.created_at.format(STORE_TIME).to_string(),
    }
}

pub fn table(rows: &[Transaction], columns: &[Column], human: bool) -> Table {
    let headers: Vec<&str> = columns.iter().map(Column::header).collect();
    let data = rows
        .iter()
        .map(|tx| columns.iter().map(|c| cell(tx, *c, human)).collect())
        .collect();
    pretty_table(&headers, data)
}

pub fn summary(page: u32, total_pages: u32, results: usize, total: u64) -> String {
    format!(
        "Page: {} of {} | Results: {} | Total: {}",
        page, total_pages, results, total
    )
}

/// CSV always carries every field.
pub fn write_csv<W: Write>(out: W, rows: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["ID", "Type", "Amt", "Desc", "CreatedAt", "UpdatedAt"])?;
    for tx in rows {
        wtr.write_record([
            tx.id.to_string(),
            tx.kind.to_string(),
            tx.amount.round_dp(2).to_string(),
            tx.description.clone(),
            tx.created_at.format(STORE_TIME).to_string(),
            tx.updated_at.format(STORE_TIME).to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Serializes rows to JSON. A projection keeps only the selected keys.
pub fn to_json(rows: &[Transaction], projection: &[Column], pretty: bool) -> Result<String> {
    let items: Vec<Value> = if projection.is_empty() {
        rows.iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?
    } else {
        rows.iter()
            .map(|tx| {
                let mut obj = Map::new();
                for col in projection {
                    let v = match col {
                        Column::Id => json!(tx.id),
                        Column::Type => json!(tx.kind),
                        Column::Amount => json!(tx.amount),
                        Column::Description => json!(tx.description),
                        Column::Date => json!(tx.created_at),
                    };
                    obj.insert(col.field().to_string(), v);
                }
                Value::Object(obj)
            })
            .collect()
    };
    let out = if pretty {
        serde_json::to_string_pretty(&items)?
    } else {
        serde_json::to_string(&items)?
    };
    Ok(out)
}
