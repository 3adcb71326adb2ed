// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use std::io::{BufRead, Write};

use crate::error::ValidationError;
use crate::expr::{Builtin, parse_amount};
use rust_decimal::Decimal;

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Amount of a new transaction: a number strictly greater than zero.
pub fn parse_positive_amount(s: &str) -> Result<Decimal, ValidationError> {
    let d = parse_amount(s)?;
    if d <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(s.to_string()));
    }
    Ok(d)
}

/// Asks a yes/no question; anything but `y`/`yes` counts as no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<bool> {
    write!(out, "{} [y/N]: ", question)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

pub fn date_help() -> String {
    let builtins: Vec<&str> = Builtin::ALL.iter().map(Builtin::keyword).collect();
    [
        "Supported date formats:".to_string(),
        format!("Builtins: {}", builtins.join(", ")),
        "Specific date formats: YYYY-MM-DD, MM-DD-YYYY, DD-MM-YYYY, YYYYMMDD, DD Mon YYYY, Mon DD YYYY"
            .to_string(),
        "  '/' may be used instead of '-', single digit days and months are fine".to_string(),
        "Date ranges:".to_string(),
        "  :date      - all transactions on or before date".to_string(),
        "  date:      - all transactions on or after date".to_string(),
        "  date:date  - all transactions between dates (inclusive)".to_string(),
    ]
    .join("\n")
}
