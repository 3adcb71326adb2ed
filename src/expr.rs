// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Parsing of the `--date` and `--amount` filter tokens.
//!
//! A token is either a scalar (`v`) or a range built around `:`:
//! `:v` (at most), `v:` (at least) and `v:w` (inclusive interval).

use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ValidationError;

pub const RANGE_SEPARATOR: char = ':';

static SINGLE_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d)\b").unwrap());

// Tried in order; month-first wins when both readings are valid.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%Y%m%d",
    "%d %b %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%B %d %Y",
    "%B %d, %Y",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison<T> {
    Eq(T),
    AtMost(T),
    AtLeast(T),
    Between(T, T),
}

impl<T> Comparison<T> {
    pub fn operator(&self) -> &'static str {
        match self {
            Comparison::Eq(_) => "=",
            Comparison::AtMost(_) => "<=",
            Comparison::AtLeast(_) => ">=",
            Comparison::Between(_, _) => "BETWEEN",
        }
    }

    pub fn values(&self) -> Vec<&T> {
        match self {
            Comparison::Eq(v) | Comparison::AtMost(v) | Comparison::AtLeast(v) => vec![v],
            Comparison::Between(lo, hi) => vec![lo, hi],
        }
    }
}

/// Relative date keywords. They are resolved by the store at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
}

impl Builtin {
    pub const ALL: [Builtin; 8] = [
        Builtin::Today,
        Builtin::Yesterday,
        Builtin::ThisWeek,
        Builtin::LastWeek,
        Builtin::ThisMonth,
        Builtin::LastMonth,
        Builtin::ThisYear,
        Builtin::LastYear,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Builtin::Today => "today",
            Builtin::Yesterday => "yesterday",
            Builtin::ThisWeek => "thisweek",
            Builtin::LastWeek => "lastweek",
            Builtin::ThisMonth => "thismonth",
            Builtin::LastMonth => "lastmonth",
            Builtin::ThisYear => "thisyear",
            Builtin::LastYear => "lastyear",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Builtin> {
        let s = s.trim().to_ascii_lowercase();
        Builtin::ALL.into_iter().find(|b| b.keyword() == s)
    }

    /// Single-day keywords compare by equality; the rest cover a period.
    pub fn is_single_day(&self) -> bool {
        matches!(self, Builtin::Today | Builtin::Yesterday)
    }

    /// SQLite date modifiers that move `'now'` to the first day of the period.
    /// Weeks run Monday to Sunday, matching `strftime('%W')`.
    pub fn start_modifiers(&self) -> &'static [&'static str] {
        match self {
            Builtin::Today => &[],
            Builtin::Yesterday => &["-1 day"],
            Builtin::ThisWeek => &["-6 days", "weekday 1"],
            Builtin::LastWeek => &["-13 days", "weekday 1"],
            Builtin::ThisMonth => &["start of month"],
            Builtin::LastMonth => &["start of month", "-1 month"],
            Builtin::ThisYear => &["start of year"],
            Builtin::LastYear => &["start of year", "-1 year"],
        }
    }

    /// SQLite date modifiers that move `'now'` to the last day of the period.
    pub fn end_modifiers(&self) -> &'static [&'static str] {
        match self {
            Builtin::Today => &[],
            Builtin::Yesterday => &["-1 day"],
            Builtin::ThisWeek => &["weekday 0"],
            Builtin::LastWeek => &["-7 days", "weekday 0"],
            Builtin::ThisMonth => &["start of month", "+1 month", "-1 day"],
            Builtin::LastMonth => &["start of month", "-1 day"],
            Builtin::ThisYear => &["start of year", "+1 year", "-1 day"],
            Builtin::LastYear => &["start of year", "-1 day"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Day(NaiveDate),
    PeriodStart(Builtin),
    PeriodEnd(Builtin),
}

pub type DateExpr = Comparison<DateBound>;
pub type AmountExpr = Comparison<Decimal>;

/// Splits a token on the range separator without interpreting the endpoints.
///
/// Returns `None` when the separator is misplaced: repeated, or with no
/// endpoint on either side.
pub fn split_range(raw: &str) -> Option<Comparison<&str>> {
    let raw = raw.trim();
    let Some((lo, hi)) = raw.split_once(RANGE_SEPARATOR) else {
        return Some(Comparison::Eq(raw));
    };
    if hi.contains(RANGE_SEPARATOR) {
        return None;
    }
    match (lo.trim(), hi.trim()) {
        ("", "") => None,
        ("", hi) => Some(Comparison::AtMost(hi)),
        (lo, "") => Some(Comparison::AtLeast(lo)),
        (lo, hi) => Some(Comparison::Between(lo, hi)),
    }
}

pub fn pad_date(date: &str) -> String {
    SINGLE_DIGIT.replace_all(date, "0$1").into_owned()
}

/// Canonical spelling of a scalar date: the keyword for builtins,
/// `YYYY-MM-DD` otherwise.
pub fn normalize_date(raw: &str) -> Result<String, ValidationError> {
    if let Some(b) = Builtin::from_keyword(raw) {
        return Ok(b.keyword().to_string());
    }
    parse_calendar_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let normalized = pad_date(&raw.trim().replace('/', "-"));
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
        .ok_or_else(|| ValidationError::DateSyntax(raw.to_string()))
}

enum Edge {
    Lower,
    Upper,
}

fn date_bound(raw: &str, edge: Edge) -> Result<DateBound, ValidationError> {
    if let Some(b) = Builtin::from_keyword(raw) {
        return Ok(match edge {
            Edge::Lower => DateBound::PeriodStart(b),
            Edge::Upper => DateBound::PeriodEnd(b),
        });
    }
    parse_calendar_date(raw).map(DateBound::Day)
}

pub fn parse_date_expr(raw: &str) -> Result<DateExpr, ValidationError> {
    let shape =
        split_range(raw).ok_or_else(|| ValidationError::DateRangeSyntax(raw.to_string()))?;
    let expr = match shape {
        Comparison::Eq(s) => match Builtin::from_keyword(s) {
            Some(b) if b.is_single_day() => Comparison::Eq(DateBound::PeriodStart(b)),
            Some(b) => Comparison::Between(DateBound::PeriodStart(b), DateBound::PeriodEnd(b)),
            None => Comparison::Eq(DateBound::Day(parse_calendar_date(s)?)),
        },
        Comparison::AtMost(s) => Comparison::AtMost(date_bound(s, Edge::Upper)?),
        Comparison::AtLeast(s) => Comparison::AtLeast(date_bound(s, Edge::Lower)?),
        Comparison::Between(lo, hi) => {
            let lo = date_bound(lo, Edge::Lower)?;
            let hi = date_bound(hi, Edge::Upper)?;
            if let (DateBound::Day(a), DateBound::Day(b)) = (lo, hi) {
                if a > b {
                    tracing::warn!(%a, %b, "date range is reversed and will match nothing");
                }
            }
            Comparison::Between(lo, hi)
        }
    };
    Ok(expr)
}

pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let s = raw.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| ValidationError::AmountSyntax(raw.to_string()))
}

pub fn parse_amount_expr(raw: &str) -> Result<AmountExpr, ValidationError> {
    let shape =
        split_range(raw).ok_or_else(|| ValidationError::AmountRangeSyntax(raw.to_string()))?;
    let expr = match shape {
        Comparison::Eq(s) => Comparison::Eq(parse_amount(s)?),
        Comparison::AtMost(s) => Comparison::AtMost(parse_amount(s)?),
        Comparison::AtLeast(s) => Comparison::AtLeast(parse_amount(s)?),
        Comparison::Between(lo, hi) => {
            let (lo, hi) = (parse_amount(lo)?, parse_amount(hi)?);
            if lo > hi {
                tracing::warn!(%lo, %hi, "amount range is reversed and will match nothing");
            }
            Comparison::Between(lo, hi)
        }
    };
    Ok(expr)
}
