// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, ValidationError};
use crate::expr::{AmountExpr, DateExpr, parse_amount_expr, parse_date_expr};
use crate::models::{Column, Kind, SortKey};

pub const DEFAULT_LIMIT: u32 = 10;

/// Everything a list or count query needs, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub kind: Option<Kind>,
    pub date: Option<DateExpr>,
    pub amount: Option<AmountExpr>,
    pub description: Option<String>,
    pub sort: Option<SortKey>,
    pub ascending: bool,
    pub page: u32,
    pub limit: u32,
    pub all: bool,
    pub columns: Vec<Column>,
    pub dry_run: bool,
    pub verbose: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kind: None,
            date: None,
            amount: None,
            description: None,
            sort: None,
            ascending: false,
            page: 1,
            limit: DEFAULT_LIMIT,
            all: false,
            columns: Vec::new(),
            dry_run: false,
            verbose: false,
        }
    }
}

impl FilterConfig {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Number of pages needed for `total` rows. Zero rows make zero pages
    /// unless the all-rows override is set, which always shows one page.
    pub fn total_pages(&self, total: u64) -> u32 {
        if self.all {
            return 1;
        }
        let pages = total.div_ceil(u64::from(self.limit));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Columns to display: the projection, or every column when none is set.
    pub fn display_columns(&self) -> Vec<Column> {
        if self.columns.is_empty() {
            Column::ALL.to_vec()
        } else {
            self.columns.clone()
        }
    }
}

/// Filter options as they arrive from the command line.
#[derive(Debug, Clone, Default)]
pub struct RawFilter {
    pub kind: Option<String>,
    pub date: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub sort: Option<String>,
    pub ascending: bool,
    pub page: i64,
    pub limit: i64,
    pub all: bool,
    pub columns: Vec<String>,
    pub dry_run: bool,
    pub verbose: bool,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

impl RawFilter {
    pub fn validate(&self) -> Result<FilterConfig, ValidationError> {
        let kind = non_empty(&self.kind).map(str::parse::<Kind>).transpose()?;
        let page = u32::try_from(self.page)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(ValidationError::InvalidPage(self.page))?;
        let limit = u32::try_from(self.limit)
            .ok()
            .filter(|l| *l >= 1)
            .ok_or(ValidationError::InvalidLimit(self.limit))?;
        let date = non_empty(&self.date).map(parse_date_expr).transpose()?;
        let amount = non_empty(&self.amount).map(parse_amount_expr).transpose()?;
        let sort = non_empty(&self.sort).map(str::parse::<SortKey>).transpose()?;

        let mut columns = Vec::new();
        for name in self.columns.iter().flat_map(|c| c.split(',')) {
            match Column::from_name(name) {
                Some(col) => columns.push(col),
                None if name.trim().is_empty() => {}
                None => tracing::warn!(column = name, "ignoring unknown column"),
            }
        }

        Ok(FilterConfig {
            kind,
            date,
            amount,
            description: non_empty(&self.description).map(str::to_string),
            sort,
            ascending: self.ascending,
            page,
            limit,
            all: self.all,
            columns,
            dry_run: self.dry_run,
            verbose: self.verbose,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    All,
    Ids(Vec<i64>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfig {
    pub target: DeleteTarget,
    pub dry_run: bool,
    pub verbose: bool,
}

impl DeleteConfig {
    /// Builds a delete request from the `rm` flags. `all` and `ids` are
    /// mutually exclusive and one of them is required.
    pub fn new(
        all: bool,
        ids: &[String],
        dry_run: bool,
        verbose: bool,
    ) -> Result<Self, LedgerError> {
        let ids = parse_ids(ids)?;
        let target = match (all, ids.is_empty()) {
            (true, false) => {
                return Err(LedgerError::Config(
                    "--all cannot be combined with --id".to_string(),
                ));
            }
            (true, true) => DeleteTarget::All,
            (false, false) => DeleteTarget::Ids(ids),
            (false, true) => {
                return Err(LedgerError::Config(
                    "specify an id with --id or use --all to remove all transactions".to_string(),
                ));
            }
        };
        Ok(Self {
            target,
            dry_run,
            verbose,
        })
    }
}

/// Accepts repeated values as well as comma separated lists (`-i 1 -i 2`,
/// `-i 1,2`).
pub fn parse_ids(raw: &[String]) -> Result<Vec<i64>, ValidationError> {
    let mut ids = Vec::new();
    for part in raw.iter().flat_map(|s| s.split(',')) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id = part
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidId(part.to_string()))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
