// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::ToSql;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    #[default]
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(ValidationError::InvalidKind(other.to_string())),
        }
    }
}

impl ToSql for Kind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Kind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored ledger row.
///
/// When a list query projects a subset of columns, the fields that were not
/// selected keep their `Default` value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub description: String,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: Kind,
    pub description: String,
    pub amount: Decimal,
}

impl NewTransaction {
    pub fn new(kind: Kind, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            kind,
            description: description.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Amount,
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "date" => Ok(SortKey::Date),
            "amt" => Ok(SortKey::Amount),
            other => Err(ValidationError::InvalidSort(other.to_string())),
        }
    }
}

/// Displayable columns, in the order the table renderer shows them by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Type,
    Amount,
    Description,
    Date,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Id,
        Column::Type,
        Column::Amount,
        Column::Description,
        Column::Date,
    ];

    /// Name accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Type => "type",
            Column::Amount => "amt",
            Column::Description => "desc",
            Column::Date => "date",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name.trim())
    }

    /// Column name in the `transactions` table.
    pub fn field(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Type => "type",
            Column::Amount => "amount",
            Column::Description => "description",
            Column::Date => "created_at",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::Id => "#",
            Column::Type => "Type",
            Column::Amount => "Amt",
            Column::Description => "Desc",
            Column::Date => "Date",
        }
    }
}
