// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub const DATE_SYNTAX: &str = "invalid date syntax. date must be in a valid format or one of the builtins like today, yesterday";
pub const DATE_RANGE_SYNTAX: &str =
    "invalid date range syntax. must be one of the following: :date, date:, date:date";
pub const AMOUNT_SYNTAX: &str = "invalid amount syntax. amount must be a number";
pub const AMOUNT_RANGE_SYNTAX: &str =
    "invalid amount range syntax. must be one of the following: :amount, amount:, amount:amount";

/// Rejections raised while turning user input into a filter or payload.
///
/// These are always produced before the store is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} (got '{}')", DATE_SYNTAX, .0)]
    DateSyntax(String),
    #[error("{} (got '{}')", DATE_RANGE_SYNTAX, .0)]
    DateRangeSyntax(String),
    #[error("{} (got '{}')", AMOUNT_SYNTAX, .0)]
    AmountSyntax(String),
    #[error("{} (got '{}')", AMOUNT_RANGE_SYNTAX, .0)]
    AmountRangeSyntax(String),
    #[error("invalid type '{0}'. type must be either income or expense")]
    InvalidKind(String),
    #[error("invalid page number {0}. page number must be greater than 0")]
    InvalidPage(i64),
    #[error("invalid limit {0}. limit must be greater than 0")]
    InvalidLimit(i64),
    #[error("invalid sort '{0}'. sort must be either 'date' or 'amt'")]
    InvalidSort(String),
    #[error("invalid amount '{0}'. amount must be greater than 0")]
    NonPositiveAmount(String),
    #[error("invalid transaction id '{0}'")]
    InvalidId(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("ledgerclip has not been initialized. Run 'ledgerclip init' first")]
    NotInitialized,
    #[error("ledgerclip has already been initialized")]
    AlreadyInitialized,
}

pub type LedgerResult<T> = Result<T, LedgerError>;
