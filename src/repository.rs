// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt::Display;

use rusqlite::types::Type;
use rusqlite::{Connection, Row, params, params_from_iter};
use rust_decimal::Decimal;

use crate::error::LedgerResult;
use crate::filter::{DeleteConfig, DeleteTarget, FilterConfig};
use crate::models::{Column, NewTransaction, Transaction};
use crate::query::{self, Query};

const DELETE_ALL: &str = "DELETE FROM transactions";
const RESET_SEQUENCE: &str = "DELETE FROM sqlite_sequence WHERE name = 'transactions'";

pub trait Repository {
    /// Inserts a transaction and returns the id the store assigned to it.
    fn create(&self, tx: &NewTransaction) -> LedgerResult<i64>;
    fn list(&self, config: &FilterConfig) -> LedgerResult<Vec<Transaction>>;
    fn count(&self, config: &FilterConfig) -> LedgerResult<u64>;
    /// Returns the number of rows removed. Ids that do not exist are ignored.
    fn delete(&self, config: &DeleteConfig) -> LedgerResult<usize>;
}

pub struct SqliteRepository<'c> {
    conn: &'c Connection,
    echo: Box<dyn Fn(&str) + 'c>,
}

impl<'c> SqliteRepository<'c> {
    /// Verbose query echoes go to stderr.
    pub fn new(conn: &'c Connection) -> Self {
        Self::with_echo(conn, |line| eprintln!("{}", line))
    }

    pub fn with_echo(conn: &'c Connection, echo: impl Fn(&str) + 'c) -> Self {
        Self {
            conn,
            echo: Box::new(echo),
        }
    }

    fn show(&self, verbose: bool, label: &str, statement: &dyn Display) {
        tracing::debug!(%statement, "{} query", label.to_lowercase());
        if verbose {
            (self.echo)(&format!("{} => {}", label, statement));
        }
    }

    fn delete_all(&self) -> LedgerResult<usize> {
        // VACUUM cannot run inside a transaction, so it follows the commit.
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute(DELETE_ALL, [])?;
        tx.execute(RESET_SEQUENCE, [])?;
        tx.commit()?;
        self.conn.execute_batch("VACUUM")?;
        Ok(removed)
    }
}

impl Repository for SqliteRepository<'_> {
    fn create(&self, tx: &NewTransaction) -> LedgerResult<i64> {
        self.conn.execute(
            "INSERT INTO transactions(type, description, amount) VALUES (?1, ?2, ?3)",
            params![tx.kind, tx.description, tx.amount.to_string()],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, kind = %tx.kind, amount = %tx.amount, "transaction created");
        Ok(id)
    }

    fn list(&self, config: &FilterConfig) -> LedgerResult<Vec<Transaction>> {
        let query = query::select(config);
        self.show(config.verbose, "SELECT", &query);
        if config.dry_run {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(&query.sql)?;
        let rows = stmt.query_map(params_from_iter(query.params.iter()), |r| {
            map_row(r, query.projection.as_deref())
        })?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    fn count(&self, config: &FilterConfig) -> LedgerResult<u64> {
        let query = query::count(config);
        self.show(config.verbose, "COUNT", &query);
        if config.dry_run {
            return Ok(0);
        }
        let n: i64 =
            self.conn
                .query_row(&query.sql, params_from_iter(query.params.iter()), |r| r.get(0))?;
        Ok(u64::try_from(n).unwrap_or_default())
    }

    fn delete(&self, config: &DeleteConfig) -> LedgerResult<usize> {
        let removed = match &config.target {
            DeleteTarget::All => {
                self.show(config.verbose, "DELETE", &DELETE_ALL);
                if config.dry_run {
                    return Ok(0);
                }
                self.delete_all()?
            }
            DeleteTarget::Ids(ids) => {
                if ids.is_empty() {
                    return Ok(0);
                }
                let query = query::delete_by_ids(ids);
                self.show(config.verbose, "DELETE", &query);
                if config.dry_run {
                    return Ok(0);
                }
                self.conn
                    .execute(&query.sql, params_from_iter(query.params.iter()))?
            }
        };
        tracing::info!(removed, "transactions deleted");
        Ok(removed)
    }
}

fn map_row(r: &Row<'_>, projection: Option<&[Column]>) -> rusqlite::Result<Transaction> {
    let mut tx = Transaction::default();
    for col in projection.unwrap_or(&Column::ALL) {
        let field = col.field();
        match col {
            Column::Id => tx.id = r.get(field)?,
            Column::Type => tx.kind = r.get(field)?,
            Column::Amount => tx.amount = decimal(r, field)?,
            Column::Description => tx.description = r.get(field)?,
            Column::Date => tx.created_at = r.get(field)?,
        }
    }
    if projection.is_none() {
        tx.updated_at = r.get("updated_at")?;
    }
    Ok(tx)
}

fn decimal(r: &Row<'_>, field: &str) -> rusqlite::Result<Decimal> {
    let raw: String = r.get(field)?;
    raw.trim().parse::<Decimal>().map_err(|e| {
        let idx = r.as_ref().column_index(field).unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}
