// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Compiles a [`FilterConfig`] into SQL plus bound parameters.
//!
//! User supplied values only ever travel as parameters. The SQL text is made
//! of fixed fragments: field names from [`Column::field`] and the date
//! modifiers of [`crate::expr::Builtin`].

use std::fmt;

use rusqlite::types::Value;

use crate::expr::{AmountExpr, Comparison, DateBound, DateExpr};
use crate::filter::FilterConfig;
use crate::models::{Column, SortKey};

const TABLE: &str = "transactions";
const FULL_ROW: &str = "id, type, description, amount, created_at, updated_at";
const DATE_FIELD: &str = "DATE(created_at)";
const AMOUNT_FIELD: &str = "CAST(amount AS REAL)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Rows,
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub params: Vec<Value>,
    /// Columns selected by a projected row query. `None` means the full row
    /// (or a count).
    pub projection: Option<Vec<Column>>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)?;
        if self.params.is_empty() {
            return Ok(());
        }
        let params: Vec<String> = self.params.iter().map(display_value).collect();
        write!(f, " [{}]", params.join(", "))
    }
}

fn display_value(v: &Value) -> String {
    match v {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Text(s) => format!("'{}'", s),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

struct Builder {
    sql: String,
    params: Vec<Value>,
    has_predicate: bool,
}

impl Builder {
    fn new(head: String) -> Self {
        Self {
            sql: head,
            params: Vec::new(),
            has_predicate: false,
        }
    }

    fn predicate(&mut self, clause: &str) {
        let joiner = if self.has_predicate { " AND " } else { " WHERE " };
        self.sql.push_str(joiner);
        self.sql.push_str(clause);
        self.has_predicate = true;
    }

    fn bind(&mut self, v: impl Into<Value>) -> &'static str {
        self.params.push(v.into());
        "?"
    }

    fn finish(self, projection: Option<Vec<Column>>) -> Query {
        Query {
            sql: self.sql,
            params: self.params,
            projection,
        }
    }
}

pub fn compile(config: &FilterConfig, variant: Variant) -> Query {
    match variant {
        Variant::Rows => select(config),
        Variant::Count => count(config),
    }
}

pub fn select(config: &FilterConfig) -> Query {
    let projection = projection(&config.columns);
    let fields = match &projection {
        Some(cols) => cols.iter().map(Column::field).collect::<Vec<_>>().join(", "),
        None => FULL_ROW.to_string(),
    };
    let mut b = Builder::new(format!("SELECT {} FROM {}", fields, TABLE));
    predicates(&mut b, config);

    if let Some(key) = config.sort {
        let field = match key {
            SortKey::Date => "created_at",
            SortKey::Amount => AMOUNT_FIELD,
        };
        let dir = if config.ascending { "ASC" } else { "DESC" };
        b.sql.push_str(&format!(" ORDER BY {field} {dir}, id {dir}"));
    }

    if !config.all {
        let limit = b.bind(i64::from(config.limit));
        let offset = b.bind(i64::try_from(config.offset()).unwrap_or(i64::MAX));
        b.sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
    }
    b.finish(projection)
}

pub fn count(config: &FilterConfig) -> Query {
    let mut b = Builder::new(format!("SELECT COUNT(*) FROM {}", TABLE));
    predicates(&mut b, config);
    b.finish(None)
}

fn projection(columns: &[Column]) -> Option<Vec<Column>> {
    let mut cols: Vec<Column> = Vec::new();
    for c in columns {
        if !cols.contains(c) {
            cols.push(*c);
        }
    }
    (!cols.is_empty()).then_some(cols)
}

fn predicates(b: &mut Builder, config: &FilterConfig) {
    if let Some(kind) = config.kind {
        let p = b.bind(kind.as_str().to_string());
        b.predicate(&format!("type = {p}"));
    }
    if let Some(date) = &config.date {
        let clause = date_clause(b, date);
        b.predicate(&clause);
    }
    if let Some(amount) = &config.amount {
        let clause = amount_clause(b, amount);
        b.predicate(&clause);
    }
    if let Some(desc) = &config.description {
        let p = b.bind(format!("%{}%", escape_like(desc)));
        b.predicate(&format!("description LIKE {p} ESCAPE '\\'"));
    }
}

fn comparison_clause(field: &str, cmp: &Comparison<String>) -> String {
    match cmp {
        Comparison::Between(lo, hi) => format!("{field} BETWEEN {lo} AND {hi}"),
        Comparison::Eq(v) | Comparison::AtMost(v) | Comparison::AtLeast(v) => {
            format!("{field} {} {v}", cmp.operator())
        }
    }
}

fn map_comparison<T>(cmp: &Comparison<T>, mut f: impl FnMut(&T) -> String) -> Comparison<String> {
    match cmp {
        Comparison::Eq(v) => Comparison::Eq(f(v)),
        Comparison::AtMost(v) => Comparison::AtMost(f(v)),
        Comparison::AtLeast(v) => Comparison::AtLeast(f(v)),
        Comparison::Between(lo, hi) => {
            let lo = f(lo);
            Comparison::Between(lo, f(hi))
        }
    }
}

fn date_clause(b: &mut Builder, expr: &DateExpr) -> String {
    let rendered = map_comparison(expr, |bound| match bound {
        DateBound::Day(d) => format!("DATE({})", b.bind(d.format("%Y-%m-%d").to_string())),
        DateBound::PeriodStart(builtin) => relative_date(builtin.start_modifiers()),
        DateBound::PeriodEnd(builtin) => relative_date(builtin.end_modifiers()),
    });
    comparison_clause(DATE_FIELD, &rendered)
}

fn relative_date(modifiers: &[&str]) -> String {
    let mut sql = String::from("DATE('now'");
    for m in modifiers {
        sql.push_str(&format!(", '{m}'"));
    }
    sql.push(')');
    sql
}

fn amount_clause(b: &mut Builder, expr: &AmountExpr) -> String {
    let rendered = map_comparison(expr, |amt| format!("CAST({} AS REAL)", b.bind(amt.to_string())));
    comparison_clause(AMOUNT_FIELD, &rendered)
}

/// Escapes LIKE wildcards so the description matches as a plain substring.
pub fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

pub fn delete_by_ids(ids: &[i64]) -> Query {
    let mut b = Builder::new(format!("DELETE FROM {}", TABLE));
    let placeholders: Vec<&str> = ids.iter().map(|id| b.bind(*id)).collect();
    b.predicate(&format!("id IN ({})", placeholders.join(", ")));
    b.finish(None)
}
