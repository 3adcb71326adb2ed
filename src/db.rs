// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LedgerError;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Ledgerclip", "ledgerclip"));

pub const DB_FILE: &str = "ledgerclip.sqlite";
pub const MARKER_FILE: &str = ".initialized";

pub fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE)
}

pub fn is_initialized(data_dir: &Path) -> bool {
    data_dir.join(MARKER_FILE).is_file()
}

/// First-run setup: data dir, database file, schema, then the marker.
pub fn init(data_dir: &Path) -> Result<PathBuf> {
    if is_initialized(data_dir) {
        return Err(LedgerError::AlreadyInitialized.into());
    }
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;
    let path = db_path(data_dir);
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn).context("Failed to initialize database schema")?;
    fs::write(data_dir.join(MARKER_FILE), b"")
        .with_context(|| format!("Failed to create init marker in {}", data_dir.display()))?;
    tracing::info!(path = %path.display(), "database initialized");
    Ok(path)
}

/// Opens the ledger of an initialized data dir. The handle is shared by every
/// operation of the invocation.
pub fn open(data_dir: &Path) -> Result<Connection> {
    if !is_initialized(data_dir) {
        return Err(LedgerError::NotInitialized.into());
    }
    let path = db_path(data_dir);
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "database opened");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        description TEXT NOT NULL,
        amount TEXT NOT NULL, -- exact decimal text
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_created_at ON transactions(created_at);
    "#,
    )
}
