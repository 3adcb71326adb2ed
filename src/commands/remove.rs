// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::{DeleteConfig, DeleteTarget};
use crate::repository::{Repository, SqliteRepository};
use crate::utils::confirm;
use anyhow::Result;
use rusqlite::Connection;
use std::io;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let config = delete_config(sub)?;
    if !config.dry_run && !sub.get_flag("yes") {
        let question = match &config.target {
            DeleteTarget::All => "Remove ALL transactions? This cannot be undone".to_string(),
            DeleteTarget::Ids(ids) => format!("Remove {} transaction(s)?", ids.len()),
        };
        if !confirm(&mut io::stdin().lock(), &mut io::stdout(), &question)? {
            println!("Aborted");
            return Ok(());
        }
    }
    let removed = SqliteRepository::new(conn).delete(&config)?;
    if !config.dry_run {
        println!("Removed {} transaction(s)", removed);
    }
    Ok(())
}

pub fn delete_config(sub: &clap::ArgMatches) -> Result<DeleteConfig> {
    let ids: Vec<String> = sub
        .get_many::<String>("id")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let config = DeleteConfig::new(
        sub.get_flag("all"),
        &ids,
        sub.get_flag("dry"),
        sub.get_flag("verbose"),
    )?;
    tracing::debug!(?config, "delete request");
    Ok(config)
}
