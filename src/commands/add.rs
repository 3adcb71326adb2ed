// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required;
use crate::models::{Kind, NewTransaction};
use crate::repository::{Repository, SqliteRepository};
use crate::utils::parse_positive_amount;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tx = new_transaction(sub)?;
    if sub.get_flag("dry") {
        println!(
            "Dry run: would add {} transaction: {} for {}",
            tx.kind, tx.description, tx.amount
        );
        return Ok(());
    }
    let id = SqliteRepository::new(conn).create(&tx)?;
    println!(
        "Added {} transaction #{}: {} for {}",
        tx.kind, id, tx.description, tx.amount
    );
    Ok(())
}

pub fn new_transaction(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let kind: Kind = required(sub, "type")?.parse()?;
    let description = required(sub, "description")?.trim();
    let amount = parse_positive_amount(required(sub, "amount")?)?;
    Ok(NewTransaction::new(kind, description, amount))
}
