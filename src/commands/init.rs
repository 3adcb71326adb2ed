// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;

use crate::db;
use crate::error::LedgerError;

pub fn handle(data_dir: &Path) -> Result<()> {
    match db::init(data_dir) {
        Ok(path) => println!("Database initialized at {}", path.display()),
        Err(err) => match err.downcast_ref::<LedgerError>() {
            Some(LedgerError::AlreadyInitialized) => println!("{}", err),
            _ => return Err(err),
        },
    }
    Ok(())
}
