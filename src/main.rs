// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use ledgerclip::{cli, commands, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_flag("verbose"), matches.get_flag("trace"));

    let data_dir = match matches.get_one::<PathBuf>("data_dir") {
        Some(dir) => dir.clone(),
        None => db::default_data_dir()?,
    };

    match matches.subcommand() {
        Some(("init", _)) => commands::init::handle(&data_dir)?,
        Some((name, sub)) => {
            if !db::is_initialized(&data_dir) {
                println!(
                    "ledgerclip has not been initialized. Run 'ledgerclip init' to initialize the application"
                );
                return Ok(());
            }
            let conn = db::open(&data_dir)?;
            match name {
                "add" => commands::add::handle(&conn, sub)?,
                "list" => commands::list::handle(&conn, sub)?,
                "rm" => commands::remove::handle(&conn, sub)?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
