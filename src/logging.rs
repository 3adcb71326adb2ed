// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LEDGERCLIP_LOG";

pub fn level(verbose: bool, trace: bool) -> &'static str {
    if trace {
        "trace"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Logs go to stderr so that json/csv output on stdout stays clean.
/// `LEDGERCLIP_LOG` takes precedence over the command line flags.
pub fn init(verbose: bool, trace: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("ledgerclip={}", level(verbose, trace))));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
