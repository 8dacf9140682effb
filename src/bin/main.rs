// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use finance_tracker::{Config, Shell, Store, config::DEFAULT_DATA_FILE};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Finance Tracker - Record income and expenses from an interactive menu
///
/// Transactions are kept in a CSV data file that is rewritten after every add.
#[derive(Parser, Debug)]
#[command(name = "finance-tracker")]
#[command(about = "An interactive personal finance tracker", long_about = None)]
struct Args {
    /// Path to the CSV data file
    ///
    /// Created on the first add if it does not exist.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_DATA_FILE)]
    file: PathBuf,

    /// Log filter written to stderr (e.g. `info`, `finance_tracker=debug`)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    // Fall back to warn-level logging if the directive does not parse
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log level '{}': {}", args.log_level, e);
        EnvFilter::new("warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::new(args.file);

    // A corrupt data file is not recoverable here
    let store = match Store::open(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error loading transactions: {}", e);
            process::exit(1);
        }
    };
    println!("Loaded {} transaction(s) from '{}'.", store.len(), store.path().display());

    let mut shell = Shell::new(store, io::stdin().lock(), io::stdout());
    if let Err(e) = shell.run() {
        eprintln!("Error reading input: {}", e);
        process::exit(1);
    }
}
