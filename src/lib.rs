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

//! # Finance Tracker
//!
//! This library records personal income and expense transactions, keeps them
//! in a CSV data file, and answers questions about them: balance, search,
//! filtering, sorting and a monthly spending chart.
//!
//! ## Core Components
//!
//! - [`Transaction`]: One validated income or expense record
//! - [`Store`]: Owner of the transaction sequence and its data file
//! - [`report`]: Pure queries over a sequence (balance, search, filter, monthly totals)
//! - [`SortKey`]: Sortable fields, each mapped to a comparator
//! - [`SpendingChart`]: Text bar chart of monthly spending
//! - [`Shell`]: Interactive numbered menu driving all of the above
//!
//! ## Example
//!
//! ```no_run
//! use finance_tracker::{Config, Store, TransactionKind};
//! use rust_decimal_macros::dec;
//!
//! let mut store = Store::open(&Config::new("transactions.csv")).unwrap();
//!
//! store.add(TransactionKind::Income, "salary", "1000.00", "2024-01-05", "").unwrap();
//! store.add(TransactionKind::Expense, "rent", "400.00", "2024-01-10", "").unwrap();
//! store.add(TransactionKind::Expense, "food", "50.00", "2024-02-01", "").unwrap();
//!
//! assert_eq!(store.balance().unwrap(), dec!(550.00));
//! assert_eq!(store.monthly_spending().unwrap()["2024-01"], dec!(400.00));
//! ```
//!
//! ## Persistence
//!
//! Every successful add rewrites the whole data file. Sorting reorders the
//! in-memory sequence only. There is no locking: two processes sharing a data
//! file will overwrite each other.

pub mod chart;
pub mod config;
pub mod error;
pub mod report;
pub mod shell;
mod sort;
mod store;
mod transaction;

pub use chart::SpendingChart;
pub use config::Config;
pub use error::{StoreError, TransactionError};
pub use report::Totals;
pub use shell::{MenuChoice, Shell};
pub use sort::{SortKey, SortOrder, sort_transactions};
pub use store::{Store, read_transactions, write_transactions};
pub use transaction::{DATE_FORMAT, Transaction, TransactionKind, parse_amount, parse_date};
