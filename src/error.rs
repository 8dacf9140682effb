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

//! Error types for transaction input and persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Input validation errors.
///
/// These are raised while turning raw user text into typed values. They never
/// leave the store in a modified state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// Amount text is not a number
    #[error("invalid amount '{0}' (expected a number)")]
    InvalidAmount(String),

    /// Date text is not a valid YYYY-MM-DD calendar date
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Transaction type is neither income nor expense
    #[error("invalid type '{0}' (expected income or expense)")]
    InvalidKind(String),

    /// A running total no longer fits in the decimal range
    #[error("amount total is out of range")]
    AmountOverflow,

    /// Sort field is not one of the supported keys
    #[error(
        "cannot sort by key '{0}' (valid keys are date, amount, type, category, description)"
    )]
    InvalidSortKey(String),
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The data file could not be read or written
    #[error("i/o error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file exists but its contents cannot be decoded
    #[error("corrupt data file '{}': {source}", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A transaction was rejected before reaching the store
    #[error(transparent)]
    Invalid(#[from] TransactionError),
}
