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

//! Transaction records.
//!
//! A [`Transaction`] is built once from validated input and never changes
//! afterwards. Raw user text goes through [`Transaction::parse`], which is the
//! only place amounts and dates are validated.
//!
//! # Example
//!
//! ```
//! use finance_tracker::{Transaction, TransactionKind};
//! use rust_decimal_macros::dec;
//!
//! let rent = Transaction::parse(TransactionKind::Expense, "rent", "400.00", "2024-01-10", "")
//!     .unwrap();
//! assert_eq!(rent.amount(), dec!(400.00));
//! assert_eq!(rent.month(), "2024-01");
//! ```

use crate::TransactionError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar date format used for input, display and storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Capitalised name used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(TransactionError::InvalidKind(s.to_string())),
        }
    }
}

/// One recorded income or expense event.
///
/// Field order matches the columns of the data file:
/// `kind, category, amount, date, description`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    kind: TransactionKind,
    category: String,
    amount: Decimal,
    date: NaiveDate,
    description: String,
}

impl Transaction {
    /// Creates a transaction from already typed values.
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            category: category.into(),
            amount,
            date,
            description: description.into(),
        }
    }

    /// Creates a transaction from raw amount and date text.
    ///
    /// Category and description are accepted as given.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InvalidAmount`] - `amount` is not a number.
    /// - [`TransactionError::InvalidDate`] - `date` is not a `YYYY-MM-DD` calendar date.
    pub fn parse(
        kind: TransactionKind,
        category: &str,
        amount: &str,
        date: &str,
        description: &str,
    ) -> Result<Self, TransactionError> {
        let amount = parse_amount(amount)?;
        let date = parse_date(date)?;
        Ok(Self::new(kind, category, amount, date, description))
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Calendar month of the transaction as `YYYY-MM`.
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// Parses amount text such as `12.50`, `-3` or `1e3`.
///
/// The sign is not checked.
pub fn parse_amount(text: &str) -> Result<Decimal, TransactionError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| TransactionError::InvalidAmount(text.to_string()))
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, TransactionError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| TransactionError::InvalidDate(text.to_string()))
}
