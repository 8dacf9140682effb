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

//! Read-only reports over a sequence of transactions.
//!
//! Every function here borrows the sequence and returns new values; none of
//! them reorder or modify the input. Filtering functions keep the original
//! relative order of the records they return.

use crate::TransactionError;
use crate::transaction::{Transaction, TransactionKind};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Income and expense sums across a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl Totals {
    /// Income minus expenses.
    ///
    /// # Errors
    ///
    /// [`TransactionError::AmountOverflow`] if the difference is out of range.
    pub fn balance(&self) -> Result<Decimal, TransactionError> {
        self.income
            .checked_sub(self.expenses)
            .ok_or(TransactionError::AmountOverflow)
    }
}

/// Sums income and expense amounts.
///
/// # Errors
///
/// [`TransactionError::AmountOverflow`] if either sum is out of range.
pub fn totals(transactions: &[Transaction]) -> Result<Totals, TransactionError> {
    transactions.iter().try_fold(Totals::default(), |mut totals, tx| {
        let sum = match tx.kind() {
            TransactionKind::Income => &mut totals.income,
            TransactionKind::Expense => &mut totals.expenses,
        };
        *sum = checked_sum(*sum, tx.amount())?;
        Ok(totals)
    })
}

/// Cumulative income minus cumulative expenses.
pub fn balance(transactions: &[Transaction]) -> Result<Decimal, TransactionError> {
    totals(transactions)?.balance()
}

/// Case-insensitive substring match on description or category.
///
/// An empty query matches every record.
pub fn search<'a>(transactions: &'a [Transaction], query: &str) -> Vec<&'a Transaction> {
    let query = query.to_lowercase();
    transactions
        .iter()
        .filter(|tx| {
            tx.description().to_lowercase().contains(&query)
                || tx.category().to_lowercase().contains(&query)
        })
        .collect()
}

/// Records of `kind` whose amount is at least `min_amount`.
pub fn filter_by_amount(
    transactions: &[Transaction],
    min_amount: Decimal,
    kind: TransactionKind,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.kind() == kind && tx.amount() >= min_amount)
        .collect()
}

/// Expense totals per calendar month, keyed `YYYY-MM` in ascending order.
///
/// # Errors
///
/// [`TransactionError::AmountOverflow`] if a month's total is out of range.
pub fn monthly_spending(
    transactions: &[Transaction],
) -> Result<BTreeMap<String, Decimal>, TransactionError> {
    let mut months = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        let total = months.entry(tx.month()).or_insert(Decimal::ZERO);
        *total = checked_sum(*total, tx.amount())?;
    }
    Ok(months)
}

fn checked_sum(total: Decimal, amount: Decimal) -> Result<Decimal, TransactionError> {
    total
        .checked_add(amount)
        .ok_or(TransactionError::AmountOverflow)
}
