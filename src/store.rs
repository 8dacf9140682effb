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

//! Transaction store.
//!
//! The [`Store`] exclusively owns the ordered sequence of transactions and the
//! data file that snapshots it. Every successful [`Store::add`] rewrites the
//! whole file; sorting only reorders the in-memory sequence and is persisted
//! by the next save.
//!
//! # Data file
//!
//! A CSV file with one header row and one row per transaction:
//!
//! ```csv
//! kind,category,amount,date,description
//! income,salary,1000.00,2024-01-05,January pay
//! expense,rent,400.00,2024-01-10,
//! ```
//!
//! Saves go through a uniquely named temporary file in the same directory that
//! is renamed over the target, so an interrupted write leaves the previous
//! snapshot intact.

use crate::config::Config;
use crate::report::{self, Totals};
use crate::sort::{self, SortKey, SortOrder};
use crate::transaction::{Transaction, TransactionKind};
use crate::{StoreError, TransactionError};
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Owner of the transaction sequence and its persisted snapshot.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl Store {
    /// Opens the store described by `config`, loading the data file if present.
    ///
    /// # Errors
    ///
    /// - [`StoreError::CorruptStore`] - The file exists but cannot be decoded.
    /// - [`StoreError::Io`] - The file exists but cannot be read.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let mut store = Self::with_transactions(config, Vec::new());
        store.load()?;
        Ok(store)
    }

    /// Creates a store over `transactions` without touching the disk.
    pub fn with_transactions(config: &Config, transactions: Vec<Transaction>) -> Self {
        Self {
            path: config.data_file().to_path_buf(),
            transactions,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the in-memory sequence with the data file contents.
    ///
    /// A missing file leaves the store empty.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no saved data found, starting empty");
                self.transactions.clear();
                return Ok(());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        self.transactions =
            read_transactions(contents.as_slice()).map_err(|source| StoreError::CorruptStore {
                path: self.path.clone(),
                source,
            })?;
        info!(
            path = %self.path.display(),
            count = self.transactions.len(),
            "data loaded"
        );
        Ok(())
    }

    /// Writes the whole sequence to the data file, replacing its contents.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut contents = Vec::new();
        write_transactions(&self.transactions, &mut contents).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e.into(),
        })?;

        // Write-then-rename so a failed write never truncates the last snapshot.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        temp.write_all(&contents).map_err(|source| StoreError::Io {
            path: temp.path().to_path_buf(),
            source,
        })?;
        temp.persist(&self.path).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e.error,
        })?;

        info!(
            path = %self.path.display(),
            count = self.transactions.len(),
            "data saved"
        );
        Ok(())
    }

    /// Validates raw input, appends the new transaction and saves.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Invalid`] - `amount` or `date` failed validation, or the
    ///   amount would push a total out of range.
    /// - [`StoreError::Io`] - The save failed.
    ///
    /// The sequence is unchanged on every error.
    pub fn add(
        &mut self,
        kind: TransactionKind,
        category: &str,
        amount: &str,
        date: &str,
        description: &str,
    ) -> Result<&Transaction, StoreError> {
        let transaction = Transaction::parse(kind, category, amount, date, description)?;
        self.push(transaction)
    }

    /// Appends an already validated transaction and saves.
    ///
    /// The transaction is rolled back if the reports can no longer total the
    /// sequence or the save fails.
    pub fn push(&mut self, transaction: Transaction) -> Result<&Transaction, StoreError> {
        debug!(
            kind = %transaction.kind(),
            category = transaction.category(),
            amount = %transaction.amount(),
            "adding transaction"
        );
        let amount = transaction.amount();
        self.transactions.push(transaction);

        if let Err(e) = self.check_totals() {
            self.transactions.pop();
            warn!(error = %e, %amount, "amount rejected, totals out of range");
            return Err(TransactionError::InvalidAmount(amount.to_string()).into());
        }
        if let Err(e) = self.save() {
            self.transactions.pop();
            return Err(e);
        }
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    fn check_totals(&self) -> Result<(), TransactionError> {
        report::balance(&self.transactions)?;
        report::monthly_spending(&self.transactions)?;
        Ok(())
    }

    /// Reorders the sequence in place. Not persisted until the next save.
    pub fn sort(&mut self, key: SortKey, order: SortOrder) {
        sort::sort_transactions(&mut self.transactions, key, order);
        debug!(%key, ?order, "transactions sorted");
    }

    /// Parses `key` and sorts by it.
    ///
    /// # Errors
    ///
    /// [`TransactionError::InvalidSortKey`] if `key` is not a sortable field;
    /// the order is left unchanged.
    pub fn sort_by_name(&mut self, key: &str, order: SortOrder) -> Result<(), TransactionError> {
        let key = key.parse::<SortKey>()?;
        self.sort(key, order);
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn totals(&self) -> Result<Totals, TransactionError> {
        report::totals(&self.transactions)
    }

    pub fn balance(&self) -> Result<Decimal, TransactionError> {
        report::balance(&self.transactions)
    }

    pub fn search(&self, query: &str) -> Vec<&Transaction> {
        report::search(&self.transactions, query)
    }

    pub fn filter_by_amount(&self, min_amount: Decimal, kind: TransactionKind) -> Vec<&Transaction> {
        report::filter_by_amount(&self.transactions, min_amount, kind)
    }

    pub fn monthly_spending(&self) -> Result<BTreeMap<String, Decimal>, TransactionError> {
        report::monthly_spending(&self.transactions)
    }
}

/// Decodes every row of a data file.
///
/// # Errors
///
/// Returns a CSV error on the first row that does not match the schema.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>, csv::Error> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    rdr.deserialize::<Transaction>().collect()
}

/// Encodes `transactions` as a data file, header first.
pub fn write_transactions<W: Write>(transactions: &[Transaction], writer: W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);

    for transaction in transactions {
        wtr.serialize(transaction)?;
    }

    // An empty sequence still gets a header row.
    if transactions.is_empty() {
        wtr.write_record(["kind", "category", "amount", "date", "description"])?;
    }

    wtr.flush()?;
    Ok(())
}
