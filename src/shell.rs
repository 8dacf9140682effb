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

//! Interactive menu loop.
//!
//! The [`Shell`] reads one line per prompt from any [`BufRead`] and writes to
//! any [`Write`], so the same loop drives a terminal or an in-memory script.
//! Input errors are reported and the loop keeps going; only the exit choice
//! (or end of input) stops it.

use crate::chart::SpendingChart;
use crate::sort::{SortKey, SortOrder};
use crate::store::Store;
use crate::transaction::{Transaction, TransactionKind, parse_amount};
use crate::{StoreError, TransactionError};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{info, warn};

const MENU: &str = "\n--- Personal Finance Tracker Menu ---
1. Add a new transaction
2. View all transactions
3. Get current balance
4. Search for transactions
5. Filter expenses over a certain amount
6. Sort transactions
7. View monthly spending chart
8. Exit";

/// One entry of the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    ViewAll,
    Balance,
    Search,
    FilterExpenses,
    Sort,
    Chart,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Add),
            "2" => Ok(Self::ViewAll),
            "3" => Ok(Self::Balance),
            "4" => Ok(Self::Search),
            "5" => Ok(Self::FilterExpenses),
            "6" => Ok(Self::Sort),
            "7" => Ok(Self::Chart),
            "8" => Ok(Self::Exit),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu-driven front end over a [`Store`].
pub struct Shell<R, W> {
    store: Store,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Consumes the shell, returning the store and the output sink.
    pub fn into_parts(self) -> (Store, W) {
        (self.store, self.output)
    }

    /// Runs the menu loop until the exit choice or end of input.
    ///
    /// # Errors
    ///
    /// Only terminal I/O failures end the loop with an error.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                info!("end of input, leaving menu");
                return Ok(());
            };

            let flow = match line.parse::<MenuChoice>() {
                Ok(choice) => self.dispatch(choice)?,
                Err(other) => {
                    warn!(choice = %other, "unknown menu choice");
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::ViewAll => self.view_all().map(|_| Flow::Continue),
            MenuChoice::Balance => self.balance().map(|_| Flow::Continue),
            MenuChoice::Search => self.search(),
            MenuChoice::FilterExpenses => self.filter_expenses(),
            MenuChoice::Sort => self.sort(),
            MenuChoice::Chart => self.chart().map(|_| Flow::Continue),
            MenuChoice::Exit => {
                writeln!(self.output, "Exiting. Goodbye!")?;
                Ok(Flow::Exit)
            }
        }
    }

    /// Writes `message` and reads one line without its line terminator.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn add(&mut self) -> io::Result<Flow> {
        let Some(kind) = self.prompt("Enter type (income/expense): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(Flow::Exit);
        };

        let result = kind
            .parse::<TransactionKind>()
            .map_err(StoreError::from)
            .and_then(|kind| {
                self.store
                    .add(kind, &category, &amount, &date, &description)
                    .map(|_| ())
            });

        match result {
            Ok(()) => writeln!(self.output, "Transaction added and saved.")?,
            Err(StoreError::Invalid(e)) => {
                warn!(error = %e, "transaction rejected");
                writeln!(
                    self.output,
                    "Error adding transaction: {e}. Ensure amount is a number and date is in YYYY-MM-DD format."
                )?;
            }
            Err(e) => {
                warn!(error = %e, "transaction not saved");
                writeln!(self.output, "Error saving transaction, nothing was added: {e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn view_all(&mut self) -> io::Result<()> {
        if self.store.is_empty() {
            return writeln!(self.output, "No transactions to display.");
        }

        writeln!(self.output, "\n--- All Transactions ---")?;
        for (i, tx) in self.store.transactions().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, listing_line(tx))?;
        }
        Ok(())
    }

    fn balance(&mut self) -> io::Result<()> {
        let (totals, balance) = match self.store.totals().and_then(|t| Ok((t, t.balance()?))) {
            Ok(pair) => pair,
            Err(e) => return self.report_error(e),
        };
        writeln!(self.output, "\nYour current balance is: ${balance:.2}")?;
        writeln!(
            self.output,
            "Income: ${:.2} | Expenses: ${:.2}",
            totals.income, totals.expenses
        )
    }

    fn search(&mut self) -> io::Result<Flow> {
        let Some(query) = self.prompt("Enter search query (e.g., 'rent', 'groceries'): ")? else {
            return Ok(Flow::Exit);
        };

        let results = self.store.search(&query);
        if results.is_empty() {
            writeln!(self.output, "No transactions found matching your query.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\n--- Search Results ---")?;
        for tx in results {
            writeln!(
                self.output,
                "Type: {}, Amount: ${:.2}, Desc: {}",
                tx.kind().label(),
                tx.amount(),
                tx.description()
            )?;
        }
        Ok(Flow::Continue)
    }

    fn filter_expenses(&mut self) -> io::Result<Flow> {
        let Some(text) = self.prompt("Enter minimum amount to filter expenses by: ")? else {
            return Ok(Flow::Exit);
        };

        let min_amount = match parse_amount(&text) {
            Ok(amount) => amount,
            Err(e) => {
                warn!(error = %e, "filter amount rejected");
                writeln!(self.output, "Invalid amount. Please enter a number.")?;
                return Ok(Flow::Continue);
            }
        };

        let expenses = self
            .store
            .filter_by_amount(min_amount, TransactionKind::Expense);
        if expenses.is_empty() {
            writeln!(self.output, "No expenses found above that amount.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\n--- Expenses over ${min_amount:.2} ---")?;
        for tx in expenses {
            writeln!(
                self.output,
                "Category: {}, Amount: ${:.2}, Date: {}",
                tx.category(),
                tx.amount(),
                tx.date()
            )?;
        }
        Ok(Flow::Continue)
    }

    fn sort(&mut self) -> io::Result<Flow> {
        let Some(key) = self.prompt("Sort by (date, amount, type, category, description): ")?
        else {
            return Ok(Flow::Exit);
        };
        let Some(reverse) = self.prompt("Reverse order? (yes/no): ")? else {
            return Ok(Flow::Exit);
        };

        match key.parse::<SortKey>() {
            Ok(key) => {
                self.store.sort(key, SortOrder::from_reverse(is_yes(&reverse)));
                writeln!(self.output, "Transactions sorted successfully.")?;
            }
            Err(e) => {
                warn!(error = %e, "sort rejected");
                writeln!(self.output, "Error: {e}.")?;
            }
        }

        self.view_all()?;
        Ok(Flow::Continue)
    }

    fn chart(&mut self) -> io::Result<()> {
        let monthly = match self.store.monthly_spending() {
            Ok(monthly) => monthly,
            Err(e) => return self.report_error(e),
        };
        match SpendingChart::from_monthly(&monthly) {
            Some(chart) => write!(self.output, "\n{chart}"),
            None => writeln!(self.output, "No expenses recorded to generate a chart."),
        }
    }

    fn report_error(&mut self, error: TransactionError) -> io::Result<()> {
        warn!(%error, "report failed");
        writeln!(self.output, "Error: {error}.")
    }
}

/// Accepts `yes`/`y` in any case.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

/// One row of the full listing.
pub fn listing_line(tx: &Transaction) -> String {
    format!(
        "Type: {:<7} | Category: {:<10} | Amount: ${:>7} | Date: {} | Desc: {}",
        tx.kind().label(),
        tx.category(),
        format!("{:.2}", tx.amount()),
        tx.date(),
        tx.description()
    )
}
