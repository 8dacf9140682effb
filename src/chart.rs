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

//! Text bar chart of monthly spending.
//!
//! ```text
//! --- Monthly Spending Bar Chart ---
//! 2024-01: $ 400.00 |██████████████████████████████████████████████████|
//! 2024-02: $  50.00 |██████|
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;
use std::fmt;

/// Width in cells of the bar for the largest month.
pub const BAR_WIDTH: usize = 50;

const BAR_CELL: char = '█';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow {
    pub month: String,
    pub amount: Decimal,
    pub bar_length: usize,
}

/// Monthly spending scaled so the largest month spans [`BAR_WIDTH`] cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingChart {
    rows: Vec<ChartRow>,
}

impl SpendingChart {
    /// Builds a chart from `YYYY-MM` keyed totals.
    ///
    /// Returns `None` when there is nothing to chart.
    pub fn from_monthly(monthly: &BTreeMap<String, Decimal>) -> Option<Self> {
        let max = monthly.values().copied().max()?;

        let rows = monthly
            .iter()
            .map(|(month, &amount)| ChartRow {
                month: month.clone(),
                amount,
                bar_length: bar_length(amount, max),
            })
            .collect();

        Some(Self { rows })
    }

    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }
}

/// `floor(amount / max * BAR_WIDTH)`, or zero when the ratio is not positive.
fn bar_length(amount: Decimal, max: Decimal) -> usize {
    if max <= Decimal::ZERO || amount <= Decimal::ZERO {
        return 0;
    }
    (amount / max * Decimal::from(BAR_WIDTH))
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH)
}

impl fmt::Display for SpendingChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Monthly Spending Bar Chart ---")?;
        for row in &self.rows {
            let amount = format!("{:.2}", row.amount);
            let bar: String = std::iter::repeat_n(BAR_CELL, row.bar_length).collect();
            writeln!(f, "{}: ${:>7} |{}|", row.month, amount, bar)?;
        }
        Ok(())
    }
}
