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

//! Field-based ordering of transactions.
//!
//! Sort keys are parsed once at the input boundary into a [`SortKey`]; each
//! key maps to a plain comparator function. Sorting is stable in both
//! directions, so records with equal keys keep their relative order.

use crate::TransactionError;
use crate::transaction::Transaction;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

type Comparator = fn(&Transaction, &Transaction) -> Ordering;

/// Field a sequence can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Date,
    Amount,
    Kind,
    Category,
    Description,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Date,
        SortKey::Amount,
        SortKey::Kind,
        SortKey::Category,
        SortKey::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Kind => "type",
            Self::Category => "category",
            Self::Description => "description",
        }
    }

    /// Natural ordering of the field: chronological, numeric or lexicographic.
    fn comparator(self) -> Comparator {
        match self {
            Self::Date => |a, b| a.date().cmp(&b.date()),
            Self::Amount => |a, b| a.amount().cmp(&b.amount()),
            Self::Kind => |a, b| a.kind().as_str().cmp(b.kind().as_str()),
            Self::Category => |a, b| a.category().cmp(b.category()),
            Self::Description => |a, b| a.description().cmp(b.description()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "type" | "kind" => Ok(Self::Kind),
            "category" => Ok(Self::Category),
            "description" => Ok(Self::Description),
            _ => Err(TransactionError::InvalidSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

/// Reorders `transactions` in place.
pub fn sort_transactions(transactions: &mut [Transaction], key: SortKey, order: SortOrder) {
    let compare = key.comparator();
    match order {
        SortOrder::Ascending => transactions.sort_by(compare),
        // Swapped operands keep equal elements in their original order.
        SortOrder::Descending => transactions.sort_by(|a, b| compare(b, a)),
    }
}
