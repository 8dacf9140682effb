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

//! Store persistence integration tests.

use finance_tracker::{
    Config, SortKey, SortOrder, Store, StoreError, TransactionError, TransactionKind,
};
use rust_decimal_macros::dec;
use std::fs;
use tempfile::TempDir;

fn temp_config() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path().join("transactions.csv"));
    (dir, config)
}

#[test]
fn missing_file_opens_empty() {
    let (_dir, config) = temp_config();
    let store = Store::open(&config).unwrap();

    assert!(store.is_empty());
    assert!(!config.data_file().exists());
}

#[test]
fn add_persists_immediately() {
    let (_dir, config) = temp_config();
    let mut store = Store::open(&config).unwrap();

    store
        .add(TransactionKind::Income, "salary", "1000.00", "2024-01-05", "January pay")
        .unwrap();

    let contents = fs::read_to_string(config.data_file()).unwrap();
    assert_eq!(
        contents,
        "kind,category,amount,date,description\nincome,salary,1000.00,2024-01-05,January pay\n"
    );
}

#[test]
fn reload_round_trip() {
    let (_dir, config) = temp_config();
    let mut store = Store::open(&config).unwrap();
    store
        .add(TransactionKind::Income, "salary", "1000.00", "2024-01-05", "January pay")
        .unwrap();
    store
        .add(TransactionKind::Expense, "rent", "400.00", "2024-01-10", "")
        .unwrap();

    let reloaded = Store::open(&config).unwrap();
    assert_eq!(reloaded.transactions(), store.transactions());
}

#[test]
fn invalid_amount_leaves_store_unchanged() {
    let (_dir, config) = temp_config();
    let mut store = Store::open(&config).unwrap();
    store
        .add(TransactionKind::Expense, "rent", "400", "2024-01-10", "")
        .unwrap();

    let err = store
        .add(TransactionKind::Expense, "food", "abc", "2024-01-11", "")
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Invalid(TransactionError::InvalidAmount(ref text)) if text == "abc"
    ));
    assert_eq!(store.len(), 1);
    assert_eq!(Store::open(&config).unwrap().len(), 1);
}

#[test]
fn invalid_date_is_not_saved() {
    let (_dir, config) = temp_config();
    let mut store = Store::open(&config).unwrap();

    let err = store
        .add(TransactionKind::Expense, "food", "10", "2024-02-30", "")
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Invalid(TransactionError::InvalidDate(_))
    ));
    assert!(store.is_empty());
    assert!(!config.data_file().exists());
}

#[test]
fn sort_is_not_persisted_until_next_save() {
    let (_dir, config) = temp_config();
    let mut store = Store::open(&config).unwrap();
    store
        .add(TransactionKind::Expense, "b", "20", "2024-01-02", "")
        .unwrap();
    store
        .add(TransactionKind::Expense, "a", "10", "2024-01-01", "")
        .unwrap();

    store.sort(SortKey::Amount, SortOrder::Ascending);
    assert_eq!(store.transactions()[0].category(), "a");
    assert_eq!(Store::open(&config).unwrap().transactions()[0].category(), "b");

    store.save().unwrap();
    assert_eq!(Store::open(&config).unwrap().transactions()[0].category(), "a");
}

#[test]
fn corrupt_file_is_reported() {
    let (_dir, config) = temp_config();
    fs::write(
        config.data_file(),
        "kind,category,amount,date,description\nincome,salary,not-a-number,2024-01-05,\n",
    )
    .unwrap();

    let err = Store::open(&config).unwrap_err();
    assert!(matches!(err, StoreError::CorruptStore { .. }));
    assert!(err.to_string().starts_with("corrupt data file"));
}

#[test]
fn foreign_schema_is_corrupt() {
    let (_dir, config) = temp_config();
    fs::write(config.data_file(), "client,available,held\n1,10.0,0.0\n").unwrap();

    assert!(matches!(
        Store::open(&config),
        Err(StoreError::CorruptStore { .. })
    ));
}

#[test]
fn empty_file_opens_empty() {
    let (_dir, config) = temp_config();
    fs::write(config.data_file(), "").unwrap();

    assert!(Store::open(&config).unwrap().is_empty());
}

#[test]
fn save_leaves_only_the_data_file() {
    let (dir, config) = temp_config();
    let mut store = Store::open(&config).unwrap();
    store
        .add(TransactionKind::Income, "gift", "5", "2024-05-05", "")
        .unwrap();

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["transactions.csv"]);
}

#[test]
fn save_does_not_touch_sibling_files() {
    let (dir, config) = temp_config();
    let sibling = dir.path().join("transactions.tmp");
    fs::write(&sibling, "keep me").unwrap();

    let mut store = Store::open(&config).unwrap();
    store
        .add(TransactionKind::Income, "gift", "5", "2024-05-05", "")
        .unwrap();

    assert_eq!(fs::read_to_string(&sibling).unwrap(), "keep me");
}

#[test]
fn failed_save_rolls_back_the_add() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path().join("missing").join("transactions.csv"));
    let mut store = Store::open(&config).unwrap();

    let err = store
        .add(TransactionKind::Income, "gift", "5", "2024-05-05", "")
        .unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(store.len(), 0);
}

#[test]
fn failed_save_keeps_earlier_records() {
    let (_dir, config) = temp_config();
    let mut store = Store::open(&config).unwrap();
    store
        .add(TransactionKind::Income, "salary", "100", "2024-05-01", "")
        .unwrap();

    // Replacing the data file with a directory makes the rename fail.
    fs::remove_file(config.data_file()).unwrap();
    fs::create_dir(config.data_file()).unwrap();

    let err = store
        .add(TransactionKind::Expense, "food", "5", "2024-05-05", "")
        .unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(store.len(), 1);
    assert_eq!(store.transactions()[0].category(), "salary");
}

#[test]
fn overflowing_income_is_rejected() {
    let (_dir, config) = temp_config();
    let mut store = Store::open(&config).unwrap();
    store
        .add(TransactionKind::Income, "jackpot", "7e28", "2024-01-01", "")
        .unwrap();

    let err = store
        .add(TransactionKind::Income, "jackpot", "7e28", "2024-01-02", "")
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Invalid(TransactionError::InvalidAmount(_))
    ));
    assert_eq!(store.len(), 1);
    assert!(store.balance().is_ok());
    assert!(store.monthly_spending().is_ok());
    assert_eq!(Store::open(&config).unwrap().len(), 1);
}

#[test]
fn overflowing_monthly_expense_is_rejected() {
    let (_dir, config) = temp_config();
    let mut store = Store::open(&config).unwrap();
    store
        .add(TransactionKind::Expense, "a", "7e28", "2024-01-01", "")
        .unwrap();

    let err = store
        .add(TransactionKind::Expense, "b", "7e28", "2024-01-31", "")
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Invalid(TransactionError::InvalidAmount(_))
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn overflowing_data_file_reports_instead_of_panicking() {
    let (_dir, config) = temp_config();
    fs::write(
        config.data_file(),
        "kind,category,amount,date,description\n\
         income,a,70000000000000000000000000000,2024-01-01,\n\
         income,b,70000000000000000000000000000,2024-01-02,\n",
    )
    .unwrap();

    let store = Store::open(&config).unwrap();
    assert_eq!(store.balance(), Err(TransactionError::AmountOverflow));
}

#[test]
fn negative_amounts_round_trip() {
    let (_dir, config) = temp_config();
    let mut store = Store::open(&config).unwrap();
    store
        .add(TransactionKind::Expense, "refund", "-12.50", "2024-06-01", "returned")
        .unwrap();

    let reloaded = Store::open(&config).unwrap();
    assert_eq!(reloaded.transactions()[0].amount(), dec!(-12.50));
}
