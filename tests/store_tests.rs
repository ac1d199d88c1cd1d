// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budget_tracker::commands::load_ledgers;
use budget_tracker::db::{self, SqliteStore};
use budget_tracker::models::{Entry, EntryKind};
use budget_tracker::store::EntryStore;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn entry(kind: EntryKind, cents: i64, party: &str, day: u32, category: &str) -> Entry {
    let date = NaiveDate::from_ymd_opt(2025, 4, day)
        .unwrap()
        .and_hms_opt(14, 5, 9)
        .unwrap();
    Entry::new(kind, Decimal::new(cents, 2), party, date, category, "")
}

#[test]
fn entries_round_trip_in_insertion_order() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let later = entry(EntryKind::Expense, 4599, "Grocery Store", 20, "food");
    let earlier = entry(EntryKind::Expense, 150000, "ABC Apartments", 1, "HOUSING");
    store.insert_entry(EntryKind::Expense, &later).unwrap();
    store.insert_entry(EntryKind::Expense, &earlier).unwrap();

    let loaded = store.list_entries(EntryKind::Expense).unwrap();
    assert_eq!(loaded, vec![later, earlier]);
    assert_eq!(loaded[0].category(), "FOOD");
    assert!(store.list_entries(EntryKind::Income).unwrap().is_empty());

    let vendor: String = conn
        .query_row("SELECT vendor FROM expense_entries WHERE id = 1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(vendor, "Grocery Store");
}

#[test]
fn stored_dates_use_second_precision_text() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let e = entry(EntryKind::Income, 300000, "Tech Corp", 3, "SALARY");
    store.insert_entry(EntryKind::Income, &e).unwrap();
    let (date, amount): (String, String) = conn
        .query_row("SELECT date, amount FROM income_entries", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(date, "2025-04-03 14:05:09");
    assert_eq!(amount.parse::<Decimal>().unwrap(), Decimal::from(3000));
}

#[test]
fn duplicate_custom_category_is_refused() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    assert!(store
        .insert_custom_category(EntryKind::Income, "youtube", "Channel revenue")
        .unwrap());
    assert!(!store
        .insert_custom_category(EntryKind::Income, "YouTube", "Other text")
        .unwrap());
    // Kinds keep separate tables.
    assert!(store
        .insert_custom_category(EntryKind::Expense, "YOUTUBE", "Premium")
        .unwrap());

    let income = store.list_custom_categories(EntryKind::Income).unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income["YOUTUBE"], "Channel revenue");
}

#[test]
fn schema_init_is_idempotent() {
    let conn = setup();
    db::init_schema(&conn).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name LIKE '%_entries'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(tables, 2);
}

#[test]
fn ledgers_reload_from_sqlite() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    {
        let (mut income, mut expenses) = load_ledgers(&store).unwrap();
        income.add_custom_category("ROYALTIES", "Book royalties").unwrap();
        income
            .add(Decimal::from(250), "Publisher", "royalties", None, None)
            .unwrap();
        income
            .add(Decimal::from(3000), "Tech Corp", "SALARY", Some("Monthly"), None)
            .unwrap();
        expenses
            .add(Decimal::new(8550, 2), "Power Co", "UTILITIES", None, None)
            .unwrap();
    }

    let (income, expenses) = load_ledgers(&store).unwrap();
    assert!(income.registry().is_valid("royalties"));
    assert!(!expenses.registry().is_valid("ROYALTIES"));
    assert_eq!(income.len(), 2);
    assert_eq!(income.total(), Decimal::from(3250));
    assert_eq!(income.all_entries()[1].description(), "Monthly");
    assert_eq!(expenses.total(), Decimal::new(8550, 2));
}

#[test]
fn open_or_init_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("budget.sqlite");
    let conn = db::open_or_init(&path).unwrap();
    assert!(path.exists());
    let store = SqliteStore::new(&conn);
    assert!(store.list_entries(EntryKind::Income).unwrap().is_empty());
}
