// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use budget_tracker::clock::FixedClock;
use budget_tracker::error::BudgetError;
use budget_tracker::ledger::Ledger;
use budget_tracker::models::{Entry, EntryKind, MAX_AMOUNT};
use budget_tracker::store::EntryStore;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

#[derive(Default)]
struct FakeStore {
    entries: RefCell<Vec<Entry>>,
    categories: RefCell<Vec<(EntryKind, String, String)>>,
    fail_writes: Cell<bool>,
    entry_writes: Cell<usize>,
    category_writes: Cell<usize>,
}

impl EntryStore for FakeStore {
    fn insert_entry(&self, _kind: EntryKind, entry: &Entry) -> Result<i64> {
        self.entry_writes.set(self.entry_writes.get() + 1);
        if self.fail_writes.get() {
            return Err(anyhow!("disk full"));
        }
        self.entries.borrow_mut().push(entry.clone());
        Ok(self.entries.borrow().len() as i64)
    }

    fn list_entries(&self, kind: EntryKind) -> Result<Vec<Entry>> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.kind() == kind)
            .cloned()
            .collect())
    }

    fn insert_custom_category(
        &self,
        kind: EntryKind,
        name: &str,
        description: &str,
    ) -> Result<bool> {
        self.category_writes.set(self.category_writes.get() + 1);
        if self.fail_writes.get() {
            return Err(anyhow!("disk full"));
        }
        let mut cats = self.categories.borrow_mut();
        if cats.iter().any(|(k, n, _)| *k == kind && n == name) {
            return Ok(false);
        }
        cats.push((kind, name.to_string(), description.to_string()));
        Ok(true)
    }

    fn list_custom_categories(&self, kind: EntryKind) -> Result<BTreeMap<String, String>> {
        Ok(self
            .categories
            .borrow()
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, n, d)| (n.clone(), d.clone()))
            .collect())
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

#[test]
fn add_returns_entry_matching_inputs() {
    let store = FakeStore::default();
    let mut ledger = Ledger::load(EntryKind::Income, &store).unwrap();
    let date = day(2025, 3, 1);

    let entry = ledger
        .add(
            Decimal::new(300050, 2),
            "Tech Corp",
            "salary",
            Some("Monthly salary"),
            Some(date),
        )
        .unwrap();

    assert_eq!(entry.kind(), EntryKind::Income);
    assert_eq!(entry.amount(), Decimal::new(300050, 2));
    assert_eq!(entry.counterparty(), "Tech Corp");
    assert_eq!(entry.category(), "SALARY");
    assert_eq!(entry.description(), "Monthly salary");
    assert_eq!(entry.date(), date);
    assert_eq!(ledger.total(), Decimal::new(300050, 2));
    assert_eq!(store.entries.borrow().len(), 1);
}

#[test]
fn income_totals_and_category_summary() {
    let mut ledger = Ledger::in_memory(EntryKind::Income);
    ledger
        .add(Decimal::from(3000), "Tech Corp", "SALARY", None, None)
        .unwrap();
    ledger
        .add(Decimal::from(500), "Client", "FREELANCE", None, None)
        .unwrap();

    assert_eq!(format!("{:.2}", ledger.total()), "3500.00");
    let summary = ledger.category_summary();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary["SALARY"], Decimal::from(3000));
    assert_eq!(summary["FREELANCE"], Decimal::from(500));
}

#[test]
fn missing_date_defaults_to_clock() {
    let now = day(2025, 6, 15);
    let mut ledger = Ledger::in_memory(EntryKind::Expense).with_clock(FixedClock(now));
    let entry = ledger
        .add(Decimal::from(20), "Cafe", "food", None, None)
        .unwrap();
    assert_eq!(entry.date(), now);
    assert_eq!(entry.description(), "");

    let given = day(2024, 1, 2);
    let entry = ledger
        .add(Decimal::from(5), "Cafe", "FOOD", None, Some(given))
        .unwrap();
    assert_eq!(entry.date(), given);
}

#[test]
fn invalid_category_is_rejected_without_side_effects() {
    let store = FakeStore::default();
    let mut ledger = Ledger::load(EntryKind::Expense, &store).unwrap();
    ledger
        .add(Decimal::from(100), "Landlord", "HOUSING", None, None)
        .unwrap();

    let err = ledger
        .add(Decimal::from(50), "Somewhere", "SALARY", None, None)
        .unwrap_err();
    assert!(matches!(err, BudgetError::InvalidCategory { .. }));
    assert!(err.is_recoverable());
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.total(), Decimal::from(100));
    assert_eq!(store.entry_writes.get(), 1);
}

#[test]
fn negative_amount_is_rejected() {
    let store = FakeStore::default();
    let mut ledger = Ledger::load(EntryKind::Expense, &store).unwrap();
    let err = ledger
        .add(Decimal::from(-5), "Shop", "SHOPPING", None, None)
        .unwrap_err();
    assert!(matches!(err, BudgetError::InvalidAmount(_)));
    assert!(ledger.is_empty());
    assert_eq!(store.entry_writes.get(), 0);
}

#[test]
fn amount_above_limit_is_rejected() {
    let store = FakeStore::default();
    let mut ledger = Ledger::load(EntryKind::Expense, &store).unwrap();
    let limit = Decimal::from(MAX_AMOUNT);

    let err = ledger
        .add(limit + Decimal::ONE, "Bank", "DEBT", None, None)
        .unwrap_err();
    assert!(matches!(err, BudgetError::InvalidAmount(_)));
    assert!(err.is_recoverable());
    assert_eq!(store.entry_writes.get(), 0);

    ledger.add(limit, "Bank", "DEBT", None, None).unwrap();
    assert_eq!(ledger.total(), limit);
}

#[test]
fn oversized_stored_amounts_saturate_totals() {
    let store = FakeStore::default();
    let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
    for party in ["Fund A", "Fund B"] {
        store.entries.borrow_mut().push(Entry::new(
            EntryKind::Income,
            huge,
            party,
            day(2025, 3, 1),
            "INVESTMENT",
            "",
        ));
    }

    let ledger = Ledger::load(EntryKind::Income, &store).unwrap();
    assert_eq!(ledger.total(), Decimal::MAX);
    assert_eq!(ledger.category_summary()["INVESTMENT"], Decimal::MAX);
}

#[test]
fn failed_write_leaves_ledger_unchanged() {
    let store = FakeStore::default();
    let mut ledger = Ledger::load(EntryKind::Income, &store).unwrap();
    store.fail_writes.set(true);

    let err = ledger
        .add(Decimal::from(10), "Bank", "INVESTMENT", None, None)
        .unwrap_err();
    assert!(matches!(err, BudgetError::Persistence(_)));
    assert!(!err.is_recoverable());
    assert!(ledger.is_empty());
    assert_eq!(ledger.total(), Decimal::ZERO);
}

#[test]
fn custom_category_scenario() {
    let store = FakeStore::default();
    let mut ledger = Ledger::load(EntryKind::Income, &store).unwrap();

    ledger
        .add_custom_category("youtube", "Channel revenue")
        .unwrap();
    ledger
        .add(Decimal::from(42), "YouTube", "YouTube", None, None)
        .unwrap();

    assert!(ledger.available_categories().contains_key("YOUTUBE"));
    assert!(ledger.available_categories().contains_key("SALARY"));
    let err = ledger
        .add_custom_category("YOUTUBE", "again")
        .unwrap_err();
    assert!(matches!(err, BudgetError::DuplicateCategory { .. }));
    assert_eq!(store.categories.borrow().len(), 1);
    assert_eq!(store.categories.borrow()[0].1, "YOUTUBE");
}

#[test]
fn builtin_collision_never_reaches_store() {
    let store = FakeStore::default();
    let mut ledger = Ledger::load(EntryKind::Expense, &store).unwrap();
    let err = ledger.add_custom_category("Food", "dup").unwrap_err();
    assert!(matches!(err, BudgetError::DuplicateCategory { .. }));
    assert_eq!(store.category_writes.get(), 0);
}

#[test]
fn store_duplicate_is_reported() {
    let store = FakeStore::default();
    let mut first = Ledger::load(EntryKind::Expense, &store).unwrap();
    // Load the second ledger before the first one registers the name.
    let mut second = Ledger::load(EntryKind::Expense, &store).unwrap();
    first.add_custom_category("PETS", "Pet care").unwrap();

    let err = second.add_custom_category("PETS", "Pet care").unwrap_err();
    assert!(matches!(err, BudgetError::DuplicateCategory { .. }));
    assert!(!second.registry().is_valid("PETS"));
}

#[test]
fn custom_category_write_failure_is_not_registered() {
    let store = FakeStore::default();
    let mut ledger = Ledger::load(EntryKind::Income, &store).unwrap();
    store.fail_writes.set(true);
    let err = ledger.add_custom_category("ROYALTIES", "Books").unwrap_err();
    assert!(matches!(err, BudgetError::Persistence(_)));
    assert!(!ledger.registry().is_valid("ROYALTIES"));
}

#[test]
fn load_restores_entries_and_categories_in_insertion_order() {
    let store = FakeStore::default();
    {
        let mut ledger = Ledger::load(EntryKind::Expense, &store).unwrap();
        ledger.add_custom_category("PETS", "Pet care").unwrap();
        ledger
            .add(Decimal::from(75), "Pet Store", "pets", None, Some(day(2025, 2, 10)))
            .unwrap();
        ledger
            .add(Decimal::from(1500), "ABC Apartments", "HOUSING", None, Some(day(2025, 1, 1)))
            .unwrap();
    }

    let reloaded = Ledger::load(EntryKind::Expense, &store).unwrap();
    assert!(reloaded.registry().is_valid("Pets"));
    let vendors: Vec<&str> = reloaded
        .all_entries()
        .iter()
        .map(|e| e.counterparty())
        .collect();
    assert_eq!(vendors, ["Pet Store", "ABC Apartments"]);
    assert_eq!(reloaded.total(), Decimal::from(1575));
}

#[test]
fn by_category_filters_case_insensitively() {
    let mut ledger = Ledger::in_memory(EntryKind::Expense);
    ledger
        .add(Decimal::from(200), "Grocery Store", "FOOD", None, None)
        .unwrap();
    ledger
        .add(Decimal::from(60), "Gas Station", "TRANSPORTATION", None, None)
        .unwrap();
    ledger
        .add(Decimal::from(15), "Bakery", "food", None, None)
        .unwrap();

    let food = ledger.by_category("Food");
    assert_eq!(food.len(), 2);
    assert!(food.iter().all(|e| e.category() == "FOOD"));
    assert!(ledger.by_category("HEALTHCARE").is_empty());
    assert!(ledger.by_category("NOT_A_CATEGORY").is_empty());
}

#[test]
fn category_summary_sums_to_total() {
    let mut ledger = Ledger::in_memory(EntryKind::Expense);
    let cats = ["HOUSING", "FOOD", "food", "DEBT", "Utilities", "DEBT"];
    for (i, cat) in cats.iter().enumerate() {
        let amount = Decimal::new(1234 * (i as i64 + 1), 2);
        ledger.add(amount, "Vendor", cat, None, None).unwrap();
    }
    let summed: Decimal = ledger.category_summary().values().copied().sum();
    assert_eq!(summed, ledger.total());
    assert_eq!(ledger.category_summary().len(), 4);
}
