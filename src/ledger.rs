// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::{CategoryRegistry, normalize};
use crate::clock::{Clock, SystemClock};
use crate::error::{BudgetError, Result};
use crate::models::{Entry, EntryKind, MAX_AMOUNT, saturating_sum};
use crate::store::EntryStore;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Append-only entries of one kind, validated against a [`CategoryRegistry`]
/// and written through to an optional [`EntryStore`].
pub struct Ledger<'a> {
    kind: EntryKind,
    registry: CategoryRegistry,
    entries: Vec<Entry>,
    store: Option<&'a dyn EntryStore>,
    clock: Box<dyn Clock + 'a>,
}

impl<'a> Ledger<'a> {
    /// A ledger with nothing behind it.
    pub fn in_memory(kind: EntryKind) -> Self {
        Self {
            kind,
            registry: CategoryRegistry::new(kind),
            entries: Vec::new(),
            store: None,
            clock: Box::new(SystemClock),
        }
    }

    /// Rebuilds custom categories and entries from `store`.
    pub fn load(kind: EntryKind, store: &'a dyn EntryStore) -> Result<Self> {
        let mut registry = CategoryRegistry::new(kind);
        let custom = store
            .list_custom_categories(kind)
            .map_err(BudgetError::Persistence)?;
        for (name, description) in custom {
            if !registry.add_custom(&name, &description) {
                tracing::warn!("ignoring stored {} category '{}'", kind, name);
            }
        }
        let entries = store.list_entries(kind).map_err(BudgetError::Persistence)?;
        tracing::debug!("loaded {} {} entries", entries.len(), kind);
        Ok(Self {
            kind,
            registry,
            entries,
            store: Some(store),
            clock: Box::new(SystemClock),
        })
    }

    /// Source of the date given to entries added without one.
    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Records a new entry dated `date`, or now when `None`.
    pub fn add(
        &mut self,
        amount: Decimal,
        counterparty: &str,
        category: &str,
        description: Option<&str>,
        date: Option<NaiveDateTime>,
    ) -> Result<Entry> {
        if !self.registry.is_valid(category) {
            tracing::warn!(
                "invalid {} category '{}', valid categories are: {}",
                self.kind,
                category,
                self.registry
                    .list_categories()
                    .into_keys()
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            return Err(BudgetError::InvalidCategory {
                kind: self.kind,
                name: category.to_string(),
            });
        }
        if amount < Decimal::ZERO || amount > Decimal::from(MAX_AMOUNT) {
            return Err(BudgetError::InvalidAmount(amount));
        }

        let date = date.unwrap_or_else(|| self.clock.now());
        let entry = Entry::new(
            self.kind,
            amount,
            counterparty,
            date,
            category,
            description.unwrap_or_default(),
        );
        if let Some(store) = self.store {
            store
                .insert_entry(self.kind, &entry)
                .map_err(BudgetError::Persistence)?;
        }
        self.entries.push(entry.clone());
        tracing::info!(
            "recorded {} {} in {} ({})",
            self.kind,
            entry.amount(),
            entry.category(),
            entry.counterparty()
        );
        Ok(entry)
    }

    pub fn available_categories(&self) -> BTreeMap<String, String> {
        self.registry.list_categories()
    }

    /// Adds a custom category, persisting it first when a store is attached.
    pub fn add_custom_category(&mut self, name: &str, description: &str) -> Result<()> {
        let kind = self.kind;
        let name = normalize(name);
        let duplicate = || BudgetError::DuplicateCategory {
            kind,
            name: name.clone(),
        };
        if name.is_empty() || self.registry.is_valid(&name) {
            tracing::warn!("{} category '{}' already exists", self.kind, name);
            return Err(duplicate());
        }
        if let Some(store) = self.store {
            let stored = store
                .insert_custom_category(self.kind, &name, description)
                .map_err(BudgetError::Persistence)?;
            if !stored {
                tracing::warn!("{} category '{}' already stored", self.kind, name);
                return Err(duplicate());
            }
        }
        if !self.registry.add_custom(&name, description) {
            return Err(duplicate());
        }
        tracing::info!("added custom {} category '{}'", self.kind, name);
        Ok(())
    }

    /// Entries in the order they were recorded.
    pub fn all_entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(self.entries.iter().map(Entry::amount))
    }

    pub fn category_summary(&self) -> BTreeMap<String, Decimal> {
        let mut summary = BTreeMap::new();
        for entry in &self.entries {
            let total = summary
                .entry(normalize(entry.category()))
                .or_insert(Decimal::ZERO);
            *total = total.saturating_add(entry.amount());
        }
        summary
    }

    /// Entries filed under `category`. An unknown category yields nothing.
    pub fn by_category(&self, category: &str) -> Vec<&Entry> {
        if !self.registry.is_valid(category) {
            tracing::warn!("invalid {} category '{}'", self.kind, category);
            return Vec::new();
        }
        let wanted = normalize(category);
        self.entries
            .iter()
            .filter(|e| normalize(e.category()) == wanted)
            .collect()
    }
}
