// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Entry, EntryKind};
use anyhow::Result;
use std::collections::BTreeMap;

/// Persistence used by a [`Ledger`](crate::ledger::Ledger).
///
/// Implementations take `&self`; the SQLite one relies on `Connection`
/// doing its own interior bookkeeping.
pub trait EntryStore {
    /// Stores an entry and returns its generated id.
    fn insert_entry(&self, kind: EntryKind, entry: &Entry) -> Result<i64>;

    /// All stored entries of one kind, in insertion order.
    fn list_entries(&self, kind: EntryKind) -> Result<Vec<Entry>>;

    /// Returns false when the name is already taken.
    fn insert_custom_category(&self, kind: EntryKind, name: &str, description: &str)
    -> Result<bool>;

    fn list_custom_categories(&self, kind: EntryKind) -> Result<BTreeMap<String, String>>;
}
