// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod entries;
pub mod exporter;
pub mod menu;
pub mod reports;
pub mod summary;

use crate::ledger::Ledger;
use crate::models::EntryKind;
use crate::store::EntryStore;
use anyhow::Result;

/// Income and expense ledgers loaded from one store.
pub fn load_ledgers(store: &dyn EntryStore) -> Result<(Ledger<'_>, Ledger<'_>)> {
    let income = Ledger::load(EntryKind::Income, store)?;
    let expenses = Ledger::load(EntryKind::Expense, store)?;
    Ok((income, expenses))
}

pub(crate) fn parse_kind(s: &str) -> EntryKind {
    match s {
        "expense" => EntryKind::Expense,
        _ => EntryKind::Income,
    }
}
