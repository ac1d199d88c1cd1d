// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::parse_kind;
use crate::db::SqliteStore;
use crate::ledger::Ledger;
use crate::models::EntryKind;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind = parse_kind(sub.get_one::<String>("kind").unwrap());
            let name = sub.get_one::<String>("name").unwrap().trim();
            let description = sub.get_one::<String>("description").unwrap().trim();
            let mut ledger = Ledger::load(kind, &store)?;
            ledger.add_custom_category(name, description)?;
            println!("Added {} category '{}'", kind, name.to_uppercase());
        }
        Some(("list", sub)) => {
            let kinds = match sub.get_one::<String>("kind") {
                Some(k) => vec![parse_kind(k)],
                None => vec![EntryKind::Income, EntryKind::Expense],
            };
            let mut data = Vec::new();
            for kind in kinds {
                let ledger = Ledger::load(kind, &store)?;
                data.extend(category_rows(&ledger));
            }
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|r| {
                        vec![
                            r.kind.to_string(),
                            r.name,
                            r.description,
                            (if r.custom { "custom" } else { "built-in" }).to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Kind", "Category", "Description", "Source"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub kind: EntryKind,
    pub name: String,
    pub description: String,
    pub custom: bool,
}

pub fn category_rows(ledger: &Ledger<'_>) -> Vec<CategoryRow> {
    let registry = ledger.registry();
    ledger
        .available_categories()
        .into_iter()
        .map(|(name, description)| CategoryRow {
            kind: ledger.kind(),
            custom: !registry.is_builtin(&name),
            name,
            description,
        })
        .collect()
}
