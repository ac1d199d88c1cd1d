// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::ledger::Ledger;
use crate::models::{Entry, EntryKind};
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, kind: EntryKind, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let mut ledger = Ledger::load(kind, &store)?;
    match m.subcommand() {
        Some(("add", sub)) => add(&mut ledger, sub)?,
        Some(("list", sub)) => list(&ledger, sub)?,
        Some(("summary", sub)) => summary(&ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let counterparty = sub.get_one::<String>("counterparty").unwrap().trim();
    let category = sub.get_one::<String>("category").unwrap().trim();
    let description = sub.get_one::<String>("description").map(|s| s.trim());
    let date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?;

    let entry = ledger.add(amount, counterparty, category, description, date)?;
    println!(
        "Recorded {} {} on {} from '{}' ({})",
        entry.kind(),
        fmt_amount(&entry.amount()),
        entry.date_string(),
        entry.counterparty(),
        entry.category()
    );
    Ok(())
}

#[derive(Serialize)]
pub struct EntryRow {
    pub date: String,
    pub counterparty: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

impl From<&Entry> for EntryRow {
    fn from(e: &Entry) -> Self {
        Self {
            date: e.date_string(),
            counterparty: e.counterparty().to_string(),
            category: e.category().to_string(),
            amount: fmt_amount(&e.amount()),
            description: e.description().to_string(),
        }
    }
}

/// Most recent entries first, optionally narrowed to one category.
pub fn query_rows(ledger: &Ledger<'_>, sub: &clap::ArgMatches) -> Vec<EntryRow> {
    let mut entries: Vec<&Entry> = match sub.get_one::<String>("category") {
        Some(cat) => ledger.by_category(cat),
        None => ledger.all_entries().iter().collect(),
    };
    entries.reverse();
    entries.sort_by(|a, b| b.date().cmp(&a.date()));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        entries.truncate(*limit);
    }
    entries.into_iter().map(EntryRow::from).collect()
}

fn list(ledger: &Ledger<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(ledger, sub);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.counterparty.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        let party = match ledger.kind() {
            EntryKind::Income => "Source",
            EntryKind::Expense => "Vendor",
        };
        println!(
            "{}",
            pretty_table(&["Date", party, "Category", "Amount", "Description"], rows)
        );
    }
    Ok(())
}

fn summary(ledger: &Ledger<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let summary = ledger.category_summary();
    let data: Vec<(String, String)> = summary
        .iter()
        .map(|(c, a)| (c.clone(), fmt_amount(a)))
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let mut rows: Vec<Vec<String>> = data.into_iter().map(|(c, a)| vec![c, a]).collect();
        rows.push(vec!["TOTAL".into(), fmt_amount(&ledger.total())]);
        println!("{}", pretty_table(&["Category", "Total"], rows));
    }
    Ok(())
}
