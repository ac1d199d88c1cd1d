// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::load_ledgers;
use crate::analyzer::BudgetAnalyzer;
use crate::db::SqliteStore;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let (income, expenses) = load_ledgers(&store)?;
    let summary = BudgetAnalyzer::new(&income, &expenses).budget_summary();
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &summary)? {
        let rows = vec![
            vec!["Total Income".into(), fmt_amount(&summary.total_income)],
            vec!["Total Expenses".into(), fmt_amount(&summary.total_expenses)],
            vec!["Current Balance".into(), fmt_amount(&summary.balance)],
        ];
        println!("{}", pretty_table(&["Budget", "Amount"], rows));
    }
    Ok(())
}
