// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::load_ledgers;
use crate::analyzer::{BudgetAnalyzer, DEFAULT_TREND_MONTHS};
use crate::config::Settings;
use crate::db::SqliteStore;
use crate::report::ReportGenerator;
use crate::utils::{maybe_print_json, parse_month_number, parse_year};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let (income, expenses) = load_ledgers(&store)?;
    let analyzer = BudgetAnalyzer::new(&income, &expenses);
    let reports = ReportGenerator::new(&analyzer, &settings.reports_dir);
    match m.subcommand() {
        Some(("monthly", sub)) => {
            let year = parse_year(sub.get_one::<String>("year").unwrap())?;
            let month = parse_month_number(sub.get_one::<String>("month").unwrap())?;
            let data = json!({
                "year": year,
                "month": month,
                "summary": analyzer.monthly_summary(year, month),
                "categories": analyzer.category_analysis(year, month),
            });
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                println!("{}", reports.render_monthly_text(year, month)?);
            }
        }
        Some(("trend", sub)) => {
            let months = *sub.get_one::<u32>("months").unwrap_or(&DEFAULT_TREND_MONTHS);
            let data = analyzer.trend_analysis(months);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                println!("{}", reports.render_trend_text(months));
            }
        }
        _ => {}
    }
    Ok(())
}
