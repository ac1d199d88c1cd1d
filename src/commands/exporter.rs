// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::load_ledgers;
use crate::analyzer::BudgetAnalyzer;
use crate::config::Settings;
use crate::db::SqliteStore;
use crate::report::ReportGenerator;
use crate::utils::{parse_month_number, parse_year};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use std::path::PathBuf;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m.get_one::<String>("format").unwrap().trim().to_lowercase();
    let year = parse_year(m.get_one::<String>("year").unwrap())?;
    let month = parse_month_number(m.get_one::<String>("month").unwrap())?;
    let out = m.get_one::<PathBuf>("out").map(PathBuf::as_path);

    let store = SqliteStore::new(conn);
    let (income, expenses) = load_ledgers(&store)?;
    let analyzer = BudgetAnalyzer::new(&income, &expenses);
    let reports = ReportGenerator::new(&analyzer, &settings.reports_dir);

    match fmt.as_str() {
        "csv" => {
            let path = reports.export_csv(year, month, out)?;
            println!("CSV Report: {}", path.display());
        }
        "xlsx" => {
            let path = reports.export_spreadsheet(year, month, out)?;
            println!("Excel Report: {}", path.display());
        }
        "all" => {
            if out.is_some() {
                return Err(anyhow!("--out needs a single --format (csv or xlsx)"));
            }
            let csv_path = reports.export_csv(year, month, None)?;
            let xlsx_path = reports.export_spreadsheet(year, month, None)?;
            println!("CSV Report: {}", csv_path.display());
            println!("Excel Report: {}", xlsx_path.display());
        }
        _ => return Err(anyhow!("Unknown format: {} (use csv|xlsx|all)", fmt)),
    }
    Ok(())
}
