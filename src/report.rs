// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analyzer::BudgetAnalyzer;
use crate::error::{BudgetError, Result};
use crate::models::{CategoryAnalysis, MonthlySummary};
use crate::utils::fmt_amount;
use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};

pub const SUMMARY_SHEET: &str = "Monthly Summary";
pub const INCOME_SHEET: &str = "Income by Category";
pub const EXPENSES_SHEET: &str = "Expenses by Category";

const TOTAL_INCOME: &str = "Total Income";
const TOTAL_EXPENSES: &str = "Total Expenses";
const SAVINGS: &str = "Savings";
const SAVINGS_RATE: &str = "Savings Rate (%)";

/// `budget_report_<year>_<MM>.<ext>`
pub fn default_file_name(year: i32, month: u32, ext: &str) -> String {
    format!("budget_report_{}_{:02}.{}", year, month, ext)
}

fn month_title(year: i32, month: u32) -> Result<String> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .ok_or(BudgetError::InvalidMonth { year, month })
}

fn as_text(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// One titled two-column section of an exported report.
struct ReportTable {
    title: &'static str,
    labels: [&'static str; 2],
    rows: Vec<[String; 2]>,
}

fn report_tables(summary: &MonthlySummary, analysis: &CategoryAnalysis) -> [ReportTable; 3] {
    let by_category = |m: &std::collections::BTreeMap<String, Decimal>| {
        m.iter()
            .map(|(c, a)| [c.clone(), fmt_amount(a)])
            .collect::<Vec<_>>()
    };
    [
        ReportTable {
            title: SUMMARY_SHEET,
            labels: ["Metric", "Amount"],
            rows: vec![
                [TOTAL_INCOME.into(), fmt_amount(&summary.total_income)],
                [TOTAL_EXPENSES.into(), fmt_amount(&summary.total_expenses)],
                [SAVINGS.into(), fmt_amount(&summary.savings)],
                [SAVINGS_RATE.into(), fmt_amount(&summary.savings_rate)],
            ],
        },
        ReportTable {
            title: INCOME_SHEET,
            labels: ["Category", "Amount"],
            rows: by_category(&analysis.income),
        },
        ReportTable {
            title: EXPENSES_SHEET,
            labels: ["Category", "Amount"],
            rows: by_category(&analysis.expenses),
        },
    ]
}

/// Renders analyzer output as text and export artifacts.
pub struct ReportGenerator<'a> {
    analyzer: &'a BudgetAnalyzer<'a>,
    reports_dir: PathBuf,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(analyzer: &'a BudgetAnalyzer<'a>, reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            analyzer,
            reports_dir: reports_dir.into(),
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn render_monthly_text(&self, year: i32, month: u32) -> Result<String> {
        let title = month_title(year, month)?;
        let summary = self.analyzer.monthly_summary(year, month);
        let analysis = self.analyzer.category_analysis(year, month);

        let mut lines = vec![
            format!("Financial Report for {}", title),
            "-".repeat(50),
            String::new(),
            "SUMMARY:".to_string(),
            format!("Total Income:    ${}", fmt_amount(&summary.total_income)),
            format!("Total Expenses:  ${}", fmt_amount(&summary.total_expenses)),
            format!("Savings:         ${}", fmt_amount(&summary.savings)),
            format!("Savings Rate:    {:.1}%", summary.savings_rate.round_dp(1)),
        ];
        for (header, totals) in [
            ("INCOME BY CATEGORY:", &analysis.income),
            ("EXPENSES BY CATEGORY:", &analysis.expenses),
        ] {
            lines.extend([String::new(), header.to_string(), "-".repeat(30)]);
            lines.extend(totals.iter().map(|(category, amount)| {
                format!("{:<20} ${:>10}", category, fmt_amount(amount))
            }));
        }
        Ok(as_text(lines))
    }

    pub fn render_trend_text(&self, months: u32) -> String {
        let mut lines = vec![
            format!("Financial Trends Report - Last {} Months", months),
            "-".repeat(50),
        ];
        for trend in self.analyzer.trend_analysis(months) {
            // Trend months always come from real dates.
            let title = month_title(trend.year, trend.month).unwrap_or_default();
            let s = &trend.summary;
            lines.extend([
                String::new(),
                format!("{}:", title),
                format!("  Income:    ${}", fmt_amount(&s.total_income)),
                format!("  Expenses:  ${}", fmt_amount(&s.total_expenses)),
                format!("  Savings:   ${}", fmt_amount(&s.savings)),
                format!("  Rate:      {:.1}%", s.savings_rate.round_dp(1)),
            ]);
        }
        as_text(lines)
    }

    fn destination(&self, year: i32, month: u32, ext: &str, path: Option<&Path>) -> Result<PathBuf> {
        month_title(year, month)?;
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => self.reports_dir.join(default_file_name(year, month, ext)),
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| BudgetError::export(&path, e))?;
        }
        Ok(path)
    }

    /// Writes the month's three report sections to one CSV file.
    pub fn export_csv(&self, year: i32, month: u32, path: Option<&Path>) -> Result<PathBuf> {
        let path = self.destination(year, month, "csv", path)?;
        let tables = report_tables(
            &self.analyzer.monthly_summary(year, month),
            &self.analyzer.category_analysis(year, month),
        );
        write_csv(&path, &tables).map_err(|e| BudgetError::export(&path, e))?;
        tracing::info!("exported CSV report to {}", path.display());
        Ok(path)
    }

    /// Writes the month's three report sections to one sheet each of an xlsx workbook.
    pub fn export_spreadsheet(&self, year: i32, month: u32, path: Option<&Path>) -> Result<PathBuf> {
        let path = self.destination(year, month, "xlsx", path)?;
        let tables = report_tables(
            &self.analyzer.monthly_summary(year, month),
            &self.analyzer.category_analysis(year, month),
        );
        write_workbook(&path, &tables).map_err(|e| BudgetError::export(&path, e))?;
        tracing::info!("exported spreadsheet report to {}", path.display());
        Ok(path)
    }
}

fn write_csv(path: &Path, tables: &[ReportTable]) -> anyhow::Result<()> {
    let mut sections = Vec::new();
    for table in tables {
        let mut wtr = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        wtr.write_record([table.title])?;
        wtr.write_record(table.labels)?;
        for row in &table.rows {
            wtr.write_record(row)?;
        }
        sections.push(wtr.into_inner().map_err(|e| e.into_error())?);
    }
    fs::write(path, sections.join(&b"\n"[..]))?;
    Ok(())
}

fn write_workbook(path: &Path, tables: &[ReportTable]) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    for table in tables {
        let sheet = workbook.add_worksheet();
        sheet.set_name(table.title)?;
        sheet.set_column_width(0, 24)?;
        sheet.set_column_width(1, 14)?;
        for (col, label) in table.labels.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *label, &bold)?;
        }
        for (r, row) in table.rows.iter().enumerate() {
            let r = r as u32 + 1;
            sheet.write_string(r, 0, &row[0])?;
            sheet.write_string(r, 1, &row[1])?;
        }
    }
    workbook.save(path)?;
    Ok(())
}

/// Reads a CSV produced by [`ReportGenerator::export_csv`] back into its
/// summary and per-category sections.
pub fn parse_csv_report(text: &str) -> anyhow::Result<(MonthlySummary, CategoryAnalysis)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut summary = MonthlySummary::default();
    let mut analysis = CategoryAnalysis::default();
    let mut section: Option<&str> = None;
    let mut skip_labels = false;

    for result in rdr.records() {
        let rec = result?;
        if rec.len() == 1 {
            let title = rec.get(0).unwrap_or_default();
            section = [SUMMARY_SHEET, INCOME_SHEET, EXPENSES_SHEET]
                .into_iter()
                .find(|t| *t == title);
            if section.is_none() {
                return Err(anyhow!("Unknown report section '{}'", title));
            }
            skip_labels = true;
            continue;
        }
        if skip_labels {
            skip_labels = false;
            continue;
        }
        let key = rec.get(0).context("label missing")?.to_string();
        let raw = rec.get(1).context("amount missing")?;
        let amount = raw
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' for {}", raw, key))?;
        match section {
            Some(SUMMARY_SHEET) => match key.as_str() {
                TOTAL_INCOME => summary.total_income = amount,
                TOTAL_EXPENSES => summary.total_expenses = amount,
                SAVINGS => summary.savings = amount,
                SAVINGS_RATE => summary.savings_rate = amount,
                other => return Err(anyhow!("Unknown summary metric '{}'", other)),
            },
            Some(INCOME_SHEET) => {
                analysis.income.insert(key, amount);
            }
            Some(EXPENSES_SHEET) => {
                analysis.expenses.insert(key, amount);
            }
            _ => return Err(anyhow!("Row outside of any report section")),
        }
    }
    Ok((summary, analysis))
}
