// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The numbered text menu shown when no subcommand is given.

use crate::analyzer::BudgetAnalyzer;
use crate::error::BudgetError;
use crate::ledger::Ledger;
use crate::report::ReportGenerator;
use crate::utils::{fmt_money, parse_decimal, parse_month_number, parse_year};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;

const RULE: &str = "------------------------------";

pub struct Menu<'l, 'a, R, W> {
    income: &'l mut Ledger<'a>,
    expenses: &'l mut Ledger<'a>,
    reports_dir: &'l Path,
    input: R,
    out: W,
}

impl<'l, 'a, R: BufRead, W: Write> Menu<'l, 'a, R, W> {
    pub fn new(
        income: &'l mut Ledger<'a>,
        expenses: &'l mut Ledger<'a>,
        reports_dir: &'l Path,
        input: R,
        out: W,
    ) -> Self {
        Self {
            income,
            expenses,
            reports_dir,
            input,
            out,
        }
    }

    /// Runs until the user picks 0 or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                return Ok(());
            };
            let outcome = match choice.as_str() {
                "0" => {
                    writeln!(self.out, "\nThank you for using Personal Budget Tracker!")?;
                    return Ok(());
                }
                "1" => self.add_entry(true),
                "2" => self.add_entry(false),
                "3" => self.add_custom_category(true),
                "4" => self.add_custom_category(false),
                "5" => self.category_summary(true),
                "6" => self.category_summary(false),
                "7" => self.budget_summary(),
                "8" => self.export_reports(),
                "9" => self.show_categories(),
                _ => {
                    writeln!(self.out, "\nInvalid option. Please try again.")?;
                    continue;
                }
            };
            match outcome {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(e) => writeln!(self.out, "\nError: {:#}", e)?,
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\n=== Personal Budget Tracker ===")?;
        for line in [
            "1. Add Income",
            "2. Add Expense",
            "3. Add Custom Income Category",
            "4. Add Custom Expense Category",
            "5. View Income Summary",
            "6. View Expense Summary",
            "7. View Budget Summary",
            "8. Export Reports",
            "9. View Categories",
            "0. Exit",
        ] {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ledger(&mut self, income: bool) -> &mut Ledger<'a> {
        if income {
            &mut *self.income
        } else {
            &mut *self.expenses
        }
    }

    fn print_categories(&mut self, income: bool) -> Result<()> {
        let ledger = if income { &*self.income } else { &*self.expenses };
        let kind = ledger.kind();
        let categories = ledger.available_categories();
        writeln!(self.out, "\nAvailable {} Categories:", kind)?;
        for (name, description) in categories {
            writeln!(self.out, "- {}: {}", name, description)?;
        }
        writeln!(self.out, "{}", RULE)?;
        Ok(())
    }

    // Each action returns Ok(false) when input ran out mid-prompt.

    fn add_entry(&mut self, income: bool) -> Result<bool> {
        let kind = self.ledger(income).kind();
        writeln!(self.out, "\nAdding {} Entry", kind)?;
        self.print_categories(income)?;

        let Some(amount) = self.prompt("Enter amount: $")? else {
            return Ok(false);
        };
        let amount = match parse_decimal(&amount) {
            Ok(a) => a,
            Err(_) => {
                writeln!(self.out, "\nError: Please enter a valid number for amount.")?;
                return Ok(true);
            }
        };
        let label = format!("Enter {}: ", kind.counterparty_label());
        let Some(counterparty) = self.prompt(&label)? else {
            return Ok(false);
        };
        let Some(category) = self.prompt("Enter category (from above list): ")? else {
            return Ok(false);
        };
        let Some(description) = self.prompt("Enter description (optional): ")? else {
            return Ok(false);
        };

        match self
            .ledger(income)
            .add(amount, &counterparty, &category, Some(&description), None)
        {
            Ok(_) => writeln!(self.out, "\n{} entry added successfully!", kind)?,
            Err(e) if e.is_recoverable() => writeln!(
                self.out,
                "\nFailed to add {} entry: {}",
                kind.label().to_lowercase(),
                e
            )?,
            Err(e) => return Err(e.into()),
        }
        Ok(true)
    }

    fn add_custom_category(&mut self, income: bool) -> Result<bool> {
        let kind = self.ledger(income).kind();
        writeln!(self.out, "\nAdding Custom {} Category", kind)?;
        let Some(name) = self.prompt("Enter category name: ")? else {
            return Ok(false);
        };
        let Some(description) = self.prompt("Enter category description: ")? else {
            return Ok(false);
        };
        match self.ledger(income).add_custom_category(&name, &description) {
            Ok(()) => writeln!(self.out, "\nCustom {} category added successfully!", kind)?,
            Err(BudgetError::DuplicateCategory { .. }) => writeln!(
                self.out,
                "\nFailed to add custom {} category. Name might already exist.",
                kind
            )?,
            Err(e) => return Err(e.into()),
        }
        Ok(true)
    }

    fn category_summary(&mut self, income: bool) -> Result<bool> {
        let ledger = if income { &*self.income } else { &*self.expenses };
        let kind = ledger.kind();
        let summary = ledger.category_summary();
        writeln!(self.out, "\n{} Summary by Category:", kind)?;
        for (category, total) in summary {
            writeln!(self.out, "{}: {}", category, fmt_money(&total))?;
        }
        writeln!(self.out, "{}", RULE)?;
        Ok(true)
    }

    fn budget_summary(&mut self) -> Result<bool> {
        let summary = BudgetAnalyzer::new(&*self.income, &*self.expenses).budget_summary();
        writeln!(self.out, "\n=== BUDGET SUMMARY ===")?;
        writeln!(self.out, "Total Income: {}", fmt_money(&summary.total_income))?;
        writeln!(self.out, "Total Expenses: {}", fmt_money(&summary.total_expenses))?;
        writeln!(self.out, "Current Balance: {}", fmt_money(&summary.balance))?;
        writeln!(self.out, "{}", RULE)?;
        Ok(true)
    }

    fn export_reports(&mut self) -> Result<bool> {
        let Some(year) = self.prompt("Enter year (YYYY): ")? else {
            return Ok(false);
        };
        let Some(month) = self.prompt("Enter month (1-12): ")? else {
            return Ok(false);
        };
        let (year, month) = match (parse_year(&year), parse_month_number(&month)) {
            (Ok(y), Ok(m)) => (y, m),
            _ => {
                writeln!(
                    self.out,
                    "\nError: Please enter valid numbers for year and month."
                )?;
                return Ok(true);
            }
        };

        let analyzer = BudgetAnalyzer::new(&*self.income, &*self.expenses);
        let reports = ReportGenerator::new(&analyzer, self.reports_dir);
        let exported = reports
            .export_csv(year, month, None)
            .and_then(|csv| Ok((csv, reports.export_spreadsheet(year, month, None)?)));
        match exported {
            Ok((csv_path, xlsx_path)) => {
                writeln!(self.out, "\nReports generated successfully:")?;
                writeln!(self.out, "CSV Report: {}", csv_path.display())?;
                writeln!(self.out, "Excel Report: {}", xlsx_path.display())?;
            }
            Err(e) => writeln!(self.out, "\nError generating reports: {}", e)?,
        }
        Ok(true)
    }

    fn show_categories(&mut self) -> Result<bool> {
        self.print_categories(true)?;
        self.print_categories(false)?;
        Ok(true)
    }
}
