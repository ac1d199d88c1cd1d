// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::normalize;
use crate::clock::{Clock, SystemClock};
use crate::ledger::Ledger;
use crate::models::{
    BudgetSummary, CategoryAnalysis, Entry, MonthlySummary, MonthlyTrend, saturating_sum,
};
use chrono::{Datelike, Duration, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Days counted per month when sizing a trend window.
pub const TREND_DAYS_PER_MONTH: i64 = 30;

pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Longest trend window; larger requests are cut down to this.
pub const MAX_TREND_MONTHS: u32 = 1200;

fn in_month<'e>(entries: &'e [Entry], year: i32, month: u32) -> impl Iterator<Item = &'e Entry> {
    entries
        .iter()
        .filter(move |e| e.date().year() == year && e.date().month() == month)
}

fn sum_by_category<'e>(entries: impl Iterator<Item = &'e Entry>) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        let total = totals
            .entry(normalize(entry.category()))
            .or_insert(Decimal::ZERO);
        *total = total.saturating_add(entry.amount());
    }
    totals
}

/// `(year, month)` one calendar month later.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Read-only aggregation over an income and an expense ledger.
pub struct BudgetAnalyzer<'a> {
    income: &'a Ledger<'a>,
    expenses: &'a Ledger<'a>,
    clock: Box<dyn Clock + 'a>,
}

impl<'a> BudgetAnalyzer<'a> {
    pub fn new(income: &'a Ledger<'a>, expenses: &'a Ledger<'a>) -> Self {
        Self {
            income,
            expenses,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn monthly_summary(&self, year: i32, month: u32) -> MonthlySummary {
        let income =
            saturating_sum(in_month(self.income.all_entries(), year, month).map(Entry::amount));
        let expenses =
            saturating_sum(in_month(self.expenses.all_entries(), year, month).map(Entry::amount));
        MonthlySummary::from_totals(income, expenses)
    }

    pub fn category_analysis(&self, year: i32, month: u32) -> CategoryAnalysis {
        CategoryAnalysis {
            income: sum_by_category(in_month(self.income.all_entries(), year, month)),
            expenses: sum_by_category(in_month(self.expenses.all_entries(), year, month)),
        }
    }

    /// One summary per calendar month, oldest first, ending with the current
    /// month. The window opens at `now - 30 * months` days, so its first
    /// month can lie partly before a true "`months` ago" boundary.
    /// `months` is capped at [`MAX_TREND_MONTHS`].
    pub fn trend_analysis(&self, months: u32) -> Vec<MonthlyTrend> {
        if months > MAX_TREND_MONTHS {
            tracing::warn!(
                "trend window of {} months cut to {}",
                months,
                MAX_TREND_MONTHS
            );
        }
        let months = months.min(MAX_TREND_MONTHS);
        let now = self.clock.now();
        let start = now
            .checked_sub_signed(Duration::days(TREND_DAYS_PER_MONTH * i64::from(months)))
            .unwrap_or(NaiveDateTime::MIN);
        let end = (now.year(), now.month());

        let mut trends = Vec::new();
        let mut current = (start.year(), start.month());
        while current <= end {
            let (year, month) = current;
            trends.push(MonthlyTrend {
                year,
                month,
                summary: self.monthly_summary(year, month),
            });
            current = next_month(year, month);
        }
        trends
    }

    /// All-time totals regardless of date.
    pub fn budget_summary(&self) -> BudgetSummary {
        let total_income = self.income.total();
        let total_expenses = self.expenses.total();
        BudgetSummary {
            total_income,
            total_expenses,
            balance: total_income.saturating_sub(total_expenses),
        }
    }
}
