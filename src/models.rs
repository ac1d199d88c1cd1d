// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Timestamp layout used for stored entries.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest amount a single entry may carry.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Sum that sticks at the `Decimal` bounds instead of overflowing.
pub fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        }
    }

    /// Name of the counterparty field: `source` for income, `vendor` for expenses.
    pub fn counterparty_label(self) -> &'static str {
        match self {
            EntryKind::Income => "source",
            EntryKind::Expense => "vendor",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One recorded income or expense transaction.
///
/// Fields are private; an entry cannot change after it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    kind: EntryKind,
    amount: Decimal,
    counterparty: String,
    date: NaiveDateTime,
    category: String,
    description: String,
}

impl Entry {
    /// Builds an entry, normalizing the category to uppercase.
    pub fn new(
        kind: EntryKind,
        amount: Decimal,
        counterparty: impl Into<String>,
        date: NaiveDateTime,
        category: &str,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            amount,
            counterparty: counterparty.into(),
            date,
            category: category.trim().to_uppercase(),
            description: description.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Income source or expense vendor.
    pub fn counterparty(&self) -> &str {
        &self.counterparty
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub savings: Decimal,
    /// Percent of income kept; zero when there was no income. A ratio too
    /// large for `Decimal` is pinned to `Decimal::MIN` or `Decimal::MAX`.
    pub savings_rate: Decimal,
}

impl MonthlySummary {
    pub fn from_totals(total_income: Decimal, total_expenses: Decimal) -> Self {
        let savings = total_income.saturating_sub(total_expenses);
        let savings_rate = if total_income > Decimal::ZERO {
            savings
                .checked_div(total_income)
                .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(if savings.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                })
        } else {
            Decimal::ZERO
        };
        Self {
            total_income,
            total_expenses,
            savings,
            savings_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub income: BTreeMap<String, Decimal>,
    pub expenses: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub year: i32,
    pub month: u32,
    #[serde(flatten)]
    pub summary: MonthlySummary,
}

/// All-time totals across both ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}
