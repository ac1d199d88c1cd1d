// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::EntryKind;
use std::collections::BTreeMap;

pub const INCOME_CATEGORIES: &[(&str, &str)] = &[
    ("SALARY", "Regular employment income"),
    ("FREELANCE", "Freelance or contract work"),
    ("INVESTMENT", "Investment returns"),
    ("RENTAL", "Rental income"),
    ("BUSINESS", "Business income"),
    ("OTHER", "Other income sources"),
];

pub const EXPENSE_CATEGORIES: &[(&str, &str)] = &[
    ("HOUSING", "Housing expenses (rent, mortgage, utilities)"),
    ("FOOD", "Food and groceries"),
    (
        "TRANSPORTATION",
        "Transportation (fuel, public transit, maintenance)",
    ),
    ("HEALTHCARE", "Healthcare and medical expenses"),
    ("ENTERTAINMENT", "Entertainment and recreation"),
    ("SHOPPING", "Shopping (clothing, electronics)"),
    ("EDUCATION", "Education and training"),
    ("UTILITIES", "Utilities (electricity, water, internet)"),
    ("INSURANCE", "Insurance premiums"),
    ("DEBT", "Debt payments"),
    ("SAVINGS", "Savings and investments"),
    ("OTHERS", "Other expenses"),
];

pub fn builtin(kind: EntryKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        EntryKind::Income => INCOME_CATEGORIES,
        EntryKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// Canonical form of a category name.
pub fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Built-in categories for one entry kind plus the custom ones added at runtime.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    kind: EntryKind,
    custom: BTreeMap<String, String>,
}

impl CategoryRegistry {
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            custom: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        let name = normalize(name);
        builtin(self.kind).iter().any(|(n, _)| *n == name)
    }

    /// Registers a custom category. Returns false if the name is a built-in
    /// or is already registered; existing descriptions are never replaced.
    pub fn add_custom(&mut self, name: &str, description: &str) -> bool {
        let name = normalize(name);
        if name.is_empty() || self.is_builtin(&name) || self.custom.contains_key(&name) {
            return false;
        }
        self.custom.insert(name, description.to_string());
        true
    }

    pub fn is_valid(&self, name: &str) -> bool {
        self.is_builtin(name) || self.custom.contains_key(&normalize(name))
    }

    /// Built-ins and custom categories together.
    pub fn list_categories(&self) -> BTreeMap<String, String> {
        let mut all: BTreeMap<String, String> = builtin(self.kind)
            .iter()
            .map(|(n, d)| (n.to_string(), d.to_string()))
            .collect();
        for (n, d) in &self.custom {
            all.insert(n.clone(), d.clone());
        }
        all
    }

    pub fn custom_categories(&self) -> &BTreeMap<String, String> {
        &self.custom
    }
}
