// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::EntryKind;
use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the ledger, analyzer and exporters.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Invalid {kind} category '{name}'")]
    InvalidCategory { kind: EntryKind, name: String },

    #[error("{kind} category '{name}' already exists")]
    DuplicateCategory { kind: EntryKind, name: String },

    #[error("Invalid amount {0}: amounts must be between 0 and {max}", max = crate::models::MAX_AMOUNT)]
    InvalidAmount(Decimal),

    #[error("Invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Storage failure: {0}")]
    Persistence(#[source] anyhow::Error),

    #[error("Failed to export report to {}: {cause}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        cause: anyhow::Error,
    },
}

impl BudgetError {
    pub(crate) fn export(path: impl Into<PathBuf>, cause: impl Into<anyhow::Error>) -> Self {
        BudgetError::Export {
            path: path.into(),
            cause: cause.into(),
        }
    }

    /// True for conditions the caller can fix and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BudgetError::InvalidCategory { .. }
                | BudgetError::DuplicateCategory { .. }
                | BudgetError::InvalidAmount(_)
                | BudgetError::InvalidMonth { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BudgetError>;
