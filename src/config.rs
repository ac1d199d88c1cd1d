// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "BudgetTracker", "budget-tracker"));

pub const DB_FILE: &str = "budget.sqlite";
pub const REPORTS_DIR: &str = "reports";

/// Where the database and exported reports live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub reports_dir: PathBuf,
}

impl Settings {
    /// Everything under one data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DB_FILE),
            reports_dir: dir.join(REPORTS_DIR),
        }
    }

    /// Platform data dir, with explicit paths taking precedence.
    pub fn resolve(db_path: Option<PathBuf>, reports_dir: Option<PathBuf>) -> Result<Self> {
        if let (Some(db_path), Some(reports_dir)) = (&db_path, &reports_dir) {
            return Ok(Self {
                db_path: db_path.clone(),
                reports_dir: reports_dir.clone(),
            });
        }
        let defaults = Self::in_dir(&data_dir()?);
        Ok(Self {
            db_path: db_path.unwrap_or(defaults.db_path),
            reports_dir: reports_dir.unwrap_or(defaults.reports_dir),
        })
    }
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}
