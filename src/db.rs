// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{DATE_FORMAT, Entry, EntryKind};
use crate::store::EntryStore;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{Connection, ErrorCode, params};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub fn open_or_init(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data dir {}", dir.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!("opened database at {}", path.display());
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS income_entries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        source TEXT NOT NULL,
        date TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_income_entries_date ON income_entries(date);

    CREATE TABLE IF NOT EXISTS expense_entries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        vendor TEXT NOT NULL,
        date TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_expense_entries_date ON expense_entries(date);

    CREATE TABLE IF NOT EXISTS custom_income_categories(
        name TEXT PRIMARY KEY,
        description TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS custom_expense_categories(
        name TEXT PRIMARY KEY,
        description TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

fn entry_table(kind: EntryKind) -> (&'static str, &'static str) {
    match kind {
        EntryKind::Income => ("income_entries", "source"),
        EntryKind::Expense => ("expense_entries", "vendor"),
    }
}

fn category_table(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Income => "custom_income_categories",
        EntryKind::Expense => "custom_expense_categories",
    }
}

/// [`EntryStore`] over a SQLite connection.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl EntryStore for SqliteStore<'_> {
    fn insert_entry(&self, kind: EntryKind, entry: &Entry) -> Result<i64> {
        let (table, party) = entry_table(kind);
        let sql = format!(
            "INSERT INTO {table}(amount, {party}, date, category, description)
             VALUES (?1, ?2, ?3, ?4, ?5)"
        );
        self.conn.execute(
            &sql,
            params![
                entry.amount().to_string(),
                entry.counterparty(),
                entry.date_string(),
                entry.category(),
                entry.description()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_entries(&self, kind: EntryKind) -> Result<Vec<Entry>> {
        let (table, party) = entry_table(kind);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT amount, {party}, date, category, IFNULL(description,'') FROM {table} ORDER BY id"
        ))?;
        let mut rows = stmt.query([])?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            let amount_s: String = r.get(0)?;
            let counterparty: String = r.get(1)?;
            let date_s: String = r.get(2)?;
            let category: String = r.get(3)?;
            let description: String = r.get(4)?;
            let amount = amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in {}", amount_s, table))?;
            let date = NaiveDateTime::parse_from_str(&date_s, DATE_FORMAT)
                .with_context(|| format!("Invalid date '{}' in {}", date_s, table))?;
            data.push(Entry::new(
                kind,
                amount,
                counterparty,
                date,
                &category,
                description,
            ));
        }
        Ok(data)
    }

    fn insert_custom_category(
        &self,
        kind: EntryKind,
        name: &str,
        description: &str,
    ) -> Result<bool> {
        let sql = format!(
            "INSERT INTO {}(name, description) VALUES (?1, ?2)",
            category_table(kind)
        );
        match self
            .conn
            .execute(&sql, params![name.to_uppercase(), description])
        {
            Ok(_) => Ok(true),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list_custom_categories(&self, kind: EntryKind) -> Result<BTreeMap<String, String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT name, description FROM {} ORDER BY name",
            category_table(kind)
        ))?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
        let mut data = BTreeMap::new();
        for row in rows {
            let (name, description) = row?;
            data.insert(name, description);
        }
        Ok(data)
    }
}
