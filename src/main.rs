// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::io;
use std::path::PathBuf;

use budget_tracker::commands::{self, menu::Menu};
use budget_tracker::config::Settings;
use budget_tracker::db::{self, SqliteStore};
use budget_tracker::models::EntryKind;
use budget_tracker::{cli, logging};

fn main() -> Result<()> {
    logging::init();
    let matches = cli::build_cli().get_matches();

    let settings = Settings::resolve(
        matches.get_one::<PathBuf>("db").cloned(),
        matches.get_one::<PathBuf>("reports_dir").cloned(),
    )?;
    let conn = db::open_or_init(&settings.db_path)?;

    if matches.get_flag("init_db") {
        println!("Database initialized at {}", settings.db_path.display());
        return Ok(());
    }

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", settings.db_path.display());
        }
        Some(("income", sub)) => commands::entries::handle(&conn, EntryKind::Income, sub)?,
        Some(("expense", sub)) => commands::entries::handle(&conn, EntryKind::Expense, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &settings, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &settings, sub)?,
        _ => {
            let store = SqliteStore::new(&conn);
            let (mut income, mut expenses) = commands::load_ledgers(&store)?;
            let stdin = io::stdin();
            Menu::new(
                &mut income,
                &mut expenses,
                &settings.reports_dir,
                stdin.lock(),
                io::stdout(),
            )
            .run()?;
        }
    }
    Ok(())
}
