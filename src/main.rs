// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use duebook::{cli, commands, db, store::Store};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DUEBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let explicit = matches.get_one::<PathBuf>("db").map(PathBuf::as_path);
    let kv = db::open_or_init(explicit).context("Failed to open the database")?;
    let mut store = Store::load(kv);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path(explicit)?.display());
        }
        Some(("add", sub)) => commands::transactions::add(&mut store, sub)?,
        Some(("list", sub)) => commands::transactions::list(&store, sub)?,
        Some(("edit", sub)) => commands::transactions::edit(&mut store, sub)?,
        Some(("delete", sub)) => commands::transactions::delete(&mut store, sub)?,
        Some(("pay", sub)) => commands::transactions::pay(&mut store, sub)?,
        Some(("skip", sub)) => commands::transactions::skip(&mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("card", sub)) => commands::cards::handle(&mut store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    store.save().context("Failed to save")?;
    Ok(())
}
