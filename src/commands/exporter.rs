// Copyright (c) FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::store;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let user_id = store::require_current_user(conn)?;

    let mut rows = store::list_transactions(conn, user_id)?;
    rows.reverse(); // oldest first in the file

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["Date", "Description", "Amount", "Category"])?;
            for t in &rows {
                // Sign carries the direction so a re-import derives the same
                // kind and magnitude back.
                let signed = match t.kind {
                    TxKind::Expense => -t.amount,
                    TxKind::Income => t.amount,
                };
                wtr.write_record([
                    t.date.to_string(),
                    t.description.clone(),
                    signed.to_string(),
                    t.category.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
