// Copyright (c) 2025 FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::contrib::goal_keyword;
use crate::error::Error;
use crate::models::TxKind;
use crate::store;
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// CSV columns: Date, Description, Amount, Category. The sign of Amount
/// carries the direction (negative = expense); the stored amount is always
/// the absolute value with `kind` derived from the sign. Malformed rows are
/// skipped and counted, never fatal. The whole batch, goal credits included,
/// commits as one SQLite transaction.
fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let user_id = store::require_current_user(conn)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    // Goal names cannot change mid-import, so keywords are resolved once;
    // credits still accumulate row by row through credit_goal.
    let goals: Vec<(i64, String)> = store::list_goals(&tx, user_id)?
        .into_iter()
        .map(|g| (g.id, goal_keyword(&g.name).to_string()))
        .collect();

    let mut imported = 0usize;
    let mut skipped = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2; // 1-based, after the header row
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                eprintln!("{}", Error::ImportRow { line, reason: e.to_string() });
                skipped += 1;
                continue;
            }
        };
        match import_row(&rec) {
            Ok((date, description, amount, kind, category)) => {
                let goal_id = match kind {
                    TxKind::Expense => {
                        goals.iter().find(|(_, kw)| *kw == category).map(|(id, _)| *id)
                    }
                    TxKind::Income => None,
                };
                store::insert_transaction(
                    &tx,
                    user_id,
                    date,
                    &description,
                    amount,
                    kind,
                    &category,
                    goal_id,
                )?;
                if let Some(id) = goal_id {
                    store::credit_goal(&tx, user_id, id, amount)?;
                }
                imported += 1;
            }
            Err(reason) => {
                eprintln!("{}", Error::ImportRow { line, reason });
                skipped += 1;
            }
        }
    }
    tx.commit()?;
    println!("Imported {} transactions from {} ({} rows skipped)", imported, path, skipped);
    Ok(())
}

type Row = (chrono::NaiveDate, String, Decimal, TxKind, String);

fn import_row(rec: &csv::StringRecord) -> std::result::Result<Row, String> {
    let date_raw = rec.get(0).ok_or("date missing")?.trim();
    let description = rec.get(1).ok_or("description missing")?.trim().to_string();
    let amount_raw = rec.get(2).ok_or("amount missing")?.trim();
    let category = rec.get(3).ok_or("category missing")?.trim().to_string();

    if description.is_empty() {
        return Err("description missing".into());
    }
    if category.is_empty() {
        return Err("category missing".into());
    }
    let date = parse_date(date_raw).map_err(|e| e.to_string())?;
    let signed = parse_decimal(amount_raw).map_err(|e| e.to_string())?;
    // Non-negative is income, negative is expense; store the magnitude.
    let kind = if signed >= Decimal::ZERO { TxKind::Income } else { TxKind::Expense };
    Ok((date, description, signed.abs(), kind, category))
}
