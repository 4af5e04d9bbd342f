// Copyright (c) FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let icon = sub.get_one::<String>("icon").map(|s| s.as_str()).unwrap_or("");

    if category.is_empty() {
        return Err(Error::Validation("Category must not be empty".into()).into());
    }
    if amount <= Decimal::ZERO {
        return Err(Error::Validation("Amount must be positive".into()).into());
    }

    // Creating a second budget with an existing category is allowed, as in
    // the system this replaces; 'doctor' reports the double-count.
    match sub.get_one::<i64>("id") {
        Some(id) => {
            store::update_budget(conn, user_id, *id, &category, amount, icon)?;
            println!("Updated budget {} ({} = {}/month)", id, category, fmt_money(&amount));
        }
        None => {
            let id = store::insert_budget(conn, user_id, &category, amount, icon)?;
            println!("Set budget {} ({} = {}/month)", id, category, fmt_money(&amount));
        }
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let budgets = store::list_budgets(conn, user_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let data: Vec<Vec<String>> = budgets
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.category.clone(),
                    fmt_money(&b.amount),
                    b.icon.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Category", "Monthly", "Icon"], data));
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_budget(conn, user_id, id)?;
    println!("Removed budget {}", id);
    Ok(())
}
