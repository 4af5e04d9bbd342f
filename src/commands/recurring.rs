// Copyright (c) FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::models::{Frequency, TxKind};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = TxKind::parse(sub.get_one::<String>("kind").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let frequency = Frequency::parse(sub.get_one::<String>("frequency").unwrap())?;
    let day_of_month = sub.get_one::<u32>("day-of-month").copied();

    if description.is_empty() {
        return Err(Error::Validation("Description must not be empty".into()).into());
    }
    if amount <= Decimal::ZERO {
        return Err(Error::Validation("Amount must be positive".into()).into());
    }

    let id = store::insert_recurring(
        conn, user_id, &description, amount, kind, &category, frequency, day_of_month,
    )?;
    println!("Added recurring item {} ({}, {})", id, description, frequency.as_str());
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let items = store::list_recurring(conn, user_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &items)? {
        let data: Vec<Vec<String>> = items
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.description.clone(),
                    fmt_money(&r.amount),
                    r.kind.as_str().to_string(),
                    r.category.clone(),
                    r.frequency.as_str().to_string(),
                    r.day_of_month.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Description", "Amount", "Kind", "Category", "Frequency", "Day"],
                data
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let items = store::list_recurring(conn, user_id)?;
    let mut r = items
        .into_iter()
        .find(|r| r.id == id)
        .ok_or(Error::NotFound { entity: "recurring", id: id.to_string() })?;

    if let Some(d) = sub.get_one::<String>("description") {
        r.description = d.trim().to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        r.amount = parse_decimal(a)?;
    }
    if let Some(k) = sub.get_one::<String>("kind") {
        r.kind = TxKind::parse(k)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        r.category = c.trim().to_string();
    }
    if let Some(f) = sub.get_one::<String>("frequency") {
        r.frequency = Frequency::parse(f)?;
    }
    if let Some(d) = sub.get_one::<u32>("day-of-month") {
        r.day_of_month = Some(*d);
    }
    if r.description.is_empty() {
        return Err(Error::Validation("Description must not be empty".into()).into());
    }
    if r.amount <= Decimal::ZERO {
        return Err(Error::Validation("Amount must be positive".into()).into());
    }

    store::update_recurring(conn, &r)?;
    println!("Updated recurring item {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_recurring(conn, user_id, id)?;
    println!("Removed recurring item {}", id);
    Ok(())
}
