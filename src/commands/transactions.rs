// Copyright (c) 2025 FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::contrib;
use crate::error::Error;
use crate::models::{Transaction, TxKind};
use crate::report::Period;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::Validation("Amount must be positive".into()).into());
    }
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = TxKind::parse(sub.get_one::<String>("kind").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();

    if description.is_empty() {
        return Err(Error::Validation("Description must not be empty".into()).into());
    }
    if category.is_empty() {
        return Err(Error::Validation("Category must not be empty".into()).into());
    }
    validate_amount(amount)?;

    // Insert and goal credit commit together or not at all.
    let tx = conn.transaction()?;
    let goals = store::list_goals(&tx, user_id)?;
    let candidate = Transaction {
        id: 0,
        user_id,
        date,
        description: description.clone(),
        amount,
        kind,
        category: category.clone(),
        goal_id: None,
    };
    let matched = contrib::matching_goal(&goals, &candidate).map(|g| (g.id, g.name.clone()));
    let goal_id = matched.as_ref().map(|(id, _)| *id);
    store::insert_transaction(&tx, user_id, date, &description, amount, kind, &category, goal_id)?;
    if let Some(id) = goal_id {
        store::credit_goal(&tx, user_id, id, amount)?;
    }
    tx.commit()?;

    println!("Recorded {} {} on {} ({})", kind.as_str(), fmt_money(&amount), date, description);
    if let Some((_, name)) = matched {
        println!("Contributed {} toward goal '{}'", fmt_money(&amount), name);
    }
    Ok(())
}

/// In-memory filtering over the user's transactions, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let user_id = store::require_current_user(conn)?;
    let mut rows = store::list_transactions(conn, user_id)?;

    if let Some(p) = sub.get_one::<String>("period") {
        let period = Period::parse(p)?;
        let today = chrono::Local::now().date_naive();
        rows.retain(|t| period.contains(t.date, today));
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        rows.retain(|t| t.category == *cat);
    }
    if let Some(kind) = sub.get_one::<String>("kind") {
        let kind = TxKind::parse(kind)?;
        rows.retain(|t| t.kind == kind);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data: Vec<Vec<String>> = rows
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.description.clone(),
                    fmt_money(&t.amount),
                    t.kind.as_str().to_string(),
                    t.category.clone(),
                    t.goal_id.map(|g| g.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Amount", "Kind", "Category", "Goal"],
                data
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut t = store::get_transaction(conn, user_id, id)?;

    if let Some(d) = sub.get_one::<String>("date") {
        t.date = parse_date(d)?;
    }
    if let Some(d) = sub.get_one::<String>("description") {
        t.description = d.trim().to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        t.amount = parse_decimal(a)?;
    }
    if let Some(k) = sub.get_one::<String>("kind") {
        t.kind = TxKind::parse(k)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        t.category = c.trim().to_string();
    }
    if t.description.is_empty() {
        return Err(Error::Validation("Description must not be empty".into()).into());
    }
    validate_amount(t.amount)?;

    // Deliberately does not re-run the goal matcher or adjust any
    // current_amount the original add credited.
    store::update_transaction(conn, &t)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    // Goal credits made when this row was created stay in place.
    store::delete_transaction(conn, user_id, id)?;
    println!("Removed transaction {}", id);
    Ok(())
}
