// Copyright (c) FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::contrib::goal_keyword;
use crate::error::Error;
use crate::report::goal_progress;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
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
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let current = match sub.get_one::<String>("current") {
        Some(s) => parse_decimal(s)?,
        None => Decimal::ZERO,
    };
    let target_date = parse_date(sub.get_one::<String>("date").unwrap())?;

    if name.is_empty() {
        return Err(Error::Validation("Name must not be empty".into()).into());
    }
    if target <= Decimal::ZERO {
        return Err(Error::Validation("Target amount must be positive".into()).into());
    }
    if current < Decimal::ZERO {
        return Err(Error::Validation("Current amount must not be negative".into()).into());
    }

    let id = store::insert_goal(conn, user_id, &name, target, current, target_date)?;
    println!(
        "Added goal {} '{}' (keyword '{}', target {} by {})",
        id,
        name,
        goal_keyword(&name),
        fmt_money(&target),
        target_date
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let goals = store::list_goals(conn, user_id)?;
    let progress = goal_progress(&goals);
    if !maybe_print_json(json_flag, jsonl_flag, &progress)? {
        let data: Vec<Vec<String>> = goals
            .iter()
            .zip(progress.iter())
            .map(|(g, p)| {
                vec![
                    g.id.to_string(),
                    g.name.clone(),
                    goal_keyword(&g.name).to_string(),
                    fmt_money(&g.current_amount),
                    fmt_money(&g.target_amount),
                    format!("{}%", p.percent),
                    g.target_date.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Keyword", "Saved", "Target", "Progress", "By"],
                data
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let goals = store::list_goals(conn, user_id)?;
    let mut g = goals
        .into_iter()
        .find(|g| g.id == id)
        .ok_or(Error::NotFound { entity: "goal", id: id.to_string() })?;

    if let Some(n) = sub.get_one::<String>("name") {
        g.name = n.trim().to_string();
    }
    if let Some(t) = sub.get_one::<String>("target") {
        g.target_amount = parse_decimal(t)?;
    }
    if let Some(c) = sub.get_one::<String>("current") {
        g.current_amount = parse_decimal(c)?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        g.target_date = parse_date(d)?;
    }
    if g.name.is_empty() {
        return Err(Error::Validation("Name must not be empty".into()).into());
    }
    if g.target_amount <= Decimal::ZERO {
        return Err(Error::Validation("Target amount must be positive".into()).into());
    }

    store::update_goal(conn, &g)?;
    println!("Updated goal {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_goal(conn, user_id, id)?;
    println!("Removed goal {}", id);
    Ok(())
}
