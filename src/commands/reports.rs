// Copyright (c) 2025 FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::report::{self, Period, PeriodReport};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        Some(("budget-status", sub)) => budget_status(conn, sub)?,
        Some(("goals", sub)) => goals(conn, sub)?,
        Some(("periods", sub)) => periods(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Default to the current month when no --period is given. "yearly" always
/// means the year of `today`.
fn period_of(sub: &clap::ArgMatches, today: NaiveDate) -> Result<Period> {
    match sub.get_one::<String>("period") {
        Some(p) => Period::parse(p),
        None => Ok(Period::Month(today.format("%Y-%m").to_string())),
    }
}

fn report_for(conn: &Connection, sub: &clap::ArgMatches) -> Result<(PeriodReport, Period, NaiveDate)> {
    let user_id = store::require_current_user(conn)?;
    let today = chrono::Local::now().date_naive();
    let period = period_of(sub, today)?;
    let transactions = store::list_transactions(conn, user_id)?;
    let budgets = store::list_budgets(conn, user_id)?;
    let report = report::build_report(&transactions, &budgets, &period, today);
    Ok((report, period, today))
}

#[derive(Serialize)]
struct Summary {
    period: String,
    total_spent: String,
    total_income: String,
    total_budget: String,
    remaining_budget: String,
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (r, period, today) = report_for(conn, sub)?;
    let s = Summary {
        period: period.label(today),
        total_spent: fmt_money(&r.total_spent),
        total_income: fmt_money(&r.total_income),
        total_budget: fmt_money(&r.total_budget),
        remaining_budget: fmt_money(&r.remaining_budget),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let hdr = format!("Period {}", s.period);
        let data = vec![
            vec!["Total Spent".to_string(), s.total_spent],
            vec!["Total Income".to_string(), s.total_income],
            vec!["Total Budget".to_string(), s.total_budget],
            vec!["Remaining Budget".to_string(), s.remaining_budget],
        ];
        println!("{}", pretty_table(&[hdr.as_str(), "Amount"], data));
    }
    Ok(())
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (r, _, _) = report_for(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &r.expense_breakdown)? {
        let mut items: Vec<_> = r.expense_breakdown.into_iter().collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        let data: Vec<Vec<String>> = items
            .into_iter()
            .map(|(cat, amt)| vec![cat, fmt_money(&amt)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

fn budget_status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (r, _, _) = report_for(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &r.budget_status)? {
        let data: Vec<Vec<String>> = r
            .budget_status
            .iter()
            .map(|line| {
                vec![
                    line.category.clone(),
                    fmt_money(&line.budget),
                    fmt_money(&line.spent),
                    fmt_money(&line.remaining),
                    line.status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Budget", "Spent", "Remaining", "Status"], data)
        );
    }
    Ok(())
}

fn goals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let progress = report::goal_progress(&store::list_goals(conn, user_id)?);
    if !maybe_print_json(json_flag, jsonl_flag, &progress)? {
        let data: Vec<Vec<String>> = progress
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    fmt_money(&p.current),
                    fmt_money(&p.target),
                    format!("{}%", p.percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Goal", "Saved", "Target", "Progress"], data));
    }
    Ok(())
}

fn periods(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months = report::period_options(&store::list_transactions(conn, user_id)?);
    if !maybe_print_json(json_flag, jsonl_flag, &months)? {
        let data: Vec<Vec<String>> = months.into_iter().map(|m| vec![m]).collect();
        println!("{}", pretty_table(&["Period"], data));
    }
    Ok(())
}
