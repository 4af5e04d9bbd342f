// Copyright (c) 2025 FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period-based aggregation over in-memory rows. Commands load a user's
//! records through [`crate::store`] and hand them to these functions; nothing
//! here touches the database, so every report is reproducible from fixtures.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Budget, Goal, Transaction, TxKind};
use crate::utils::parse_month;

/// Reporting window: a specific month, or the current calendar year.
///
/// "Yearly" is deliberately anchored to the year of the evaluation date, not
/// to a selectable year token — that is how the system this replaces behaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    Yearly,
    Month(String), // YYYY-MM
}

impl Period {
    pub fn parse(s: &str) -> Result<Period> {
        if s == "yearly" {
            return Ok(Period::Yearly);
        }
        Ok(Period::Month(parse_month(s)?))
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Period::Yearly => date.year() == today.year(),
            Period::Month(m) => date.format("%Y-%m").to_string() == *m,
        }
    }

    /// Number of monthly allocations covered by this period.
    pub fn months(&self) -> Decimal {
        match self {
            Period::Yearly => Decimal::from(12),
            Period::Month(_) => Decimal::ONE,
        }
    }

    pub fn label(&self, today: NaiveDate) -> String {
        match self {
            Period::Yearly => today.year().to_string(),
            Period::Month(m) => m.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetHealth {
    OnTrack,
    Overspent,
    NotApplicable,
}

impl BudgetHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetHealth::OnTrack => "on-track",
            BudgetHealth::Overspent => "overspent",
            BudgetHealth::NotApplicable => "n/a",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub spent: Decimal,
    /// Allocation for the whole period (monthly amount x 12 when yearly).
    pub budget: Decimal,
    pub remaining: Decimal,
    pub status: BudgetHealth,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    pub total_spent: Decimal,
    pub total_income: Decimal,
    pub total_budget: Decimal,
    pub remaining_budget: Decimal,
    pub expense_breakdown: BTreeMap<String, Decimal>,
    pub budget_status: Vec<BudgetLine>,
}

/// Aggregate a user's records over one reporting period.
///
/// Categories are joined by exact, case-sensitive string equality — no
/// trimming, no case folding. A category that appears in transactions but in
/// no budget shows up in the breakdown only; a budget with no spending shows
/// a zero `spent`. Empty inputs produce a zeroed report, never an error.
pub fn build_report(
    transactions: &[Transaction],
    budgets: &[Budget],
    period: &Period,
    today: NaiveDate,
) -> PeriodReport {
    let factor = period.months();

    let mut total_spent = Decimal::ZERO;
    let mut total_income = Decimal::ZERO;
    let mut expense_breakdown: BTreeMap<String, Decimal> = BTreeMap::new();

    for t in transactions {
        if !period.contains(t.date, today) {
            continue;
        }
        match t.kind {
            TxKind::Income => total_income += t.amount,
            TxKind::Expense => {
                total_spent += t.amount;
                *expense_breakdown.entry(t.category.clone()).or_default() += t.amount;
            }
        }
    }

    let mut total_budget = Decimal::ZERO;
    let mut budget_status = Vec::with_capacity(budgets.len());
    for b in budgets {
        total_budget += b.amount * factor;
        let cap = b.amount * factor;
        let spent = expense_breakdown
            .get(&b.category)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let status = if cap.is_zero() {
            BudgetHealth::NotApplicable
        } else if spent > cap {
            BudgetHealth::Overspent
        } else {
            BudgetHealth::OnTrack
        };
        budget_status.push(BudgetLine {
            category: b.category.clone(),
            spent,
            budget: cap,
            remaining: cap - spent,
            status,
        });
    }

    PeriodReport {
        total_spent,
        total_income,
        total_budget,
        remaining_budget: total_budget - total_spent,
        expense_breakdown,
        budget_status,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub name: String,
    pub current: Decimal,
    pub target: Decimal,
    /// Uncapped; a goal funded past its target reports more than 100.
    pub percent: Decimal,
}

pub fn goal_progress(goals: &[Goal]) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|g| {
            let percent = if g.target_amount.is_zero() {
                Decimal::ZERO
            } else {
                (g.current_amount / g.target_amount * Decimal::from(100)).round_dp(1)
            };
            GoalProgress {
                name: g.name.clone(),
                current: g.current_amount,
                target: g.target_amount,
                percent,
            }
        })
        .collect()
}

/// Distinct YYYY-MM tokens present in the transaction set, newest first.
pub fn period_options(transactions: &[Transaction]) -> Vec<String> {
    let months: BTreeSet<String> = transactions
        .iter()
        .map(|t| t.date.format("%Y-%m").to_string())
        .collect();
    months.into_iter().rev().collect()
}
