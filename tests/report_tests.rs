// Copyright (c) FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finwise::models::{Budget, Goal, Transaction, TxKind};
use finwise::report::{BudgetHealth, Period, build_report, goal_progress, period_options};
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(date: &str, amount: &str, kind: TxKind, category: &str) -> Transaction {
    Transaction {
        id: 0,
        user_id: 1,
        date: d(date),
        description: "fixture".into(),
        amount: dec(amount),
        kind,
        category: category.into(),
        goal_id: None,
    }
}

fn budget(category: &str, amount: &str) -> Budget {
    Budget {
        id: 0,
        user_id: 1,
        category: category.into(),
        amount: dec(amount),
        icon: String::new(),
    }
}

#[test]
fn empty_inputs_yield_zeroed_report() {
    let r = build_report(&[], &[], &Period::Month("2024-03".into()), d("2024-03-15"));
    assert_eq!(r.total_spent, Decimal::ZERO);
    assert_eq!(r.total_income, Decimal::ZERO);
    assert_eq!(r.total_budget, Decimal::ZERO);
    assert_eq!(r.remaining_budget, Decimal::ZERO);
    assert!(r.expense_breakdown.is_empty());
    assert!(r.budget_status.is_empty());
}

#[test]
fn remaining_equals_total_budget_when_no_spending() {
    let budgets = vec![budget("Rent", "1200"), budget("Groceries", "400")];
    let r = build_report(&[], &budgets, &Period::Month("2024-03".into()), d("2024-03-15"));
    assert_eq!(r.total_budget, dec("1600"));
    assert_eq!(r.remaining_budget, dec("1600"));
    for line in &r.budget_status {
        assert_eq!(line.spent, Decimal::ZERO);
        assert_eq!(line.status, BudgetHealth::OnTrack);
    }
}

#[test]
fn breakdown_sums_to_total_spent() {
    let txs = vec![
        tx("2024-03-01", "25.50", TxKind::Expense, "Dining"),
        tx("2024-03-02", "74.50", TxKind::Expense, "Groceries"),
        tx("2024-03-03", "10", TxKind::Expense, "Dining"),
        tx("2024-03-04", "5000", TxKind::Income, "Salary"),
    ];
    let r = build_report(&txs, &[], &Period::Month("2024-03".into()), d("2024-03-31"));
    let sum: Decimal = r.expense_breakdown.values().copied().sum();
    assert_eq!(sum, r.total_spent);
    assert_eq!(r.total_spent, dec("110"));
    assert_eq!(r.total_income, dec("5000"));
    assert_eq!(r.expense_breakdown["Dining"], dec("35.50"));
}

#[test]
fn month_filter_is_exact_year_month() {
    let txs = vec![
        tx("2024-03-15", "100", TxKind::Expense, "Misc"),
        tx("2024-04-01", "999", TxKind::Expense, "Misc"),
    ];
    let r = build_report(&txs, &[], &Period::Month("2024-03".into()), d("2024-04-02"));
    assert_eq!(r.total_spent, dec("100"));
}

#[test]
fn yearly_budget_is_twelve_times_monthly() {
    let budgets = vec![budget("Rent", "1000"), budget("Dining", "200")];
    let today = d("2024-06-01");
    let monthly = build_report(&[], &budgets, &Period::Month("2024-06".into()), today);
    let yearly = build_report(&[], &budgets, &Period::Yearly, today);
    assert_eq!(yearly.total_budget, monthly.total_budget * Decimal::from(12));
}

#[test]
fn yearly_period_means_the_evaluation_year() {
    let txs = vec![
        tx("2024-01-10", "40", TxKind::Expense, "Misc"),
        tx("2023-12-31", "60", TxKind::Expense, "Misc"),
    ];
    let r = build_report(&txs, &[], &Period::Yearly, d("2024-07-01"));
    assert_eq!(r.total_spent, dec("40"));
    let r_prev = build_report(&txs, &[], &Period::Yearly, d("2023-07-01"));
    assert_eq!(r_prev.total_spent, dec("60"));
}

#[test]
fn overspent_category_reports_negative_remaining() {
    let budgets = vec![budget("Groceries", "4000")];
    let txs = vec![
        tx("2024-03-05", "3000", TxKind::Expense, "Groceries"),
        tx("2024-03-20", "1500", TxKind::Expense, "Groceries"),
    ];
    let r = build_report(&txs, &budgets, &Period::Month("2024-03".into()), d("2024-03-31"));
    let line = &r.budget_status[0];
    assert_eq!(line.spent, dec("4500"));
    assert_eq!(line.remaining, dec("-500"));
    assert_eq!(line.status, BudgetHealth::Overspent);
}

#[test]
fn zero_budget_is_not_applicable_not_a_division() {
    let budgets = vec![Budget {
        id: 0,
        user_id: 1,
        category: "Misc".into(),
        amount: Decimal::ZERO,
        icon: String::new(),
    }];
    let txs = vec![tx("2024-03-05", "10", TxKind::Expense, "Misc")];
    let r = build_report(&txs, &budgets, &Period::Month("2024-03".into()), d("2024-03-31"));
    assert_eq!(r.budget_status[0].status, BudgetHealth::NotApplicable);
}

#[test]
fn unbudgeted_category_appears_only_in_breakdown() {
    let budgets = vec![budget("Rent", "1000")];
    let txs = vec![tx("2024-03-05", "75", TxKind::Expense, "Hobbies")];
    let r = build_report(&txs, &budgets, &Period::Month("2024-03".into()), d("2024-03-31"));
    assert!(r.expense_breakdown.contains_key("Hobbies"));
    assert!(r.budget_status.iter().all(|l| l.category != "Hobbies"));
    // and the budgeted category still reports, with zero spent
    assert_eq!(r.budget_status[0].category, "Rent");
    assert_eq!(r.budget_status[0].spent, Decimal::ZERO);
}

#[test]
fn category_match_is_case_sensitive() {
    let budgets = vec![budget("groceries", "100")];
    let txs = vec![tx("2024-03-05", "40", TxKind::Expense, "Groceries")];
    let r = build_report(&txs, &budgets, &Period::Month("2024-03".into()), d("2024-03-31"));
    assert_eq!(r.budget_status[0].spent, Decimal::ZERO);
    assert_eq!(r.expense_breakdown["Groceries"], dec("40"));
}

#[test]
fn duplicate_budget_categories_double_count_total() {
    let budgets = vec![budget("Rent", "1000"), budget("Rent", "1000")];
    let r = build_report(&[], &budgets, &Period::Month("2024-03".into()), d("2024-03-31"));
    assert_eq!(r.total_budget, dec("2000"));
    assert_eq!(r.budget_status.len(), 2);
}

#[test]
fn goal_progress_handles_zero_target() {
    let goals = vec![
        Goal {
            id: 1,
            user_id: 1,
            name: "Bike".into(),
            target_amount: dec("2000"),
            current_amount: dec("500"),
            target_date: d("2025-01-01"),
        },
        Goal {
            id: 2,
            user_id: 1,
            name: "Nothing".into(),
            target_amount: Decimal::ZERO,
            current_amount: dec("10"),
            target_date: d("2025-01-01"),
        },
    ];
    let p = goal_progress(&goals);
    assert_eq!(p[0].percent, dec("25.0"));
    assert_eq!(p[1].percent, Decimal::ZERO);
}

#[test]
fn period_options_are_distinct_and_newest_first() {
    let txs = vec![
        tx("2024-01-10", "1", TxKind::Expense, "A"),
        tx("2024-03-05", "1", TxKind::Expense, "A"),
        tx("2024-03-20", "1", TxKind::Income, "B"),
        tx("2023-11-02", "1", TxKind::Expense, "A"),
    ];
    assert_eq!(period_options(&txs), vec!["2024-03", "2024-01", "2023-11"]);
}
