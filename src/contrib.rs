// Copyright (c) FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Goal-contribution matching: an expense whose category equals a goal's
//! leading keyword counts toward that goal.
//!
//! The keyword join is a heuristic carried over from the system this
//! replaces: goals named "Car Loan" and "Car Insurance" share the keyword
//! "Car" and the first goal in slice order wins silently. Callers persist
//! the matched goal id on the transaction so the decision is at least
//! visible after the fact, and `doctor` reports colliding keywords.
//! Contributions are applied on create only; editing or deleting a matched
//! transaction never rolls the goal back.

use crate::models::{Goal, Transaction, TxKind};

/// Leading word of a goal name: everything before the first space, or the
/// whole name when there is none ("Goa Trip" -> "Goa", "EmergencyFund" ->
/// "EmergencyFund").
pub fn goal_keyword(name: &str) -> &str {
    match name.split_once(' ') {
        Some((head, _)) => head,
        None => name,
    }
}

/// First goal in slice order whose keyword equals the transaction's
/// category, case-sensitively. Income never matches.
pub fn matching_goal<'a>(goals: &'a [Goal], tx: &Transaction) -> Option<&'a Goal> {
    if tx.kind != TxKind::Expense {
        return None;
    }
    goals.iter().find(|g| goal_keyword(&g.name) == tx.category)
}

/// Apply a transaction against a set of goals, in place. Returns the id of
/// the credited goal, if any.
pub fn contribute(tx: &Transaction, goals: &mut [Goal]) -> Option<i64> {
    if tx.kind != TxKind::Expense {
        return None;
    }
    let goal = goals
        .iter_mut()
        .find(|g| goal_keyword(&g.name) == tx.category)?;
    goal.current_amount += tx.amount;
    Some(goal.id)
}

/// Derived contribution categories, one per goal, in goal order. Mirrors the
/// category list offered when recording a transaction.
pub fn goal_categories(goals: &[Goal]) -> Vec<String> {
    goals.iter().map(|g| goal_keyword(&g.name).to_string()).collect()
}
