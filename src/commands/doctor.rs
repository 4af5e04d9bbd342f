// Copyright (c) FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::contrib::goal_keyword;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, params};
use std::collections::BTreeMap;

/// Surfaces the known soft spots of the data model: category joins and goal
/// matching are by free string, and goal credits are never rolled back.
pub fn handle(conn: &Connection) -> Result<()> {
    let user_id = store::require_current_user(conn)?;
    let mut rows = Vec::new();

    // 1) Duplicate budget categories double-count in every report
    let mut stmt = conn.prepare(
        "SELECT category, COUNT(*) FROM budgets WHERE user_id=?1
         GROUP BY category HAVING COUNT(*) > 1",
    )?;
    let mut cur = stmt.query(params![user_id])?;
    while let Some(r) = cur.next()? {
        let cat: String = r.get(0)?;
        let n: i64 = r.get(1)?;
        rows.push(vec!["duplicate_budget_category".into(), format!("{} ({}x)", cat, n)]);
    }

    // 2) Goals sharing a keyword: only the first ever receives credits
    let goals = store::list_goals(conn, user_id)?;
    let mut by_keyword: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for g in &goals {
        by_keyword.entry(goal_keyword(&g.name)).or_default().push(&g.name);
    }
    for (kw, names) in by_keyword {
        if names.len() > 1 {
            rows.push(vec![
                "ambiguous_goal_keyword".into(),
                format!("'{}': {}", kw, names.join(", ")),
            ]);
        }
    }

    // 3) Over-target goals (credits are applied without a cap)
    for g in &goals {
        if g.current_amount > g.target_amount {
            rows.push(vec![
                "goal_over_target".into(),
                format!("{} ({} of {})", g.name, g.current_amount, g.target_amount),
            ]);
        }
    }

    // 4) Credits that outlived their goal
    let mut stmt2 = conn.prepare(
        "SELECT t.id, t.goal_id FROM transactions t
         LEFT JOIN goals g ON t.goal_id = g.id
         WHERE t.user_id=?1 AND t.goal_id IS NOT NULL AND g.id IS NULL",
    )?;
    let mut cur2 = stmt2.query(params![user_id])?;
    while let Some(r) = cur2.next()? {
        let tid: i64 = r.get(0)?;
        let gid: i64 = r.get(1)?;
        rows.push(vec![
            "dangling_goal_reference".into(),
            format!("transaction {} -> goal {}", tid, gid),
        ]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
