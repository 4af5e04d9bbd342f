// Copyright (c) 2025 FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user CRUD over the SQLite store. Everything takes `&Connection`, so
//! the same helpers run inside an open `rusqlite::Transaction` where a
//! command needs the dual write (transaction insert + goal credit) to be
//! atomic.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::error::Error;
use crate::models::{Budget, Frequency, Goal, Recurring, Transaction, TxKind, User};

// --- session -------------------------------------------------------------

pub fn current_user_id(conn: &Connection) -> Result<Option<i64>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='current_user'", [], |r| r.get(0))
        .optional()?;
    match v {
        Some(s) => Ok(Some(
            s.parse::<i64>()
                .with_context(|| format!("Invalid current_user value '{}'", s))?,
        )),
        None => Ok(None),
    }
}

pub fn require_current_user(conn: &Connection) -> Result<i64> {
    current_user_id(conn)?
        .ok_or_else(|| anyhow::anyhow!("No user logged in (run 'finwise user login')"))
}

pub fn set_current_user(conn: &Connection, user_id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('current_user', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![user_id.to_string()],
    )?;
    Ok(())
}

pub fn clear_current_user(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key='current_user'", [])?;
    Ok(())
}

// --- users ---------------------------------------------------------------

pub fn insert_user(
    conn: &Connection,
    username: &str,
    email: &str,
    name: &str,
    password: &str,
    date_of_birth: Option<NaiveDate>,
    account_type: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO users(username, email, name, password, date_of_birth, account_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            username,
            email,
            name,
            password,
            date_of_birth.map(|d| d.to_string()),
            account_type
        ],
    )
    .with_context(|| format!("Create user '{}'", username))?;
    Ok(conn.last_insert_rowid())
}

/// Returns the user and the stored password for login checks.
pub fn find_user(conn: &Connection, username: &str) -> Result<Option<(User, String)>> {
    let row: Option<(i64, String, String, String, String, Option<String>, String)> = conn
        .query_row(
            "SELECT id, username, email, name, password, date_of_birth, account_type
             FROM users WHERE username=?1",
            params![username],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                ))
            },
        )
        .optional()?;
    let Some((id, username, email, name, password, dob, account_type)) = row else {
        return Ok(None);
    };
    let date_of_birth = match dob {
        Some(s) => Some(
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .with_context(|| format!("Invalid date_of_birth '{}' for user {}", s, id))?,
        ),
        None => None,
    };
    Ok(Some((
        User { id, username, email, name, date_of_birth, account_type },
        password,
    )))
}

pub fn user_by_id(conn: &Connection, id: i64) -> Result<User> {
    let row: Option<(String, String, String, Option<String>, String)> = conn
        .query_row(
            "SELECT username, email, name, date_of_birth, account_type FROM users WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
        .optional()?;
    let (username, email, name, dob, account_type) = row.ok_or(Error::NotFound {
        entity: "user",
        id: id.to_string(),
    })?;
    let date_of_birth = match dob {
        Some(s) => Some(
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .with_context(|| format!("Invalid date_of_birth '{}' for user {}", s, id))?,
        ),
        None => None,
    };
    Ok(User { id, username, email, name, date_of_birth, account_type })
}

// --- transactions --------------------------------------------------------

fn tx_from_parts(
    id: i64,
    user_id: i64,
    date: String,
    description: String,
    amount: String,
    kind: String,
    category: String,
    goal_id: Option<i64>,
) -> Result<Transaction> {
    Ok(Transaction {
        id,
        user_id,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' on transaction {}", date, id))?,
        description,
        amount: amount
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' on transaction {}", amount, id))?,
        kind: TxKind::parse(&kind)?,
        category,
        goal_id,
    })
}

pub fn list_transactions(conn: &Connection, user_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, description, amount, kind, category, goal_id
         FROM transactions WHERE user_id=?1 ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, Option<i64>>(6)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, date, desc, amount, kind, category, goal_id) = row?;
        out.push(tx_from_parts(id, user_id, date, desc, amount, kind, category, goal_id)?);
    }
    Ok(out)
}

pub fn get_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<Transaction> {
    let row: Option<(String, String, String, String, String, Option<i64>)> = conn
        .query_row(
            "SELECT date, description, amount, kind, category, goal_id
             FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, user_id],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                ))
            },
        )
        .optional()?;
    let (date, desc, amount, kind, category, goal_id) = row.ok_or(Error::NotFound {
        entity: "transaction",
        id: id.to_string(),
    })?;
    tx_from_parts(id, user_id, date, desc, amount, kind, category, goal_id)
}

pub fn insert_transaction(
    conn: &Connection,
    user_id: i64,
    date: NaiveDate,
    description: &str,
    amount: Decimal,
    kind: TxKind,
    category: &str,
    goal_id: Option<i64>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(user_id, date, description, amount, kind, category, goal_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            date.to_string(),
            description,
            amount.to_string(),
            kind.as_str(),
            category,
            goal_id
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Full-row update; the caller fetches, applies edits, and writes back.
/// Never touches goal accumulators.
pub fn update_transaction(conn: &Connection, t: &Transaction) -> Result<()> {
    let n = conn.execute(
        "UPDATE transactions SET date=?1, description=?2, amount=?3, kind=?4, category=?5
         WHERE id=?6 AND user_id=?7",
        params![
            t.date.to_string(),
            t.description,
            t.amount.to_string(),
            t.kind.as_str(),
            t.category,
            t.id,
            t.user_id
        ],
    )?;
    if n == 0 {
        return Err(Error::NotFound { entity: "transaction", id: t.id.to_string() }.into());
    }
    Ok(())
}

pub fn delete_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        return Err(Error::NotFound { entity: "transaction", id: id.to_string() }.into());
    }
    Ok(())
}

// --- budgets -------------------------------------------------------------

pub fn list_budgets(conn: &Connection, user_id: i64) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare(
        "SELECT id, category, amount, icon FROM budgets WHERE user_id=?1 ORDER BY category, id",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, category, amount, icon) = row?;
        out.push(Budget {
            id,
            user_id,
            category,
            amount: amount
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' on budget {}", amount, id))?,
            icon,
        });
    }
    Ok(out)
}

pub fn insert_budget(
    conn: &Connection,
    user_id: i64,
    category: &str,
    amount: Decimal,
    icon: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO budgets(user_id, category, amount, icon) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, category, amount.to_string(), icon],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_budget(
    conn: &Connection,
    user_id: i64,
    id: i64,
    category: &str,
    amount: Decimal,
    icon: &str,
) -> Result<()> {
    let n = conn.execute(
        "UPDATE budgets SET category=?1, amount=?2, icon=?3 WHERE id=?4 AND user_id=?5",
        params![category, amount.to_string(), icon, id, user_id],
    )?;
    if n == 0 {
        return Err(Error::NotFound { entity: "budget", id: id.to_string() }.into());
    }
    Ok(())
}

pub fn delete_budget(conn: &Connection, user_id: i64, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM budgets WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        return Err(Error::NotFound { entity: "budget", id: id.to_string() }.into());
    }
    Ok(())
}

// --- goals ---------------------------------------------------------------

/// Goals in id order; the contribution matcher's "first match wins" depends
/// on this ordering being stable.
pub fn list_goals(conn: &Connection, user_id: i64) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target_amount, current_amount, target_date
         FROM goals WHERE user_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, target, current, date) = row?;
        out.push(Goal {
            id,
            user_id,
            name,
            target_amount: target
                .parse::<Decimal>()
                .with_context(|| format!("Invalid target_amount '{}' on goal {}", target, id))?,
            current_amount: current
                .parse::<Decimal>()
                .with_context(|| format!("Invalid current_amount '{}' on goal {}", current, id))?,
            target_date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid target_date '{}' on goal {}", date, id))?,
        });
    }
    Ok(out)
}

pub fn insert_goal(
    conn: &Connection,
    user_id: i64,
    name: &str,
    target_amount: Decimal,
    current_amount: Decimal,
    target_date: NaiveDate,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO goals(user_id, name, target_amount, current_amount, target_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user_id,
            name,
            target_amount.to_string(),
            current_amount.to_string(),
            target_date.to_string()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_goal(conn: &Connection, g: &Goal) -> Result<()> {
    let n = conn.execute(
        "UPDATE goals SET name=?1, target_amount=?2, current_amount=?3, target_date=?4
         WHERE id=?5 AND user_id=?6",
        params![
            g.name,
            g.target_amount.to_string(),
            g.current_amount.to_string(),
            g.target_date.to_string(),
            g.id,
            g.user_id
        ],
    )?;
    if n == 0 {
        return Err(Error::NotFound { entity: "goal", id: g.id.to_string() }.into());
    }
    Ok(())
}

/// Read-modify-write credit on a goal's accumulator. Call inside the same
/// SQLite transaction as the transaction insert.
pub fn credit_goal(conn: &Connection, user_id: i64, goal_id: i64, amount: Decimal) -> Result<()> {
    let current: Option<String> = conn
        .query_row(
            "SELECT current_amount FROM goals WHERE id=?1 AND user_id=?2",
            params![goal_id, user_id],
            |r| r.get(0),
        )
        .optional()?;
    let current = current.ok_or(Error::NotFound { entity: "goal", id: goal_id.to_string() })?;
    let new_amount = current
        .parse::<Decimal>()
        .with_context(|| format!("Invalid current_amount '{}' on goal {}", current, goal_id))?
        + amount;
    conn.execute(
        "UPDATE goals SET current_amount=?1 WHERE id=?2 AND user_id=?3",
        params![new_amount.to_string(), goal_id, user_id],
    )?;
    Ok(())
}

pub fn delete_goal(conn: &Connection, user_id: i64, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM goals WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        return Err(Error::NotFound { entity: "goal", id: id.to_string() }.into());
    }
    Ok(())
}

// --- recurring -----------------------------------------------------------

pub fn list_recurring(conn: &Connection, user_id: i64) -> Result<Vec<Recurring>> {
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, kind, category, frequency, day_of_month
         FROM recurring WHERE user_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, Option<u32>>(6)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, description, amount, kind, category, frequency, day_of_month) = row?;
        out.push(Recurring {
            id,
            user_id,
            description,
            amount: amount
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' on recurring {}", amount, id))?,
            kind: TxKind::parse(&kind)?,
            category,
            frequency: Frequency::parse(&frequency)?,
            day_of_month,
        });
    }
    Ok(out)
}

pub fn insert_recurring(
    conn: &Connection,
    user_id: i64,
    description: &str,
    amount: Decimal,
    kind: TxKind,
    category: &str,
    frequency: Frequency,
    day_of_month: Option<u32>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO recurring(user_id, description, amount, kind, category, frequency, day_of_month)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            description,
            amount.to_string(),
            kind.as_str(),
            category,
            frequency.as_str(),
            day_of_month
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_recurring(conn: &Connection, r: &Recurring) -> Result<()> {
    let n = conn.execute(
        "UPDATE recurring SET description=?1, amount=?2, kind=?3, category=?4, frequency=?5, day_of_month=?6
         WHERE id=?7 AND user_id=?8",
        params![
            r.description,
            r.amount.to_string(),
            r.kind.as_str(),
            r.category,
            r.frequency.as_str(),
            r.day_of_month,
            r.id,
            r.user_id
        ],
    )?;
    if n == 0 {
        return Err(Error::NotFound { entity: "recurring", id: r.id.to_string() }.into());
    }
    Ok(())
}

pub fn delete_recurring(conn: &Connection, user_id: i64, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM recurring WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        return Err(Error::NotFound { entity: "recurring", id: id.to_string() }.into());
    }
    Ok(())
}
