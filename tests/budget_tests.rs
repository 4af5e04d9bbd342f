// Copyright (c) FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finwise::{cli, commands::budgets, commands::goals, db, store};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO users(username,email,name,password) VALUES('ann','ann@example.com','Ann','pw')",
        [],
    )
    .unwrap();
    conn.execute("INSERT INTO settings(key,value) VALUES('current_user','1')", [])
        .unwrap();
    conn
}

fn run(conn: &Connection, top: &str, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["finwise", top];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (name, sub) = matches.subcommand().expect("subcommand");
    match name {
        "budget" => budgets::handle(conn, sub),
        "goal" => goals::handle(conn, sub),
        other => panic!("unexpected subcommand {}", other),
    }
}

#[test]
fn budget_set_creates_and_updates() {
    let conn = setup();
    run(&conn, "budget", &["set", "--category", "Groceries", "--amount", "4000"]).unwrap();
    run(
        &conn,
        "budget",
        &["set", "--id", "1", "--category", "Groceries", "--amount", "4500", "--icon", "cart"],
    )
    .unwrap();
    let b = &store::list_budgets(&conn, 1).unwrap()[0];
    assert_eq!(b.amount.to_string(), "4500");
    assert_eq!(b.icon, "cart");
}

#[test]
fn budget_set_rejects_non_positive_amount() {
    let conn = setup();
    let err = run(&conn, "budget", &["set", "--category", "Misc", "--amount", "0"]).unwrap_err();
    assert!(err.to_string().contains("positive"));
}

#[test]
fn duplicate_budget_categories_are_allowed_on_write() {
    let conn = setup();
    run(&conn, "budget", &["set", "--category", "Rent", "--amount", "1000"]).unwrap();
    run(&conn, "budget", &["set", "--category", "Rent", "--amount", "900"]).unwrap();
    assert_eq!(store::list_budgets(&conn, 1).unwrap().len(), 2);
}

#[test]
fn budget_rm_missing_id_is_not_found() {
    let conn = setup();
    let err = run(&conn, "budget", &["rm", "--id", "9"]).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn goal_add_and_edit_roundtrip() {
    let conn = setup();
    run(
        &conn,
        "goal",
        &["add", "--name", "Goa Trip with friends", "--target", "10000", "--date", "2026-01-01"],
    )
    .unwrap();
    run(&conn, "goal", &["edit", "--id", "1", "--current", "2500"]).unwrap();
    let g = &store::list_goals(&conn, 1).unwrap()[0];
    assert_eq!(g.current_amount.to_string(), "2500");
    assert_eq!(g.name, "Goa Trip with friends");
}

#[test]
fn goal_add_rejects_non_positive_target() {
    let conn = setup();
    let err = run(
        &conn,
        "goal",
        &["add", "--name", "Nope", "--target", "0", "--date", "2026-01-01"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("positive"));
}
