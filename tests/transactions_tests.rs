// Copyright (c) 2025 FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finwise::{cli, commands::transactions, db, store};
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

fn run_tx(conn: &mut Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["finwise", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(conn, sub)
}

#[test]
fn add_records_transaction_and_credits_matching_goal() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO goals(user_id,name,target_amount,current_amount,target_date) \
         VALUES(1,'Goa Trip with friends','10000','1000','2026-01-01')",
        [],
    )
    .unwrap();

    run_tx(
        &mut conn,
        &[
            "add", "--date", "2024-03-15", "--description", "Flight tickets", "--amount", "500",
            "--kind", "expense", "--category", "Goa",
        ],
    )
    .unwrap();

    let current: String = conn
        .query_row("SELECT current_amount FROM goals WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(current, "1500");
    let goal_id: Option<i64> = conn
        .query_row("SELECT goal_id FROM transactions LIMIT 1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(goal_id, Some(1));
}

#[test]
fn add_income_does_not_credit_goals() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO goals(user_id,name,target_amount,current_amount,target_date) \
         VALUES(1,'Goa Trip','10000','1000','2026-01-01')",
        [],
    )
    .unwrap();

    run_tx(
        &mut conn,
        &[
            "add", "--date", "2024-03-15", "--description", "Refund", "--amount", "500", "--kind",
            "income", "--category", "Goa",
        ],
    )
    .unwrap();

    let current: String = conn
        .query_row("SELECT current_amount FROM goals WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(current, "1000");
}

#[test]
fn add_rejects_non_positive_amount() {
    let mut conn = setup();
    let err = run_tx(
        &mut conn,
        &[
            "add", "--date", "2024-03-15", "--description", "Bad", "--amount", "-5", "--kind",
            "expense", "--category", "Misc",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("positive"));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn list_limit_respected_newest_first() {
    let mut conn = setup();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(user_id,date,description,amount,kind,category) \
             VALUES(1,?1,'P','10','expense','Misc')",
            [format!("2024-01-0{}", i)],
        )
        .unwrap();
    }
    let matches =
        cli::build_cli().get_matches_from(["finwise", "tx", "list", "--limit", "2"]);
    let Some(("tx", tx_m)) = matches.subcommand() else { panic!("no tx") };
    let Some(("list", list_m)) = tx_m.subcommand() else { panic!("no list") };
    let rows = transactions::query_rows(&conn, list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2024-01-03");
}

#[test]
fn rm_missing_id_is_not_found() {
    let mut conn = setup();
    let err = run_tx(&mut conn, &["rm", "--id", "42"]).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn deleting_matched_transaction_keeps_goal_credit() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO goals(user_id,name,target_amount,current_amount,target_date) \
         VALUES(1,'Goa Trip','10000','0','2026-01-01')",
        [],
    )
    .unwrap();
    run_tx(
        &mut conn,
        &[
            "add", "--date", "2024-03-15", "--description", "Hotel", "--amount", "300", "--kind",
            "expense", "--category", "Goa",
        ],
    )
    .unwrap();
    let tx_id: i64 = conn
        .query_row("SELECT id FROM transactions LIMIT 1", [], |r| r.get(0))
        .unwrap();

    run_tx(&mut conn, &["rm", "--id", &tx_id.to_string()]).unwrap();

    // The credit is never rolled back on delete.
    let current: String = conn
        .query_row("SELECT current_amount FROM goals WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(current, "300");
}

#[test]
fn edit_does_not_recompute_goal_credit() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO goals(user_id,name,target_amount,current_amount,target_date) \
         VALUES(1,'Goa Trip','10000','0','2026-01-01')",
        [],
    )
    .unwrap();
    run_tx(
        &mut conn,
        &[
            "add", "--date", "2024-03-15", "--description", "Hotel", "--amount", "300", "--kind",
            "expense", "--category", "Goa",
        ],
    )
    .unwrap();
    run_tx(&mut conn, &["edit", "--id", "1", "--amount", "900"]).unwrap();

    let current: String = conn
        .query_row("SELECT current_amount FROM goals WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(current, "300");

    let user_id = store::require_current_user(&conn).unwrap();
    let t = store::get_transaction(&conn, user_id, 1).unwrap();
    assert_eq!(t.amount.to_string(), "900");
}
