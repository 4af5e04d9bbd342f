// Copyright (c) FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finwise::{commands::doctor, db};
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

#[test]
fn doctor_runs_clean_on_empty_data() {
    let conn = setup();
    doctor::handle(&conn).unwrap();
}

#[test]
fn doctor_tolerates_every_known_inconsistency() {
    let conn = setup();
    conn.execute_batch(
        r#"
        INSERT INTO budgets(user_id,category,amount) VALUES(1,'Rent','1000');
        INSERT INTO budgets(user_id,category,amount) VALUES(1,'Rent','900');
        INSERT INTO goals(user_id,name,target_amount,current_amount,target_date)
            VALUES(1,'Car Loan','5000','0','2026-01-01');
        INSERT INTO goals(user_id,name,target_amount,current_amount,target_date)
            VALUES(1,'Car Insurance','1000','1200','2026-01-01');
        INSERT INTO transactions(user_id,date,description,amount,kind,category,goal_id)
            VALUES(1,'2024-03-01','Orphaned credit','50','expense','Car',99);
        "#,
    )
    .unwrap();
    // duplicate category, colliding keyword, over-target goal, dangling
    // goal reference: the report must surface all four without failing
    doctor::handle(&conn).unwrap();
}
