// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session as sess;
use crate::storage::Storage;
use anyhow::{Context, Result};

pub fn login(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    sess::login(store, email).with_context(|| format!("Could not start a session for '{}'", email))?;
    println!("Signed in as {}", email.trim().to_lowercase());
    Ok(())
}

pub fn logout(store: &dyn Storage) -> Result<()> {
    match sess::logout(store)? {
        Some(user) => println!("Signed out {}", user),
        None => println!("No active session"),
    }
    Ok(())
}

pub fn whoami(store: &dyn Storage) -> Result<()> {
    match sess::current_user(store)? {
        Some(user) => println!("{}", user),
        None => println!("No active session; records go to the shared store"),
    }
    Ok(())
}
