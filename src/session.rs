// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Active-user tracking. Credentials live with the external auth provider;
//! this module only remembers who is signed in and hands out a store bound
//! to that user.

use crate::error::{Error, Result};
use crate::storage::{self, Storage, UserStorage};
use tracing::info;

const CURRENT_USER_KEY: &str = "current_user";
const USERS_KEY: &str = "users";

pub fn current_user(store: &dyn Storage) -> Result<Option<String>> {
    Ok(store
        .get(CURRENT_USER_KEY)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

pub fn known_users(store: &dyn Storage) -> Result<Vec<String>> {
    storage::load(store, USERS_KEY)
}

fn valid_hostname(domain: &str) -> bool {
    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Keys are namespaced as `{email}_{key}`, so the domain must not contain
/// `_`; otherwise `a@b_business` would read the business book of `a@b`.
fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !local.chars().any(char::is_whitespace) && valid_hostname(domain)
        }
        None => false,
    }
}

pub fn login(store: &dyn Storage, email: &str) -> Result<()> {
    let email = email.trim().to_lowercase();
    if !valid_email(&email) {
        return Err(Error::Validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    let mut users = known_users(store)?;
    if !users.contains(&email) {
        users.push(email.clone());
        storage::save(store, USERS_KEY, &users)?;
    }
    store.set(CURRENT_USER_KEY, &email)?;
    info!(user = %email, "session started");
    Ok(())
}

pub fn logout(store: &dyn Storage) -> Result<Option<String>> {
    let prev = current_user(store)?;
    store.remove(CURRENT_USER_KEY)?;
    if let Some(ref u) = prev {
        info!(user = %u, "session ended");
    }
    Ok(prev)
}

/// Either the shared store or one bound to the signed-in user.
pub enum Scoped<'a> {
    Shared(&'a dyn Storage),
    User(UserStorage<'a>),
}

impl Scoped<'_> {
    pub fn user(&self) -> Option<&str> {
        match self {
            Scoped::Shared(_) => None,
            Scoped::User(u) => Some(u.email()),
        }
    }
}

impl Storage for Scoped<'_> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Scoped::Shared(s) => s.get(key),
            Scoped::User(u) => u.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Scoped::Shared(s) => s.set(key, value),
            Scoped::User(u) => u.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self {
            Scoped::Shared(s) => s.remove(key),
            Scoped::User(u) => u.remove(key),
        }
    }
}

/// Without an active session keys are read and written unnamespaced.
pub fn scoped(store: &dyn Storage) -> Result<Scoped<'_>> {
    Ok(match current_user(store)? {
        Some(email) => Scoped::User(UserStorage::new(store, &email)),
        None => Scoped::Shared(store),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn partition_follows_active_session() {
        let mem = MemoryStorage::new();
        login(&mem, "u1@example.com").unwrap();
        scoped(&mem).unwrap().set("incomes", "V").unwrap();

        login(&mem, "u2@example.com").unwrap();
        assert_eq!(scoped(&mem).unwrap().get("incomes").unwrap(), None);

        login(&mem, "u1@example.com").unwrap();
        assert_eq!(
            scoped(&mem).unwrap().get("incomes").unwrap().as_deref(),
            Some("V")
        );
    }

    #[test]
    fn logout_falls_back_to_shared_keys() {
        let mem = MemoryStorage::new();
        login(&mem, "u1@example.com").unwrap();
        assert_eq!(logout(&mem).unwrap().as_deref(), Some("u1@example.com"));
        let s = scoped(&mem).unwrap();
        assert!(s.user().is_none());
        s.set("incomes", "shared").unwrap();
        assert_eq!(mem.get("incomes").unwrap().as_deref(), Some("shared"));
    }

    #[test]
    fn login_registers_user_once() {
        let mem = MemoryStorage::new();
        login(&mem, " Ana@Example.com ").unwrap();
        login(&mem, "ana@example.com").unwrap();
        assert_eq!(known_users(&mem).unwrap(), vec!["ana@example.com"]);
        assert!(login(&mem, "not-an-email").is_err());
    }

    #[test]
    fn email_domain_must_be_a_hostname() {
        assert!(valid_email("ana.b_c@mail.example-co.com"));
        for bad in ["u@x_business", "u@x_personal", "@x.com", "u@", "u@a..b", "u@-x.com", "u@x@y"] {
            assert!(!valid_email(bad), "{} accepted", bad);
        }
    }
}
