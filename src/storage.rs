// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! String key-value storage and the per-user namespacing layered over it.
//!
//! Every collection is persisted as a JSON array under a bare key such as
//! `expenses`. Callers never build namespaced keys themselves: they receive a
//! [`Storage`] that is already bound to the active user (see
//! [`crate::session::scoped`]).

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::debug;

/// Keys shared by every user on the same store.
pub const EXEMPT_KEYS: [&str; 2] = ["users", "current_user"];

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl Storage for Connection {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let v = self
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.execute(
            "INSERT INTO kv(key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            params![key, value],
        )?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(())
    }
}

/// Volatile store, handy for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw keys currently held, namespaced or not.
    pub fn keys(&self) -> Vec<String> {
        self.map.borrow().keys().cloned().collect()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}

/// A store bound to one user at construction time. Keys are rewritten to
/// `{email}_{key}`, except for [`EXEMPT_KEYS`].
pub struct UserStorage<'a> {
    inner: &'a dyn Storage,
    email: String,
}

impl<'a> UserStorage<'a> {
    pub fn new(inner: &'a dyn Storage, email: &str) -> Self {
        Self {
            inner,
            email: email.trim().to_string(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn namespaced(&self, key: &str) -> String {
        if EXEMPT_KEYS.contains(&key) {
            key.to_string()
        } else {
            format!("{}_{}", self.email, key)
        }
    }
}

impl Storage for UserStorage<'_> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(&self.namespaced(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set(&self.namespaced(key), value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(&self.namespaced(key))
    }
}

/// Reads a JSON array stored under `key`; a missing key is an empty collection.
pub fn load<T: DeserializeOwned>(store: &dyn Storage, key: &str) -> Result<Vec<T>> {
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}

/// Replaces the whole collection stored under `key`.
pub fn save<T: Serialize>(store: &dyn Storage, key: &str, items: &[T]) -> Result<()> {
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)
}
