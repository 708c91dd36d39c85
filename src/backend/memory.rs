//! In-Memory Backend
//!
//! HashMap storage behind a shared lock, mirroring the Redis semantics of
//! the commands in [`Backend`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::Backend;
use crate::error::{CacheError, Result};

// == Slot ==
/// A stored value: either a plain string or a list.
#[derive(Debug, Clone)]
enum Slot {
    Bytes(Vec<u8>),
    List(Vec<Vec<u8>>),
}

// == Memory Backend ==
/// Process-local backing store.
///
/// Clones share the same data, like several connections to one server.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, Slot>>>,
}

impl MemoryBackend {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no keys are stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn flush(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        debug!("Flushed {} keys from memory backend", removed);
        Ok(())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), Slot::Bytes(value.to_vec()));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(Slot::Bytes(value)) => Ok(Some(value.clone())),
            Some(Slot::List(_)) => Err(CacheError::WrongType(key.to_string())),
            None => Ok(None),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        // Read-modify-write under one write guard keeps the increment atomic
        let mut entries = self.entries.write().await;
        let current = match entries.get(key) {
            Some(Slot::Bytes(value)) => std::str::from_utf8(value)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| CacheError::NotAnInteger(key.to_string()))?,
            Some(Slot::List(_)) => return Err(CacheError::WrongType(key.to_string())),
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| CacheError::NotAnInteger(key.to_string()))?;
        entries.insert(key.to_string(), Slot::Bytes(next.to_string().into_bytes()));
        Ok(next)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut entries = self.entries.write().await;
        let slot = entries
            .entry(key.to_string())
            .or_insert_with(|| Slot::List(Vec::new()));

        match slot {
            Slot::List(items) => {
                items.push(value.to_vec());
                Ok(items.len())
            }
            Slot::Bytes(_) => Err(CacheError::WrongType(key.to_string())),
        }
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(Slot::List(items)) => Ok(match list_bounds(items.len(), start, stop) {
                Some((from, to)) => items[from..=to].to_vec(),
                None => Vec::new(),
            }),
            Some(Slot::Bytes(_)) => Err(CacheError::WrongType(key.to_string())),
            None => Ok(Vec::new()),
        }
    }
}

// == Range Resolution ==
/// Resolves Redis-style inclusive list indices against a list of `len` items.
///
/// Returns `None` when the range selects nothing.
fn list_bounds(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if len == 0 || start > stop || start >= len || stop < 0 {
        return None;
    }
    Some((start as usize, stop as usize))
}
