//! Backend Module
//!
//! The key-value store seam. `Backend` covers the command subset the cache
//! and its instrumentation need; `RedisBackend` talks to a Redis server and
//! `MemoryBackend` keeps the same semantics in process.

mod memory;
mod remote;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::MemoryBackend;
pub use remote::RedisBackend;

// == Backend Trait ==
/// Commands the backing store must support.
///
/// Implementations are cheap handles (`Clone`) onto shared state, so the
/// cache and every instrumentation adapter can each hold one.
/// `incr` and `rpush` must be atomic at the store level.
#[async_trait]
pub trait Backend: Clone + Send + Sync + 'static {
    /// Removes every key from the selected database.
    async fn flush(&self) -> Result<()>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the value under `key`, or `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Increments the integer under `key` by one and returns the new value.
    /// An absent key counts as zero.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends `value` to the list under `key` and returns the new length.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// Returns the inclusive range `start..=stop` of the list under `key`.
    /// Negative indices count from the end; an absent key is an empty list.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;
}
