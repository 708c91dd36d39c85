//! Redis Backend
//!
//! Async Redis client over a managed, auto-reconnecting connection.

use std::fmt;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{debug, info};

use crate::backend::Backend;
use crate::config::Config;
use crate::error::Result;

// == Redis Backend ==
/// Handle onto a Redis server.
///
/// Cloning is cheap: clones multiplex over the same managed connection.
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
    url: String,
}

impl RedisBackend {
    // == Constructor ==
    /// Connects to the server described by `config`.
    ///
    /// Connection failures are returned as-is.
    pub async fn connect(config: &Config) -> Result<Self> {
        let url = config.redis_url();
        let client = Client::open(url.as_str())?;
        let manager = client.get_connection_manager().await?;
        info!("Connected to Redis at {}", url);

        Ok(Self { manager, url })
    }

    /// Returns the URL this backend is connected to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisBackend").field("url", &self.url).finish()
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn flush(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        debug!("FLUSHDB on {}", self.url);
        Ok(())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.manager.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.manager.clone();
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut conn = self.manager.clone();
        let len: usize = conn.rpush(key, value).await?;
        Ok(len)
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.manager.clone();
        let items: Vec<Vec<u8>> = conn.lrange(key, start, stop).await?;
        Ok(items)
    }
}
