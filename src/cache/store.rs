//! Cache Store Module
//!
//! Main cache engine: writes values under fresh keys and reads them back
//! through a decode strategy.

use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::{Backend, RedisBackend};
use crate::cache::{decode, Value};
use crate::config::Config;
use crate::error::Result;

// == Cache ==
/// Value cache over a backing store.
///
/// Clones share the backing store.
#[derive(Debug, Clone)]
pub struct Cache<B: Backend> {
    backend: B,
}

impl Cache<RedisBackend> {
    /// Connects to the Redis server described by `config` and creates a cache on it.
    ///
    /// Flushes the selected database, like [`Cache::new`].
    pub async fn connect(config: &Config) -> Result<Self> {
        let backend = RedisBackend::connect(config).await?;
        Self::new(backend).await
    }
}

impl<B: Backend> Cache<B> {
    // == Constructor ==
    /// Creates a cache on `backend`.
    ///
    /// Clears ALL existing data in the backing store first, so constructing
    /// a second cache on the same store wipes what the first one wrote.
    pub async fn new(backend: B) -> Result<Self> {
        backend.flush().await?;
        info!("Cache initialized, backing store flushed");
        Ok(Self { backend })
    }

    /// Returns the backing store handle.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // == Store ==
    /// Writes `value` under a freshly generated key and returns the key.
    pub async fn store(&self, value: impl Into<Value>) -> Result<String> {
        let value = value.into();
        let key = Uuid::new_v4().to_string();
        self.backend.set(&key, &value.to_bytes()).await?;
        debug!("Stored {} value under {}", value.kind(), key);
        Ok(key)
    }

    // == Get ==
    /// Returns the raw bytes under `key`, or `None` if the key is absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.get_with(key, decode::raw).await
    }

    /// Reads `key` and converts the bytes with `decode`.
    ///
    /// An absent key returns `None` without calling `decode`; decode errors
    /// are returned as-is.
    pub async fn get_with<T, F>(&self, key: &str, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        match self.backend.get(key).await? {
            Some(bytes) => decode(bytes).map(Some),
            None => {
                debug!("Key {} not found", key);
                Ok(None)
            }
        }
    }

    /// Reads `key` as UTF-8 text.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, decode::utf8).await
    }

    /// Reads `key` as a decimal integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, decode::integer).await
    }

    /// Reads `key` as a floating-point number.
    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, decode::float).await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::error::CacheError;

    async fn test_cache() -> Cache<MemoryBackend> {
        Cache::new(MemoryBackend::new()).await.unwrap()
    }

    #[tokio::test]
    async fn test_new_flushes_backend() {
        let backend = MemoryBackend::new();
        backend.set("stale", b"old").await.unwrap();

        let cache = Cache::new(backend.clone()).await.unwrap();
        assert!(backend.is_empty().await);
        assert_eq!(cache.get("stale").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_and_get_str() {
        let cache = test_cache().await;

        let key = cache.store("foo").await.unwrap();
        assert_eq!(cache.get_str(&key).await.unwrap(), Some("foo".to_string()));
        assert_eq!(cache.get(&key).await.unwrap(), Some(b"foo".to_vec()));
    }

    #[tokio::test]
    async fn test_store_and_get_int() {
        let cache = test_cache().await;

        let key = cache.store(123).await.unwrap();
        assert_eq!(cache.get_int(&key).await.unwrap(), Some(123));

        let key = cache.store(b"123".as_slice()).await.unwrap();
        assert_eq!(cache.get_int(&key).await.unwrap(), Some(123));
    }

    #[tokio::test]
    async fn test_store_and_get_float() {
        let cache = test_cache().await;

        let key = cache.store(2.5).await.unwrap();
        assert_eq!(cache.get_float(&key).await.unwrap(), Some(2.5));
    }

    #[tokio::test]
    async fn test_store_generates_unique_keys() {
        let cache = test_cache().await;

        let first = cache.store("same").await.unwrap();
        let second = cache.store("same").await.unwrap();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[tokio::test]
    async fn test_get_absent_key() {
        let cache = test_cache().await;

        assert_eq!(cache.get("missing").await.unwrap(), None);
        assert_eq!(cache.get_str("missing").await.unwrap(), None);
        assert_eq!(cache.get_int("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_absent_key_skips_decode() {
        let cache = test_cache().await;

        let result = cache
            .get_with("missing", |_| -> Result<()> { panic!("decode must not run") })
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_int_malformed_fails() {
        let cache = test_cache().await;

        let key = cache.store("not a number").await.unwrap();
        let result = cache.get_int(&key).await;
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[tokio::test]
    async fn test_get_with_custom_decoder() {
        let cache = test_cache().await;

        let key = cache.store("hello").await.unwrap();
        let len = cache.get_with(&key, |bytes| Ok(bytes.len())).await.unwrap();
        assert_eq!(len, Some(5));
    }
}
