//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its instrumentation.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Error reported by the Redis client (connection, protocol or server error)
    #[error("Backend error: {0}")]
    Backend(#[from] redis::RedisError),

    /// Command issued against a key holding the wrong kind of value
    #[error("WRONGTYPE operation against key holding the wrong kind of value: {0}")]
    WrongType(String),

    /// Increment on a value that is not a decimal integer
    #[error("Value is not an integer or out of range: {0}")]
    NotAnInteger(String),

    /// Stored bytes could not be decoded into the requested type
    #[error("Decode error: {0}")]
    Decode(String),

    /// Call history entry could not be serialized or parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing a replay failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
