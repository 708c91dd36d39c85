//! Redis Basic - A Redis-backed value cache with call instrumentation
//!
//! Stores values under generated keys, counts calls, records call history
//! and replays it.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;

pub use backend::{Backend, MemoryBackend, RedisBackend};
pub use cache::{Cache, Value};
pub use config::Config;
pub use error::{CacheError, Result};
pub use instrument::{
    CallHistory, CountCalls, Instrumented, Operation, OperationId, Recorded, Replay,
};
