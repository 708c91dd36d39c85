//! Operation Module
//!
//! The interface shared by cache operations and the adapters that wrap them.

use std::borrow::Cow;
use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::backend::Backend;
use crate::cache::{Cache, Value};
use crate::error::Result;

// == Operation Identity ==
/// Stable name of an operation, used to namespace its counter and history keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationId(Cow<'static, str>);

impl OperationId {
    /// Identity of [`StoreOp`].
    pub const STORE: OperationId = OperationId::new("Cache.store");
    /// Identity of [`GetStrOp`].
    pub const GET_STR: OperationId = OperationId::new("Cache.get_str");
    /// Identity of [`GetIntOp`].
    pub const GET_INT: OperationId = OperationId::new("Cache.get_int");

    /// Creates an identifier from a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates an identifier from a runtime name.
    pub fn owned(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the call counter.
    pub fn counter_key(&self) -> String {
        self.as_str().to_string()
    }

    /// Key of the list of serialized call arguments.
    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.0)
    }

    /// Key of the list of serialized call results.
    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.0)
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Operation Trait ==
/// A callable cache operation.
///
/// `Args` is the tuple of positional arguments; both it and `Output` are
/// serialized into the call history.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Positional arguments, as a tuple.
    type Args: Serialize + Send + 'static;
    /// Result of a successful call.
    type Output: Serialize + Send + 'static;

    /// Identity used for the counter and history keys.
    fn id(&self) -> &OperationId;

    /// Runs the operation.
    async fn call(&self, args: Self::Args) -> Result<Self::Output>;
}

// == Cache Operations ==
/// [`Cache::store`] as an operation.
#[derive(Debug, Clone)]
pub struct StoreOp<B: Backend> {
    cache: Cache<B>,
    id: OperationId,
}

impl<B: Backend> StoreOp<B> {
    /// Binds the operation to `cache`.
    pub fn new(cache: Cache<B>) -> Self {
        Self {
            cache,
            id: OperationId::STORE,
        }
    }
}

#[async_trait]
impl<B: Backend> Operation for StoreOp<B> {
    type Args = (Value,);
    type Output = String;

    fn id(&self) -> &OperationId {
        &self.id
    }

    async fn call(&self, args: Self::Args) -> Result<String> {
        let (value,) = args;
        self.cache.store(value).await
    }
}

/// [`Cache::get_str`] as an operation.
#[derive(Debug, Clone)]
pub struct GetStrOp<B: Backend> {
    cache: Cache<B>,
    id: OperationId,
}

impl<B: Backend> GetStrOp<B> {
    /// Binds the operation to `cache`.
    pub fn new(cache: Cache<B>) -> Self {
        Self {
            cache,
            id: OperationId::GET_STR,
        }
    }
}

#[async_trait]
impl<B: Backend> Operation for GetStrOp<B> {
    type Args = (String,);
    type Output = Option<String>;

    fn id(&self) -> &OperationId {
        &self.id
    }

    async fn call(&self, args: Self::Args) -> Result<Option<String>> {
        let (key,) = args;
        self.cache.get_str(&key).await
    }
}

/// [`Cache::get_int`] as an operation.
#[derive(Debug, Clone)]
pub struct GetIntOp<B: Backend> {
    cache: Cache<B>,
    id: OperationId,
}

impl<B: Backend> GetIntOp<B> {
    /// Binds the operation to `cache`.
    pub fn new(cache: Cache<B>) -> Self {
        Self {
            cache,
            id: OperationId::GET_INT,
        }
    }
}

#[async_trait]
impl<B: Backend> Operation for GetIntOp<B> {
    type Args = (String,);
    type Output = Option<i64>;

    fn id(&self) -> &OperationId {
        &self.id
    }

    async fn call(&self, args: Self::Args) -> Result<Option<i64>> {
        let (key,) = args;
        self.cache.get_int(&key).await
    }
}
