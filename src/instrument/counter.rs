//! Call Counter
//!
//! Counts invocations of the wrapped operation in the backing store.

use async_trait::async_trait;
use tracing::debug;

use crate::backend::Backend;
use crate::cache::decode;
use crate::error::Result;
use crate::instrument::{Operation, OperationId, Recorded};

// == Count Calls ==
/// Increments `<id>` on every call, then delegates.
///
/// The result (or error) of the wrapped operation is returned unchanged.
#[derive(Debug, Clone)]
pub struct CountCalls<O, B> {
    inner: O,
    backend: B,
}

impl<O: Operation, B: Backend> CountCalls<O, B> {
    /// Wraps `inner` with call counting in `backend`.
    pub fn new(inner: O, backend: B) -> Self {
        Self { inner, backend }
    }

    /// Returns the recorded number of calls, zero if none were made.
    pub async fn calls(&self) -> Result<i64> {
        let key = self.inner.id().counter_key();
        let count = self.backend.get(&key).await?.map(decode::integer).transpose()?;
        Ok(count.unwrap_or(0))
    }
}

#[async_trait]
impl<O: Operation, B: Backend> Operation for CountCalls<O, B> {
    type Args = O::Args;
    type Output = O::Output;

    fn id(&self) -> &OperationId {
        self.inner.id()
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output> {
        let count = self.backend.incr(&self.id().counter_key()).await?;
        debug!("{} call #{}", self.id(), count);
        self.inner.call(args).await
    }
}

impl<O: Operation, B: Backend> Recorded for CountCalls<O, B> {
    type Recorder = B;

    fn recorder(&self) -> &B {
        &self.backend
    }
}
