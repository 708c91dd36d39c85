//! Call History Recorder
//!
//! Appends the arguments and result of every call to two parallel lists.

use async_trait::async_trait;
use tracing::debug;

use crate::backend::Backend;
use crate::error::Result;
use crate::instrument::{Operation, OperationId, Recorded};

// == Call History ==
/// Records `<id>:inputs` and `<id>:outputs` around the wrapped operation.
///
/// The input is appended before the call and the output after it succeeds.
/// A failing call therefore leaves an input with no matching output; the
/// error itself is returned unchanged.
#[derive(Debug, Clone)]
pub struct CallHistory<O, B> {
    inner: O,
    backend: B,
}

impl<O: Operation, B: Backend> CallHistory<O, B> {
    /// Wraps `inner` with history recording in `backend`.
    pub fn new(inner: O, backend: B) -> Self {
        Self { inner, backend }
    }
}

#[async_trait]
impl<O: Operation, B: Backend> Operation for CallHistory<O, B> {
    type Args = O::Args;
    type Output = O::Output;

    fn id(&self) -> &OperationId {
        self.inner.id()
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output> {
        let id = self.id();

        let input = serde_json::to_vec(&args)?;
        let recorded = self.backend.rpush(&id.inputs_key(), &input).await?;

        let output = self.inner.call(args).await?;

        let encoded = serde_json::to_vec(&output)?;
        self.backend.rpush(&id.outputs_key(), &encoded).await?;
        debug!("Recorded {} call #{}", id, recorded);

        Ok(output)
    }
}

impl<O: Operation, B: Backend> Recorded for CallHistory<O, B> {
    type Recorder = B;

    fn recorder(&self) -> &B {
        &self.backend
    }
}
