//! Replay Module
//!
//! Reads back the recorded history of an operation and renders it.

use std::fmt;
use std::io::{self, Write};

use async_trait::async_trait;
use serde_json::Value as Json;
use tracing::warn;

use crate::backend::Backend;
use crate::error::Result;
use crate::instrument::{Operation, OperationId};

// == Recorded Call ==
/// One recorded call: its arguments and, if the call completed, its result.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Positional arguments, as a JSON array
    pub args: Json,
    /// Result, or `None` if the call never completed
    pub output: Option<Json>,
}

// == Replay ==
/// The recorded history of one operation, in call order.
///
/// There is one call per recorded input. The count comes from the inputs
/// list, not from the call counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    /// Operation the history belongs to
    pub operation: OperationId,
    /// Recorded calls, oldest first
    pub calls: Vec<RecordedCall>,
}

impl Replay {
    /// Loads the history of `id` from `backend`. Read-only.
    pub async fn load<B: Backend>(backend: &B, id: &OperationId) -> Result<Self> {
        let inputs = backend.lrange(&id.inputs_key(), 0, -1).await?;
        let outputs = backend.lrange(&id.outputs_key(), 0, -1).await?;

        if inputs.len() != outputs.len() {
            warn!(
                "{} history is misaligned: {} inputs, {} outputs",
                id,
                inputs.len(),
                outputs.len()
            );
        }

        let mut outputs = outputs.into_iter();
        let calls = inputs
            .iter()
            .map(|input| -> Result<RecordedCall> {
                let args = serde_json::from_slice(input)?;
                let output = outputs
                    .next()
                    .map(|raw| serde_json::from_slice(&raw))
                    .transpose()?;
                Ok(RecordedCall { args, output })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            operation: id.clone(),
            calls,
        })
    }

    /// Returns the number of recorded calls.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Returns true if no calls were recorded.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.calls.len() == 1 { "" } else { "s" };
        writeln!(
            f,
            "{} was called {} time{}:",
            self.operation,
            self.calls.len(),
            plural
        )?;

        for call in &self.calls {
            write!(f, "{}(", self.operation)?;
            match &call.args {
                Json::Array(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", item)?;
                    }
                }
                other => write!(f, "{}", other)?,
            }
            match &call.output {
                Some(output) => writeln!(f, ") -> {}", output)?,
                None => writeln!(f, ") -> <no output recorded>")?,
            }
        }
        Ok(())
    }
}

// == Recorded ==
/// An instrumented operation bound to the backing store holding its history.
#[async_trait]
pub trait Recorded: Operation {
    /// Backing store type.
    type Recorder: Backend;

    /// Backing store the operation records into.
    fn recorder(&self) -> &Self::Recorder;

    /// Loads the recorded history from the operation's own backing store.
    async fn history(&self) -> Result<Replay> {
        Replay::load(self.recorder(), self.id()).await
    }
}

// == Replay Output ==
/// Writes the rendered history of `op` to `out`.
pub async fn replay_to<R, W>(op: &R, out: &mut W) -> Result<Replay>
where
    R: Recorded,
    W: Write,
{
    let replay = op.history().await?;
    write!(out, "{}", replay)?;
    out.flush()?;
    Ok(replay)
}

/// Prints the rendered history of `op` to stdout.
pub async fn replay<R: Recorded>(op: &R) -> Result<Replay> {
    let replay = op.history().await?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", replay)?;
    stdout.flush()?;
    Ok(replay)
}
