//! Instrumentation Module
//!
//! Call counting and call history for cache operations, composed explicitly:
//! each adapter wraps an [`Operation`] and is itself an [`Operation`] with the
//! same identity, so adapters stack in any order at construction time.
//!
//! # Keys
//! - `<id>` - call counter
//! - `<id>:inputs` - JSON-encoded argument tuples, one per call
//! - `<id>:outputs` - JSON-encoded results, one per completed call

mod counter;
mod history;
mod operation;
mod replay;

pub use counter::CountCalls;
pub use history::CallHistory;
pub use operation::{GetIntOp, GetStrOp, Operation, OperationId, StoreOp};
pub use replay::{replay, replay_to, RecordedCall, Recorded, Replay};

use crate::backend::Backend;
use crate::cache::Cache;

/// An operation wrapped with history recording, then call counting.
///
/// The counter is the outer layer: it increments before the history records
/// the input, and still increments when the call fails.
pub type Instrumented<O, B> = CountCalls<CallHistory<O, B>, B>;

impl<B: Backend> Cache<B> {
    /// Wraps `op` with history recording and call counting on this cache's store.
    pub fn instrument<O: Operation>(&self, op: O) -> Instrumented<O, B> {
        let history = CallHistory::new(op, self.backend().clone());
        CountCalls::new(history, self.backend().clone())
    }

    /// [`Cache::store`] with call counting and history.
    pub fn instrumented_store(&self) -> Instrumented<StoreOp<B>, B> {
        self.instrument(StoreOp::new(self.clone()))
    }

    /// [`Cache::get_str`] with call counting and history.
    pub fn instrumented_get_str(&self) -> Instrumented<GetStrOp<B>, B> {
        self.instrument(GetStrOp::new(self.clone()))
    }

    /// [`Cache::get_int`] with call counting and history.
    pub fn instrumented_get_int(&self) -> Instrumented<GetIntOp<B>, B> {
        self.instrument(GetIntOp::new(self.clone()))
    }
}
