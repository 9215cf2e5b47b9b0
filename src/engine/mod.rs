//! The seam between queued operations and the graph store.

use parking_lot::Mutex;
use tracing::trace;

use crate::error::{OgmaError, Result};
use crate::value::CypherValue;

/// Executes parameterized Cypher against the underlying store.
///
/// Implementations block until the statement finishes. Pending operations
/// never inspect a result; whatever the engine raises is surfaced unchanged
/// to the flush coordinator.
pub trait CypherEngine {
    /// Run one statement with positionally bound parameters (`{1}`, `{2}`).
    fn execute(&self, cypher: &str, params: &[CypherValue]) -> Result<()>;
}

/// One statement observed by a [`RecordingEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    /// Statement text exactly as submitted.
    pub cypher: String,
    /// Bound parameters in positional order.
    pub params: Vec<CypherValue>,
}

/// Engine that records every statement instead of talking to a store.
///
/// Backs this crate's own tests and is useful downstream for asserting on
/// flush output. Can be armed to fail the next call, which exercises the
/// pass-through failure path.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<RecordedCall>>,
    fail_next: Mutex<Option<String>>,
}

impl RecordingEngine {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the recorder: the next `execute` fails with `message` and records
    /// nothing.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock() = Some(message.into());
    }

    /// Snapshot of the statements observed so far, in submission order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

impl CypherEngine for RecordingEngine {
    fn execute(&self, cypher: &str, params: &[CypherValue]) -> Result<()> {
        if let Some(message) = self.fail_next.lock().take() {
            return Err(OgmaError::Engine(message.into()));
        }
        trace!(stmt = cypher, n_params = params.len(), "engine.recording.execute");
        self.calls.lock().push(RecordedCall {
            cypher: cypher.to_owned(),
            params: params.to_vec(),
        });
        Ok(())
    }
}
