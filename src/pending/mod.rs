//! Deferred units of work queued during a session and executed at flush.

mod relationship_delete;
mod relationship_insert;

pub use relationship_delete::PendingRelationshipDelete;
pub use relationship_insert::PendingRelationshipInsert;

use tracing::debug;

use crate::entity::EntityAccess;
use crate::error::{OgmaError, Result};
use crate::value::CypherValue;

/// A queued mutation executed exactly once during flush.
///
/// `run` issues the unit's single statement against its engine and returns
/// whatever the engine returned. Units retain no state worth keeping
/// afterwards; the queue discards them once flushed.
pub trait PendingOperation {
    /// Issue the operation's statement.
    fn run(&self) -> Result<()>;
}

/// Resolve an entity's stored identifier, rejecting unsaved entities before
/// any statement is built.
fn stored_identifier(entity: &dyn EntityAccess) -> Result<CypherValue> {
    let id = entity.identifier();
    if id.is_null() {
        return Err(OgmaError::MissingIdentifier);
    }
    Ok(id)
}

/// Ordered list of pending operations held by a flush coordinator.
///
/// Operations run in insertion order. The queue is single-use: `flush`
/// consumes it, and a failure aborts the remainder.
#[derive(Default)]
pub struct FlushQueue<'a> {
    ops: Vec<Box<dyn PendingOperation + 'a>>,
}

impl<'a> FlushQueue<'a> {
    /// Empty queue.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Append an operation to the end of the queue.
    pub fn push(&mut self, op: impl PendingOperation + 'a) {
        self.ops.push(Box::new(op));
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Run every queued operation in insertion order.
    ///
    /// Stops at the first failure and returns it unchanged; operations queued
    /// after the failed one are dropped with the queue.
    pub fn flush(self) -> Result<()> {
        debug!(n_ops = self.ops.len(), "flush.start");
        for op in self.ops {
            op.run()?;
        }
        Ok(())
    }
}
