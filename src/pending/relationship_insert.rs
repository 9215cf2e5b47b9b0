use smallvec::SmallVec;
use tracing::trace;

use crate::engine::CypherEngine;
use crate::entity::{EntityAccess, RelType};
use crate::error::Result;
use crate::value::CypherValue;

use super::{stored_identifier, PendingOperation};

/// Queued creation of a relationship between two stored nodes.
///
/// Unlike a delete, an insert always names both endpoints. MERGE keeps the
/// statement idempotent when the session queues the same edge twice.
pub struct PendingRelationshipInsert<'a> {
    source: &'a dyn EntityAccess,
    rel_type: RelType,
    target: &'a dyn EntityAccess,
    engine: &'a dyn CypherEngine,
}

impl<'a> PendingRelationshipInsert<'a> {
    /// Queue creation of `rel_type` from `source` to `target`.
    pub fn new(
        source: &'a dyn EntityAccess,
        rel_type: RelType,
        target: &'a dyn EntityAccess,
        engine: &'a dyn CypherEngine,
    ) -> Self {
        Self {
            source,
            rel_type,
            target,
            engine,
        }
    }
}

impl PendingOperation for PendingRelationshipInsert<'_> {
    fn run(&self) -> Result<()> {
        let labels_from = self.source.entity_type().label_clause();
        let labels_to = self.target.entity_type().label_clause();

        let mut params: SmallVec<[CypherValue; 2]> = SmallVec::new();
        params.push(stored_identifier(self.source)?);
        params.push(stored_identifier(self.target)?);

        let cypher = format!(
            "MATCH (from{labels_from} {{__id__: {{1}}}}), (to{labels_to} {{__id__: {{2}}}}) MERGE (from)-[:{rel}]->(to)",
            rel = self.rel_type,
        );

        trace!(rel_type = %self.rel_type, "pending.relationship_insert.run");
        self.engine.execute(&cypher, &params)
    }
}
