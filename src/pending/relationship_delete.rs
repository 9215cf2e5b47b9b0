use smallvec::SmallVec;
use tracing::trace;

use crate::engine::CypherEngine;
use crate::entity::{EntityAccess, RelType};
use crate::error::Result;
use crate::value::CypherValue;

use super::{stored_identifier, PendingOperation};

/// Queued deletion of a relationship between two stored nodes.
///
/// With a target, deletes only the relationship connecting exactly this
/// source and this target. Without one, deletes the first-hop outgoing
/// relationship of the given type regardless of destination.
///
/// Endpoints are borrowed, not copied: label clauses and identifiers are
/// resolved when the flush reaches this unit, not when the session queues it.
pub struct PendingRelationshipDelete<'a> {
    source: &'a dyn EntityAccess,
    rel_type: RelType,
    target: Option<&'a dyn EntityAccess>,
    engine: &'a dyn CypherEngine,
}

impl<'a> PendingRelationshipDelete<'a> {
    /// Queue a delete of `rel_type` out of `source`, optionally pinned to
    /// `target`.
    pub fn new(
        source: &'a dyn EntityAccess,
        rel_type: RelType,
        target: Option<&'a dyn EntityAccess>,
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

impl PendingOperation for PendingRelationshipDelete<'_> {
    fn run(&self) -> Result<()> {
        let labels_from = self.source.entity_type().label_clause();

        let mut params: SmallVec<[CypherValue; 2]> = SmallVec::new();
        params.push(stored_identifier(self.source)?);

        let cypher = match self.target {
            Some(target) => {
                params.push(stored_identifier(target)?);
                let labels_to = target.entity_type().label_clause();
                format!(
                    "MATCH (from{labels_from} {{__id__: {{1}}}})-[r:{rel}]->(to{labels_to} {{__id__: {{2}}}}) DELETE r",
                    rel = self.rel_type,
                )
            }
            None => format!(
                "MATCH (from{labels_from} {{__id__: {{1}}}})-[r:{rel}]->() DELETE r",
                rel = self.rel_type,
            ),
        };

        trace!(
            rel_type = %self.rel_type,
            pinned = self.target.is_some(),
            "pending.relationship_delete.run"
        );
        self.engine.execute(&cypher, &params)
    }
}
