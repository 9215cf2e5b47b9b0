use ogma::engine::{CypherEngine, RecordingEngine};
use ogma::entity::{EntityRef, GraphEntityType, RelType};
use ogma::pending::{
    FlushQueue, PendingOperation, PendingRelationshipDelete, PendingRelationshipInsert,
};
use ogma::{CypherValue, OgmaError, Result};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

#[test]
fn delete_without_target_issues_the_unconstrained_shape() -> Result<()> {
    init_tracing();
    let person = GraphEntityType::with_name_label("Person")?;
    let source = EntityRef::new(&person, 42i64);
    let engine = RecordingEngine::new();

    let op = PendingRelationshipDelete::new(&source, RelType::new("KNOWS")?, None, &engine);
    op.run()?;

    let calls = engine.calls();
    assert_eq!(calls.len(), 1, "exactly one statement per unit");
    assert_eq!(
        calls[0].cypher,
        "MATCH (from:Person {__id__: {1}})-[r:KNOWS]->() DELETE r"
    );
    assert_eq!(calls[0].params, vec![CypherValue::Int(42)]);
    Ok(())
}

#[test]
fn delete_with_target_issues_the_pinned_shape() -> Result<()> {
    init_tracing();
    let person = GraphEntityType::with_name_label("Person")?;
    let company = GraphEntityType::with_name_label("Company")?;
    let source = EntityRef::new(&person, 42i64);
    let target = EntityRef::new(&company, 7i64);
    let engine = RecordingEngine::new();

    let op = PendingRelationshipDelete::new(
        &source,
        RelType::new("WORKS_AT")?,
        Some(&target),
        &engine,
    );
    op.run()?;

    let calls = engine.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].cypher,
        "MATCH (from:Person {__id__: {1}})-[r:WORKS_AT]->(to:Company {__id__: {2}}) DELETE r"
    );
    assert_eq!(
        calls[0].params,
        vec![CypherValue::Int(42), CypherValue::Int(7)]
    );
    Ok(())
}

#[test]
fn rel_type_token_is_verbatim_in_the_statement() -> Result<()> {
    let person = GraphEntityType::with_name_label("Person")?;
    let source = EntityRef::new(&person, 1i64);
    let engine = RecordingEngine::new();

    PendingRelationshipDelete::new(&source, RelType::new("_has_2_sides")?, None, &engine).run()?;

    assert!(engine.calls()[0].cypher.contains("-[r:_has_2_sides]->"));
    Ok(())
}

#[test]
fn string_identifiers_stay_bound_parameters() -> Result<()> {
    let doc = GraphEntityType::with_name_label("Document")?;
    let source = EntityRef::new(&doc, "doc-1) DELETE n //");
    let engine = RecordingEngine::new();

    PendingRelationshipDelete::new(&source, RelType::new("CITES")?, None, &engine).run()?;

    let calls = engine.calls();
    assert!(
        !calls[0].cypher.contains("doc-1"),
        "identifier must not leak into statement text"
    );
    assert_eq!(
        calls[0].params,
        vec![CypherValue::String("doc-1) DELETE n //".into())]
    );
    Ok(())
}

#[test]
fn engine_failure_propagates_unchanged() -> Result<()> {
    let person = GraphEntityType::with_name_label("Person")?;
    let source = EntityRef::new(&person, 42i64);
    let engine = RecordingEngine::new();
    engine.fail_next("constraint violation");

    let err = PendingRelationshipDelete::new(&source, RelType::new("KNOWS")?, None, &engine)
        .run()
        .unwrap_err();

    assert!(matches!(err, OgmaError::Engine(_)));
    assert!(err.to_string().contains("constraint violation"));
    assert!(engine.calls().is_empty(), "failed statement is not recorded");
    Ok(())
}

#[test]
fn unsaved_entity_fails_before_any_engine_call() -> Result<()> {
    let person = GraphEntityType::with_name_label("Person")?;
    let company = GraphEntityType::with_name_label("Company")?;
    let source = EntityRef::new(&person, 42i64);
    let unsaved = EntityRef::new(&company, CypherValue::Null);
    let engine = RecordingEngine::new();

    let err = PendingRelationshipDelete::new(
        &source,
        RelType::new("WORKS_AT")?,
        Some(&unsaved),
        &engine,
    )
    .run()
    .unwrap_err();

    assert!(matches!(err, OgmaError::MissingIdentifier));
    assert!(engine.calls().is_empty());
    Ok(())
}

#[test]
fn flush_runs_operations_in_insertion_order() -> Result<()> {
    init_tracing();
    let person = GraphEntityType::with_name_label("Person")?;
    let company = GraphEntityType::with_name_label("Company")?;
    let alice = EntityRef::new(&person, 1i64);
    let acme = EntityRef::new(&company, 2i64);
    let engine = RecordingEngine::new();

    let mut queue = FlushQueue::new();
    queue.push(PendingRelationshipInsert::new(
        &alice,
        RelType::new("WORKS_AT")?,
        &acme,
        &engine,
    ));
    queue.push(PendingRelationshipDelete::new(
        &alice,
        RelType::new("APPLIED_TO")?,
        Some(&acme),
        &engine,
    ));
    queue.push(PendingRelationshipDelete::new(
        &alice,
        RelType::new("KNOWS")?,
        None,
        &engine,
    ));
    assert_eq!(queue.len(), 3);
    queue.flush()?;

    let calls = engine.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].cypher.contains("MERGE (from)-[:WORKS_AT]->(to)"));
    assert!(calls[1].cypher.contains("[r:APPLIED_TO]->(to:Company"));
    assert!(calls[2].cypher.ends_with("[r:KNOWS]->() DELETE r"));
    Ok(())
}

#[test]
fn flush_stops_at_the_first_failure() -> Result<()> {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let person = GraphEntityType::with_name_label("Person")?;
    let alice = EntityRef::new(&person, 1i64);
    let bob = EntityRef::new(&person, 2i64);

    // Passes the first statement through to the recorder, fails every later
    // one. Tracks its own call count so the recorder stays a plain log.
    struct FailAfterFirst<'a> {
        inner: &'a RecordingEngine,
        calls: AtomicUsize,
    }
    impl CypherEngine for FailAfterFirst<'_> {
        fn execute(&self, cypher: &str, params: &[CypherValue]) -> Result<()> {
            if self.calls.fetch_add(1, Ordering::SeqCst) >= 1 {
                return Err(OgmaError::Engine("node locked".into()));
            }
            self.inner.execute(cypher, params)
        }
    }

    let recorder = RecordingEngine::new();
    let engine = FailAfterFirst {
        inner: &recorder,
        calls: AtomicUsize::new(0),
    };

    let mut queue = FlushQueue::new();
    queue.push(PendingRelationshipDelete::new(
        &alice,
        RelType::new("KNOWS")?,
        Some(&bob),
        &engine,
    ));
    queue.push(PendingRelationshipDelete::new(
        &bob,
        RelType::new("KNOWS")?,
        None,
        &engine,
    ));
    queue.push(PendingRelationshipDelete::new(
        &alice,
        RelType::new("LIKES")?,
        None,
        &engine,
    ));

    let err = queue.flush().unwrap_err();
    assert!(matches!(err, OgmaError::Engine(_)));
    assert!(err.to_string().contains("node locked"));
    assert_eq!(
        recorder.calls().len(),
        1,
        "operations after the failure must not run"
    );
    assert_eq!(
        engine.calls.load(Ordering::SeqCst),
        2,
        "the third operation never reaches the engine"
    );
    Ok(())
}

#[test]
fn a_later_flush_is_unaffected_by_an_earlier_failure() -> Result<()> {
    let person = GraphEntityType::with_name_label("Person")?;
    let alice = EntityRef::new(&person, 1i64);
    let bob = EntityRef::new(&person, 2i64);
    let engine = RecordingEngine::new();

    engine.fail_next("node locked");
    let mut failing = FlushQueue::new();
    failing.push(PendingRelationshipDelete::new(
        &alice,
        RelType::new("KNOWS")?,
        Some(&bob),
        &engine,
    ));
    assert!(failing.flush().is_err());

    let mut queue = FlushQueue::new();
    queue.push(PendingRelationshipDelete::new(
        &alice,
        RelType::new("KNOWS")?,
        Some(&bob),
        &engine,
    ));
    queue.push(PendingRelationshipDelete::new(
        &bob,
        RelType::new("KNOWS")?,
        None,
        &engine,
    ));
    queue.flush()?;
    assert_eq!(engine.calls().len(), 2);
    Ok(())
}
