//! Deferred relationship mutations for a Cypher-speaking graph store.
//!
//! An object-graph session detects relationship changes while domain objects
//! are mutated, queues them as [`pending`] operations, and flushes the queue
//! in order against a [`engine::CypherEngine`]. Each operation issues exactly
//! one parameterized statement and inspects no result.

#![warn(missing_docs)]

pub mod engine;
pub mod entity;
pub mod error;
pub mod pending;
pub mod value;

pub use error::{OgmaError, Result};
pub use value::CypherValue;
