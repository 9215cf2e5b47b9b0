//! Persistent-type metadata and read access to stored entities.
//!
//! Labels and relationship types are interpolated directly into statement
//! text, so they form a closed vocabulary: every token must be a plain
//! identifier (`[A-Za-z_][A-Za-z0-9_]*`). Identity values never pass through
//! here; they stay bound parameters (see [`crate::value`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{OgmaError, Result};
use crate::value::CypherValue;

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A node label drawn from the registered type vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(String);

impl Label {
    /// Validate and wrap a label token.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(OgmaError::InvalidLabel(name));
        }
        Ok(Self(name))
    }

    /// The bare token, without the leading colon.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Label {
    type Error = OgmaError;

    fn try_from(s: String) -> Result<Self> {
        Label::new(s)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> String {
        label.0
    }
}

/// A relationship type token, validated like a [`Label`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelType(String);

impl RelType {
    /// Validate and wrap a relationship-type token.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(OgmaError::InvalidRelType(name));
        }
        Ok(Self(name))
    }

    /// The bare token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RelType {
    type Error = OgmaError;

    fn try_from(s: String) -> Result<Self> {
        RelType::new(s)
    }
}

impl From<RelType> for String {
    fn from(rel_type: RelType) -> String {
        rel_type.0
    }
}

/// Type descriptor for a mapped domain class.
///
/// Owns the ordered label set its nodes are tagged with. The first label is
/// conventionally the class name; mapped subclasses append theirs after it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEntityType {
    name: String,
    labels: Vec<Label>,
}

impl GraphEntityType {
    /// Descriptor with an explicit label set.
    pub fn new(name: impl Into<String>, labels: Vec<Label>) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }

    /// Descriptor for a class tagged with its own name as the only label.
    pub fn with_name_label(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let label = Label::new(name.clone())?;
        Ok(Self {
            name,
            labels: vec![label],
        })
    }

    /// Mapped class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The Cypher label constraint for nodes of this type, e.g.
    /// `:Person:Admin`. Empty when the type carries no labels.
    pub fn label_clause(&self) -> String {
        let mut clause = String::new();
        for label in &self.labels {
            clause.push(':');
            clause.push_str(label.as_str());
        }
        clause
    }
}

/// Read-only view of a persisted domain object.
///
/// Pending operations borrow these handles at construction and resolve them
/// during execution, so the borrow must outlive the flush.
pub trait EntityAccess {
    /// Identifier under which the node is stored; [`CypherValue::Null`] when
    /// the entity has not been saved yet.
    fn identifier(&self) -> CypherValue;

    /// Descriptor of the mapped type.
    fn entity_type(&self) -> &GraphEntityType;
}

/// Plain identifier/type pair for callers outside a live session.
#[derive(Clone, Debug)]
pub struct EntityRef<'a> {
    id: CypherValue,
    entity_type: &'a GraphEntityType,
}

impl<'a> EntityRef<'a> {
    /// Wrap an already-known identifier and type descriptor.
    pub fn new(entity_type: &'a GraphEntityType, id: impl Into<CypherValue>) -> Self {
        Self {
            id: id.into(),
            entity_type,
        }
    }
}

impl EntityAccess for EntityRef<'_> {
    fn identifier(&self) -> CypherValue {
        self.id.clone()
    }

    fn entity_type(&self) -> &GraphEntityType {
        self.entity_type
    }
}
