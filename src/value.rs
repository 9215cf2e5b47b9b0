//! Scalar parameter values bound into Cypher statements.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Typed scalar passed to the engine alongside the statement text.
///
/// Identity values always travel through the parameter list; only vocabulary
/// tokens validated by [`crate::entity`] are ever interpolated into text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum CypherValue {
    /// Null literal. An entity whose identifier is null is unsaved.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Signed 64-bit integer literal.
    Int(i64),
    /// 64-bit floating point literal.
    Float(f64),
    /// UTF-8 string literal.
    String(String),
}

impl CypherValue {
    /// True when the value is the null literal.
    pub fn is_null(&self) -> bool {
        matches!(self, CypherValue::Null)
    }
}

impl fmt::Display for CypherValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CypherValue::Null => write!(f, "null"),
            CypherValue::Bool(v) => write!(f, "{v}"),
            CypherValue::Int(v) => write!(f, "{v}"),
            CypherValue::Float(v) => write!(f, "{v}"),
            CypherValue::String(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for CypherValue {
    fn from(v: bool) -> Self {
        CypherValue::Bool(v)
    }
}

impl From<i64> for CypherValue {
    fn from(v: i64) -> Self {
        CypherValue::Int(v)
    }
}

impl From<f64> for CypherValue {
    fn from(v: f64) -> Self {
        CypherValue::Float(v)
    }
}

impl From<&str> for CypherValue {
    fn from(v: &str) -> Self {
        CypherValue::String(v.to_owned())
    }
}

impl From<String> for CypherValue {
    fn from(v: String) -> Self {
        CypherValue::String(v)
    }
}

impl From<&CypherValue> for serde_json::Value {
    fn from(v: &CypherValue) -> Self {
        match v {
            CypherValue::Null => serde_json::Value::Null,
            CypherValue::Bool(b) => (*b).into(),
            CypherValue::Int(i) => (*i).into(),
            CypherValue::Float(x) => (*x).into(),
            CypherValue::String(s) => s.clone().into(),
        }
    }
}
