//! Typed values handed to dialect writers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A runtime value a writer can emit.
///
/// The writer decides quoting per variant: strings become literals,
/// numbers stay raw, composites are rendered as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// A timestamp value.
    Time(DateTime<Utc>),
    /// An ordered sequence of values.
    Slice(Vec<Value>),
    /// A string-keyed mapping of values.
    Map(BTreeMap<String, Value>),
    /// The nil sentinel.
    Nil,
}

impl Value {
    /// Canonical text for scalar variants.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Time(t) => t.to_rfc3339(),
            Self::Slice(_) | Self::Map(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
            Self::Nil => String::new(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
