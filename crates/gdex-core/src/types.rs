//! Domain value types shared across the pipeline crates.

use serde::{Deserialize, Serialize};

/// One disaster record from the upstream event catalog.
///
/// Immutable identity for an event; never mutated after creation. The
/// `event_id` is the catalog key used to correlate the event across the
/// catalog API, the search API, and extracted sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Catalog identifier, e.g. `"FL-2024-000123-BRA"`.
    pub event_id: String,
    pub name: String,
    /// ISO-8601 creation date as reported by the catalog. May be empty.
    pub date: String,
    /// Comma-joined type names, e.g. `"Flood, Flash Flood"`.
    pub event_type: String,
    pub status: String,
    pub country: String,
}

/// A typed extracted field value.
///
/// Numeric fields are parsed and validated at the point of extraction —
/// an unparsable number is dropped, never stored as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, if it has one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::Float(_) | FieldValue::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Int(_) | FieldValue::Float(_) => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_has_numeric_views() {
        let v = FieldValue::Int(42);
        assert_eq!(v.as_i64(), Some(42));
        assert!((v.as_f64().unwrap() - 42.0).abs() < f64::EPSILON);
        assert!(v.as_text().is_none());
    }

    #[test]
    fn text_has_no_numeric_view() {
        let v = FieldValue::from("Porto Alegre");
        assert!(v.as_f64().is_none());
        assert_eq!(v.as_text(), Some("Porto Alegre"));
    }

    #[test]
    fn serializes_untagged() {
        assert_eq!(
            serde_json::to_string(&FieldValue::Int(3)).unwrap(),
            "3"
        );
        assert_eq!(
            serde_json::to_string(&FieldValue::Text("x".into())).unwrap(),
            "\"x\""
        );
    }
}
