//! Per-page extraction reports.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use gdex_core::FieldValue;

/// Where a field value came from, used by the merge stage to rank values
/// across sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrigin {
    /// Read from structured page regions (tables, labeled blocks) by a
    /// host-specific strategy.
    Structured,
    /// Matched by the generic strategy or the free-text regex cascade.
    Generic,
}

/// The outcome of extracting one page.
///
/// `fields`, `origin_by_field`, and `confidence_by_field` always share the
/// same key set after validation.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub source_url: String,
    pub source_host: String,
    pub success: bool,
    pub fields: BTreeMap<String, FieldValue>,
    pub origin_by_field: BTreeMap<String, FieldOrigin>,
    pub confidence_by_field: BTreeMap<String, f64>,
    pub warnings: Vec<String>,
    pub elapsed_seconds: f64,
    pub extracted_at: DateTime<Utc>,
}

impl ExtractionReport {
    pub(crate) fn empty(source_url: &str, source_host: &str) -> Self {
        Self {
            source_url: source_url.to_owned(),
            source_host: source_host.to_owned(),
            success: false,
            fields: BTreeMap::new(),
            origin_by_field: BTreeMap::new(),
            confidence_by_field: BTreeMap::new(),
            warnings: Vec::new(),
            elapsed_seconds: 0.0,
            extracted_at: Utc::now(),
        }
    }

    /// A `success=false` report carrying one warning, used when the page
    /// could not be fetched.
    pub(crate) fn failed(source_url: &str, source_host: &str, warning: String) -> Self {
        let mut report = Self::empty(source_url, source_host);
        report.warnings.push(warning);
        report
    }

    /// Records a field with its origin; inside one report the last writer
    /// wins.
    pub(crate) fn set_field(&mut self, name: &str, value: FieldValue, origin: FieldOrigin) {
        self.fields.insert(name.to_owned(), value);
        self.origin_by_field.insert(name.to_owned(), origin);
    }
}
