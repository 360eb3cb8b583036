//! Pipeline output types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use gdex_core::{EventRecord, FieldValue};
use gdex_extract::ExtractionReport;
use gdex_search::SearchResult;

use crate::features::{FeatureRecord, FEATURE_NAMES};

/// Everything the pipeline learned about one event: the sources it found,
/// the per-source reports, and the merged field map. `errors` itemizes
/// per-event failures; the batch continues past them.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedEvent {
    pub event: EventRecord,
    pub sources: Vec<SearchResult>,
    pub per_source_reports: BTreeMap<String, ExtractionReport>,
    pub merged_fields: BTreeMap<String, FieldValue>,
    pub completeness: f64,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetMetadata {
    /// Rows in the feature matrix, i.e. usable samples.
    pub sample_count: usize,
    pub feature_names: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub threshold_used: f64,
}

/// The batch output: every enriched event, plus the feature matrix
/// restricted to records whose completeness clears the threshold.
///
/// The matrix is always a projection of `records` — it is never populated
/// from anywhere else.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub records: Vec<EnrichedEvent>,
    pub feature_matrix: Vec<FeatureRecord>,
    pub metadata: DatasetMetadata,
}

impl Dataset {
    pub(crate) fn new(
        records: Vec<EnrichedEvent>,
        feature_matrix: Vec<FeatureRecord>,
        threshold_used: f64,
    ) -> Self {
        let metadata = DatasetMetadata {
            sample_count: feature_matrix.len(),
            feature_names: FEATURE_NAMES.iter().map(|n| (*n).to_owned()).collect(),
            generated_at: Utc::now(),
            threshold_used,
        };
        Self {
            records,
            feature_matrix,
            metadata,
        }
    }
}
