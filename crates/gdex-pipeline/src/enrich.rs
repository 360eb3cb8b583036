//! Pluggable auxiliary enrichment.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use gdex_core::{EventRecord, FieldValue};

/// Errors surfaced by pipeline collaborators.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The auxiliary enricher could not produce data for an event.
    #[error("auxiliary enrichment failed: {0}")]
    Enrichment(String),

    /// The search API rejected our credentials. No event can proceed, so
    /// the whole batch aborts instead of recording the same error on every
    /// event.
    #[error("search layer unusable: HTTP {status} from the search API")]
    SearchUnusable { status: u16 },
}

/// An external data source that can contribute fields for an event —
/// weather archives, government datasets, anything keyed by the event.
///
/// The pipeline treats this as optional: when no enricher is injected it
/// degrades to event-derived features plus whatever the sources yielded.
/// An enricher failure is recorded on the event and skipped, never fatal.
#[async_trait]
pub trait AuxiliaryEnricher: Send + Sync {
    async fn enrich(
        &self,
        event: &EventRecord,
    ) -> Result<BTreeMap<String, FieldValue>, PipelineError>;
}
