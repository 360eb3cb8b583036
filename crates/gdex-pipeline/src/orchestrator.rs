//! Batch driver over the event collection.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use gdex_core::EventRecord;
use gdex_extract::ExtractionEngine;
use gdex_search::{SearchClient, SearchError};

use crate::dataset::{Dataset, EnrichedEvent};
use crate::enrich::{AuxiliaryEnricher, PipelineError};
use crate::features::FeatureAssembler;
use crate::merge;

/// Tunables for one batch run.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Sources kept on the enriched event.
    pub max_sources_per_event: usize,
    /// Sources actually fetched and extracted, from the top of the ranking.
    pub extract_sources_per_event: usize,
    /// Bounded fan-out for fetch+extract within one event.
    pub worker_pool_size: usize,
    /// Sleep between successive events, advisory rate limiting toward the
    /// search API.
    pub event_pacing_ms: u64,
    /// Feature-matrix inclusion cutoff; strictly greater-than.
    pub completeness_threshold: f64,
}

/// Drives search → extract → merge → assemble over a whole event
/// collection.
///
/// Failures are contained per event: a failed search, a failed page, or a
/// failed enricher lands in that event's error list and the batch moves on.
/// The one exception is a credential rejection from the search API — that
/// makes the whole search layer unusable, so the batch aborts instead of
/// stamping the same error on every event.
pub struct BatchOrchestrator {
    search: SearchClient,
    engine: ExtractionEngine,
    enricher: Option<Arc<dyn AuxiliaryEnricher>>,
    settings: OrchestratorSettings,
}

impl BatchOrchestrator {
    #[must_use]
    pub fn new(
        search: SearchClient,
        engine: ExtractionEngine,
        enricher: Option<Arc<dyn AuxiliaryEnricher>>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            search,
            engine,
            enricher,
            settings,
        }
    }

    /// Processes every event and returns the assembled dataset.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::SearchUnusable`] when the search API
    /// answers 401 or 403; every other failure is recorded on its event.
    pub async fn run(&self, events: Vec<EventRecord>) -> Result<Dataset, PipelineError> {
        let total = events.len();
        let mut records = Vec::with_capacity(total);
        let mut matrix = Vec::new();

        for (index, event) in events.into_iter().enumerate() {
            tracing::info!(
                event_id = %event.event_id,
                progress = format!("{}/{total}", index + 1),
                "processing event"
            );

            let (enriched, feature_record) = self.process_event(event).await?;

            if enriched.completeness > self.settings.completeness_threshold {
                matrix.push(feature_record);
            }
            records.push(enriched);

            if index + 1 < total {
                tokio::time::sleep(Duration::from_millis(self.settings.event_pacing_ms)).await;
            }
        }

        tracing::info!(
            events = records.len(),
            usable = matrix.len(),
            "batch complete"
        );
        Ok(Dataset::new(
            records,
            matrix,
            self.settings.completeness_threshold,
        ))
    }

    async fn process_event(
        &self,
        event: EventRecord,
    ) -> Result<(EnrichedEvent, crate::features::FeatureRecord), PipelineError> {
        let mut errors = Vec::new();

        let sources = if event.event_id.is_empty() {
            errors.push("missing event identifier, search skipped".to_owned());
            Vec::new()
        } else {
            let outcome = self
                .search
                .search_all(&event.event_id, self.settings.max_sources_per_event)
                .await;
            if let Some(e) = outcome.error {
                match e {
                    SearchError::Api {
                        status: status @ (401 | 403),
                        ..
                    } => return Err(PipelineError::SearchUnusable { status }),
                    other => errors.push(format!("search failed: {other}")),
                }
            }
            outcome.results
        };

        // Fetch+extract the top-ranked sources with bounded fan-out.
        // `buffered` keeps completion in source-rank order, which is what
        // merge precedence is defined over.
        let urls: Vec<String> = sources
            .iter()
            .take(self.settings.extract_sources_per_event)
            .map(|s| s.url.clone())
            .collect();
        let engine = &self.engine;
        let reports: Vec<_> = stream::iter(urls)
            .map(|url| async move {
                let report = engine.extract(&url, false).await;
                (url, report)
            })
            .buffered(self.settings.worker_pool_size.max(1))
            .collect()
            .await;

        let auxiliary = match &self.enricher {
            Some(enricher) => match enricher.enrich(&event).await {
                Ok(fields) => Some(fields),
                Err(e) => {
                    tracing::warn!(event_id = %event.event_id, error = %e, "enricher failed");
                    errors.push(format!("auxiliary enrichment failed: {e}"));
                    None
                }
            },
            None => None,
        };

        let ranked_reports: Vec<_> = reports.iter().map(|(_, r)| r.clone()).collect();
        let merged = merge::merge(&ranked_reports, auxiliary.as_ref());

        let (feature_record, date_warning) = FeatureAssembler::assemble(&event, &merged);
        if let Some(warning) = date_warning {
            errors.push(warning);
        }

        let per_source_reports: BTreeMap<_, _> = reports.into_iter().collect();

        let enriched = EnrichedEvent {
            event,
            sources,
            per_source_reports,
            merged_fields: merged.values,
            completeness: feature_record.completeness(),
            errors,
        };
        Ok((enriched, feature_record))
    }
}
