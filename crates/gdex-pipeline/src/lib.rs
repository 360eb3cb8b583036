//! Event enrichment pipeline.
//!
//! For each catalog event: search for web references, extract the top
//! sources, merge the per-source reports with optional auxiliary data,
//! and project the result onto the fixed feature schema. The
//! [`BatchOrchestrator`] drives this over a whole event collection with
//! bounded per-event concurrency; failures are contained per event and the
//! batch always produces a [`Dataset`].

mod dataset;
mod enrich;
mod features;
mod merge;
mod orchestrator;

pub use dataset::{Dataset, DatasetMetadata, EnrichedEvent};
pub use enrich::{AuxiliaryEnricher, PipelineError};
pub use features::{FeatureAssembler, FeatureRecord, FEATURE_NAMES};
pub use merge::{merge, MergedFields};
pub use orchestrator::{BatchOrchestrator, OrchestratorSettings};
