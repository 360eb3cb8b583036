//! The `run` subcommand: catalog → pipeline → output files.

use anyhow::Context;

use gdex_catalog::CatalogClient;
use gdex_core::AppConfig;
use gdex_extract::{ExtractionEngine, SourceFetcher};
use gdex_pipeline::{BatchOrchestrator, OrchestratorSettings};
use gdex_search::SearchClient;

use crate::output;

pub(crate) async fn run(
    config: &AppConfig,
    country: Option<&str>,
    event_type: &str,
    max_events: Option<usize>,
    output_prefix: &str,
) -> anyhow::Result<()> {
    let country = country.unwrap_or(&config.country_iso3);

    let catalog = CatalogClient::new(
        &config.catalog_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("building catalog client")?;

    tracing::info!(country, event_type, "fetching event catalog");
    let mut events = catalog.fetch_events(country, event_type).await;
    if let Some(max) = max_events {
        events.truncate(max);
    }
    if events.is_empty() {
        anyhow::bail!("no matching events in the catalog for {country}/{event_type}");
    }
    tracing::info!(count = events.len(), "events selected");

    let search = SearchClient::new(
        &config.search_base_url,
        &config.search_api_key,
        &config.search_engine_id,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.backoff_base_ms,
    )
    .context("building search client")?;

    let fetcher = SourceFetcher::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.fetch_max_retries,
        config.backoff_base_ms,
    )
    .context("building source fetcher")?;

    let settings = OrchestratorSettings {
        max_sources_per_event: config.max_sources_per_event,
        extract_sources_per_event: config.extract_sources_per_event,
        worker_pool_size: config.worker_pool_size,
        event_pacing_ms: config.event_pacing_ms,
        completeness_threshold: config.completeness_threshold,
    };

    let orchestrator =
        BatchOrchestrator::new(search, ExtractionEngine::new(fetcher), None, settings);
    let dataset = orchestrator
        .run(events)
        .await
        .context("running the enrichment batch")?;

    output::write_all(&dataset, output_prefix)?;
    println!(
        "{} events processed, {} usable samples; outputs written with prefix '{output_prefix}'",
        dataset.records.len(),
        dataset.metadata.sample_count
    );
    Ok(())
}
