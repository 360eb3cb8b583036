//! Extraction engine: fetch, dispatch, cascade, score, validate, cache.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

use reqwest::Url;
use scraper::Html;

use crate::cascade;
use crate::clean::clean_text;
use crate::confidence;
use crate::fetch::SourceFetcher;
use crate::report::ExtractionReport;
use crate::strategy::StrategyRegistry;
use crate::validate::clean_fields;

/// Turns URLs into [`ExtractionReport`]s.
///
/// Extraction never fails: a page that cannot be fetched yields a
/// `success=false` report with a warning. Reports are cached by URL so
/// workers racing on the same page (referenced by different events) only
/// pay for it once.
pub struct ExtractionEngine {
    fetcher: SourceFetcher,
    registry: StrategyRegistry,
    cache: RwLock<HashMap<String, ExtractionReport>>,
}

impl ExtractionEngine {
    #[must_use]
    pub fn new(fetcher: SourceFetcher) -> Self {
        Self {
            fetcher,
            registry: StrategyRegistry::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Extracts `url`, serving from cache unless `force_refresh`.
    pub async fn extract(&self, url: &str, force_refresh: bool) -> ExtractionReport {
        if !force_refresh {
            if let Some(cached) = self.cache_get(url) {
                tracing::debug!(url, "extraction cache hit");
                return cached;
            }
        }

        let host = host_of(url);
        let started = Instant::now();

        let report = match self.fetcher.fetch(url).await {
            Ok(content) => {
                let mut report = self.build_report(url, &host, &content);
                report.elapsed_seconds = started.elapsed().as_secs_f64();
                report
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "page fetch failed");
                let mut report =
                    ExtractionReport::failed(url, &host, format!("fetch failed: {e}"));
                report.elapsed_seconds = started.elapsed().as_secs_f64();
                report
            }
        };

        self.cache_put(url, report.clone());
        report
    }

    /// Synchronous extraction pass over fetched content. The parsed
    /// document never crosses an await point.
    fn build_report(&self, url: &str, host: &str, content: &str) -> ExtractionReport {
        let mut report = ExtractionReport::empty(url, host);
        report.success = true;

        let doc = Html::parse_document(content);
        let text = clean_text(&doc);

        let strategy = self.registry.resolve(host);
        tracing::debug!(url, strategy = strategy.name(), "dispatching extraction");
        strategy.extract(&doc, &text, &mut report);

        cascade::apply(&text, &mut report);

        for (name, value) in &report.fields {
            report
                .confidence_by_field
                .insert(name.clone(), confidence::score(name, value));
        }

        let dropped = clean_fields(&mut report.fields);
        for name in dropped {
            report.origin_by_field.remove(&name);
            report.confidence_by_field.remove(&name);
            report.warnings.push(format!("{name} dropped by validation"));
        }

        report
    }

    fn cache_get(&self, url: &str) -> Option<ExtractionReport> {
        match self.cache.read() {
            Ok(cache) => cache.get(url).cloned(),
            Err(poisoned) => poisoned.into_inner().get(url).cloned(),
        }
    }

    fn cache_put(&self, url: &str, report: ExtractionReport) {
        match self.cache.write() {
            Ok(mut cache) => {
                cache.insert(url.to_owned(), report);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(url.to_owned(), report);
            }
        }
    }
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_default()
}
