//! Host-dispatched extraction strategies.
//!
//! Known hosts get a specialized strategy that reads structured page
//! regions; unknown hosts fall through to [`generic::GenericStrategy`].
//! The registry is resolved once at engine construction, so adding a host
//! means adding a strategy here, not loading code at runtime.

mod generic;
mod ifrc;
mod reliefweb;

use scraper::Html;

use crate::report::ExtractionReport;

pub(crate) use generic::GenericStrategy;
pub(crate) use ifrc::IfrcStrategy;
pub(crate) use reliefweb::ReliefwebStrategy;

/// A host-specific extraction strategy.
///
/// Strategies are stateless and run synchronously on already-fetched
/// content; they write fields (with their origin) straight into the report.
pub(crate) trait HostStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy handles `host`.
    fn matches(&self, host: &str) -> bool;

    /// Reads fields from the parsed document and the cleaned text view.
    fn extract(&self, doc: &Html, text: &str, report: &mut ExtractionReport);
}

/// Ordered strategy registry with a generic fallback.
pub(crate) struct StrategyRegistry {
    specialized: Vec<Box<dyn HostStrategy>>,
    fallback: GenericStrategy,
}

impl StrategyRegistry {
    pub(crate) fn new() -> Self {
        Self {
            specialized: vec![Box::new(ReliefwebStrategy), Box::new(IfrcStrategy)],
            fallback: GenericStrategy,
        }
    }

    /// First specialized strategy matching `host`, else the generic one.
    pub(crate) fn resolve(&self, host: &str) -> &dyn HostStrategy {
        self.specialized
            .iter()
            .find(|s| s.matches(host))
            .map_or(&self.fallback as &dyn HostStrategy, |s| s.as_ref())
    }
}
