#[derive(Clone)]
pub struct AppConfig {
    pub search_api_key: String,
    pub search_engine_id: String,
    pub catalog_base_url: String,
    pub search_base_url: String,
    pub log_level: String,
    pub user_agent: String,
    pub country_iso3: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub fetch_max_retries: u32,
    pub worker_pool_size: usize,
    pub max_sources_per_event: usize,
    pub extract_sources_per_event: usize,
    pub completeness_threshold: f64,
    pub event_pacing_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("search_api_key", &"[redacted]")
            .field("search_engine_id", &self.search_engine_id)
            .field("catalog_base_url", &self.catalog_base_url)
            .field("search_base_url", &self.search_base_url)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("country_iso3", &self.country_iso3)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .field("fetch_max_retries", &self.fetch_max_retries)
            .field("worker_pool_size", &self.worker_pool_size)
            .field("max_sources_per_event", &self.max_sources_per_event)
            .field(
                "extract_sources_per_event",
                &self.extract_sources_per_event,
            )
            .field("completeness_threshold", &self.completeness_threshold)
            .field("event_pacing_ms", &self.event_pacing_ms)
            .finish()
    }
}
