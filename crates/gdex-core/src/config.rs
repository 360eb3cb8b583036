use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let search_api_key = require("GDEX_SEARCH_API_KEY")?;
    let search_engine_id = require("GDEX_SEARCH_ENGINE_ID")?;

    let catalog_base_url = or_default(
        "GDEX_CATALOG_BASE_URL",
        "https://api.reliefweb.int/v1/disasters",
    );
    let search_base_url = or_default(
        "GDEX_SEARCH_BASE_URL",
        "https://content-customsearch.googleapis.com/customsearch/v1",
    );
    let log_level = or_default("GDEX_LOG_LEVEL", "info");
    let user_agent = or_default("GDEX_USER_AGENT", "gdex/0.1 (disaster-data)");
    let country_iso3 = or_default("GDEX_COUNTRY_ISO3", "BRA");

    let request_timeout_secs = parse_u64("GDEX_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("GDEX_MAX_RETRIES", "3")?;
    let backoff_base_ms = parse_u64("GDEX_BACKOFF_BASE_MS", "500")?;
    let fetch_max_retries = parse_u32("GDEX_FETCH_MAX_RETRIES", "3")?;
    let worker_pool_size = parse_usize("GDEX_WORKER_POOL_SIZE", "5")?;
    let max_sources_per_event = parse_usize("GDEX_MAX_SOURCES_PER_EVENT", "10")?;
    let extract_sources_per_event = parse_usize("GDEX_EXTRACT_SOURCES_PER_EVENT", "3")?;
    let completeness_threshold = parse_f64("GDEX_COMPLETENESS_THRESHOLD", "0.6")?;
    let event_pacing_ms = parse_u64("GDEX_EVENT_PACING_MS", "1000")?;

    Ok(AppConfig {
        search_api_key,
        search_engine_id,
        catalog_base_url,
        search_base_url,
        log_level,
        user_agent,
        country_iso3,
        request_timeout_secs,
        max_retries,
        backoff_base_ms,
        fetch_max_retries,
        worker_pool_size,
        max_sources_per_event,
        extract_sources_per_event,
        completeness_threshold,
        event_pacing_ms,
    })
}
