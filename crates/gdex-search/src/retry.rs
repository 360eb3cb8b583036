//! Retry with exponential backoff for the search client.
//!
//! [`retry_with_backoff`] wraps a fallible async operation and retries on
//! transient errors (network failures and the 429/5xx status allowlist).
//! Non-transient errors — other statuses, unparsable payloads — are returned
//! immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::SearchError;

const MAX_DELAY_MS: u64 = 60_000;

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors.
///
/// The wait before the n-th retry is `backoff_base_ms * 2^(n-1)`
/// milliseconds, capped at 60 s. Non-retryable errors are returned without
/// sleeping; after the ceiling is reached the last error is returned.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, SearchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SearchError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retryable() || attempt >= max_retries {
                    return Err(err);
                }
                let delay_ms = backoff_base_ms
                    .saturating_mul(1u64 << attempt.min(10))
                    .min(MAX_DELAY_MS);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient search error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
        }
    }
}
