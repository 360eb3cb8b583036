//! Page retrieval with retry and encoding detection.

use std::time::Duration;

use reqwest::Client;

use crate::error::FetchError;

/// Fetches raw page text for extraction.
///
/// Transient failures (timeouts, connection errors, 5xx and 429 statuses)
/// are retried with a doubling backoff; 4xx client errors are terminal.
/// Character encoding is taken from the response headers, or sniffed from
/// the body when absent. No caching here — the extraction engine caches
/// whole reports.
pub struct SourceFetcher {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SourceFetcher {
    /// Builds a fetcher with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches `url` and returns the decoded page text.
    ///
    /// # Errors
    ///
    /// - [`FetchError::ClientStatus`] — 4xx response, returned immediately.
    /// - [`FetchError::ServerStatus`] — retryable status after the retry
    ///   ceiling.
    /// - [`FetchError::Transport`] — network failure after the retry
    ///   ceiling.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0u32;
        loop {
            match self.fetch_once(url).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    if !is_retryable(&err) || attempt >= self.max_retries {
                        return Err(err);
                    }
                    let delay_ms = self.backoff_base_ms.saturating_mul(1u64 << attempt.min(10));
                    tracing::warn!(
                        url,
                        attempt,
                        delay_ms,
                        error = %err,
                        "transient fetch error, retrying after backoff"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_client_error() {
            return Err(FetchError::ClientStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::ServerStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        // `text()` honors the declared charset and falls back to sniffing.
        Ok(response.text().await?)
    }
}

fn is_retryable(err: &FetchError) -> bool {
    match err {
        FetchError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        FetchError::ServerStatus { .. } => true,
        FetchError::ClientStatus { .. } => false,
    }
}
