//! HTTP client for the event-reference search API.
//!
//! Resolves an event identifier to ranked web references via a Custom
//! Search-style endpoint. Transient failures (429/5xx, network) are retried
//! transparently with exponential backoff; everything else surfaces as a
//! typed [`SearchError`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SearchError;
use crate::retry::retry_with_backoff;
use crate::types::{SearchOutcome, SearchResponse, SearchResult};

/// Client for the search API.
///
/// Owns its `reqwest::Client` and credentials; safe to reuse across
/// sequential calls for different event identifiers.
pub struct SearchClient {
    client: Client,
    api_key: String,
    engine_id: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SearchClient {
    /// Creates a client pointed at `base_url` (pass the production endpoint,
    /// or a mock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn new(
        base_url: &str,
        api_key: &str,
        engine_id: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| SearchError::Api {
            status: 0,
            body: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            engine_id: engine_id.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches one page of references for `event_id`, starting at the
    /// 1-based `start_index`.
    ///
    /// The event identifier is sent as an exact-match term wrapped in double
    /// quotes, so `FL-2024-000123-BRA` only matches pages citing the full
    /// identifier.
    ///
    /// # Errors
    ///
    /// - [`SearchError::EmptyQuery`] — `event_id` is empty.
    /// - [`SearchError::Api`] — non-2xx status after retries (for the
    ///   429/5xx allowlist) or immediately (other statuses).
    /// - [`SearchError::Transport`] — network failure after retries.
    /// - [`SearchError::Format`] — unparsable response body (not retried).
    pub async fn search(
        &self,
        event_id: &str,
        start_index: u32,
    ) -> Result<SearchResponse, SearchError> {
        if event_id.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let url = self.search_url(event_id, start_index);

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url).send().await?;
                let status = response.status();

                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(SearchError::Api {
                        status: status.as_u16(),
                        body,
                    });
                }

                let body = response.text().await?;
                let value: serde_json::Value =
                    serde_json::from_str(&body).map_err(|e| SearchError::Format {
                        context: format!("search page for {event_id}"),
                        source: e,
                    })?;

                Ok(SearchResponse::from_json(&value))
            }
        })
        .await
    }

    /// Collects up to `max_results` references across pages.
    ///
    /// Follows the response's next-page start index, stopping when a page
    /// returns no items, reports no next page, or `max_results` is reached.
    /// A page-level error stops the walk; whatever was collected is
    /// returned alongside the error so the caller can keep the partial
    /// results and still itemize the failure.
    pub async fn search_all(&self, event_id: &str, max_results: usize) -> SearchOutcome {
        let mut collected: Vec<SearchResult> = Vec::new();
        let mut error = None;
        let mut start_index = 1u32;

        while collected.len() < max_results {
            let response = match self.search(event_id, start_index).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(
                        event_id,
                        start_index,
                        error = %e,
                        "search page failed, stopping with partial results"
                    );
                    error = Some(e);
                    break;
                }
            };

            if response.items.is_empty() {
                break;
            }
            collected.extend(response.items);

            match response.next_start_index {
                Some(next) => start_index = next,
                None => break,
            }
        }

        collected.truncate(max_results);
        SearchOutcome {
            results: collected,
            error,
        }
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn search_url(&self, event_id: &str, start_index: u32) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("start", &start_index.to_string());
            pairs.append_pair("cx", &self.engine_id);
            pairs.append_pair("exactTerms", &format!("\"{event_id}\""));
            pairs.append_pair("key", &self.api_key);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SearchClient {
        SearchClient::new(base_url, "test-key", "test-cx", 30, "gdex-test/0.1", 3, 0)
            .expect("client construction should not fail")
    }

    #[test]
    fn search_url_wraps_event_id_in_quotes() {
        let client = test_client("https://search.example.com/v1");
        let url = client.search_url("FL-2024-000123-BRA", 1);
        assert!(
            url.as_str().contains("exactTerms=%22FL-2024-000123-BRA%22"),
            "exactTerms should be a quoted exact match: {url}"
        );
    }

    #[test]
    fn search_url_carries_start_cx_and_key() {
        let client = test_client("https://search.example.com/v1");
        let url = client.search_url("FL-2024-000123-BRA", 11);
        let query = url.query().unwrap_or_default();
        assert!(query.contains("start=11"));
        assert!(query.contains("cx=test-cx"));
        assert!(query.contains("key=test-key"));
    }

    #[tokio::test]
    async fn empty_event_id_is_rejected() {
        let client = test_client("https://search.example.com/v1");
        let result = client.search("", 1).await;
        assert!(matches!(result, Err(SearchError::EmptyQuery)));
    }
}
