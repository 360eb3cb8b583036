use thiserror::Error;

/// Errors returned by the search API client.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network, timeout, or TLS failure from the underlying HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx HTTP status.
    #[error("search API returned HTTP {status}")]
    Api { status: u16, body: String },

    /// The response body could not be parsed into the expected shape.
    #[error("unparsable search response for {context}: {source}")]
    Format {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The caller passed an empty event identifier.
    #[error("event identifier cannot be empty")]
    EmptyQuery,
}

/// HTTP statuses worth retrying after a backoff delay.
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

impl SearchError {
    /// Returns `true` if the error represents a transient condition that
    /// should be retried.
    ///
    /// Retryable: transport-level failures (timeout, connection reset) and
    /// the fixed status allowlist (429, 500, 502, 503, 504). Everything else
    /// — other HTTP statuses, parse failures, input validation — propagates
    /// immediately.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            SearchError::Api { status, .. } => RETRYABLE_STATUSES.contains(status),
            SearchError::Format { .. } | SearchError::EmptyQuery => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_err(status: u16) -> SearchError {
        SearchError::Api {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn allowlisted_statuses_are_retryable() {
        for status in [429, 500, 502, 503, 504] {
            assert!(api_err(status).is_retryable(), "{status} should retry");
        }
    }

    #[test]
    fn client_errors_are_not_retryable() {
        for status in [400, 401, 403, 404] {
            assert!(!api_err(status).is_retryable(), "{status} should not retry");
        }
    }

    #[test]
    fn format_error_is_not_retryable() {
        let source = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err = SearchError::Format {
            context: "test".to_owned(),
            source,
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn empty_query_is_not_retryable() {
        assert!(!SearchError::EmptyQuery.is_retryable());
    }
}
