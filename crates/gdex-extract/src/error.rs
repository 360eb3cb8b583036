use thiserror::Error;

/// Errors returned by the source fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, timeout, or TLS failure from the underlying HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a 4xx status. Terminal: the page will not
    /// appear by retrying.
    #[error("client error HTTP {status} for {url}")]
    ClientStatus { status: u16, url: String },

    /// The server answered with a retryable non-2xx status and retries ran
    /// out.
    #[error("server error HTTP {status} for {url}")]
    ServerStatus { status: u16, url: String },
}
