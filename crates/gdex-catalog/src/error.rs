use thiserror::Error;

/// Errors returned by the catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network, timeout, or TLS failure from the underlying HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The catalog API answered with a non-2xx HTTP status.
    #[error("catalog API returned HTTP {status}")]
    Api { status: u16, body: String },

    /// The response body could not be parsed as JSON.
    #[error("unparsable catalog page at offset {offset}: {source}")]
    Format {
        offset: u32,
        #[source]
        source: serde_json::Error,
    },
}
