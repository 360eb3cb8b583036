//! Client for the event-reference search API.
//!
//! Resolves an event identifier to ranked web references. [`SearchClient`]
//! exposes single-page [`SearchClient::search`] and paging
//! [`SearchClient::search_all`]; transient failures retry transparently
//! with exponential backoff.

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::SearchClient;
pub use error::SearchError;
pub use types::{SearchOutcome, SearchResponse, SearchResult};
