//! Client for the disaster event catalog API.
//!
//! Pulls event records (identifier, name, date, type, status, country) from
//! a ReliefWeb-style JSON API, paginating with offset/limit until a page
//! comes back empty. Records are filtered by event-identifier prefix or
//! type keyword before they are returned.

mod client;
mod error;

pub use client::{keyword_for_prefix, CatalogClient};
pub use error::CatalogError;
