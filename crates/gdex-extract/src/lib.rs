//! Page fetching and structured-field extraction.
//!
//! [`SourceFetcher`] retrieves page content with retry and encoding
//! detection. [`ExtractionEngine`] turns a fetched page into an
//! [`ExtractionReport`]: a host-matched strategy reads structured markup
//! first, a regex cascade fills remaining fields from the cleaned text, and
//! every field gets a plausibility confidence before a final validation
//! pass. Reports are cached by URL so the same page is never scored twice.

mod cascade;
mod clean;
mod confidence;
mod engine;
mod error;
mod fetch;
mod report;
mod strategy;
mod validate;

pub use engine::ExtractionEngine;
pub use error::FetchError;
pub use fetch::SourceFetcher;
pub use report::{ExtractionReport, FieldOrigin};
