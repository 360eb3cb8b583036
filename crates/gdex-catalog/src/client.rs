//! HTTP client for the event catalog.

use std::time::Duration;

use reqwest::{Client, Url};

use gdex_core::EventRecord;

use crate::error::CatalogError;

const PAGE_LIMIT: u32 = 100;
const PAGE_PACING_MS: u64 = 500;

/// Maps an event-identifier prefix to the type keyword used for the
/// secondary catalog filter (e.g. `FL` matches records whose type list
/// mentions "flood" even when the identifier is missing).
#[must_use]
pub fn keyword_for_prefix(prefix: &str) -> &'static str {
    match prefix {
        "FL" => "flood",
        "TC" => "cyclone",
        "EQ" => "earthquake",
        "DR" => "drought",
        "LS" => "landslide",
        "WF" => "fire",
        _ => "",
    }
}

/// Client for the event catalog API.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client pointed at `base_url` (pass the production endpoint,
    /// or a mock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] if the underlying
    /// `reqwest::Client` cannot be constructed, or [`CatalogError::Api`] if
    /// `base_url` is not a valid URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| CatalogError::Api {
            status: 0,
            body: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches all matching events for `country_iso3`, paginating until the
    /// API returns an empty page.
    ///
    /// A record is kept when its event identifier starts with `type_prefix`
    /// (e.g. `FL-`) or any of its type names contains the prefix's keyword,
    /// case-insensitively. A page-level error stops the loop and returns
    /// what was collected so far — partial success, not failure.
    pub async fn fetch_events(
        &self,
        country_iso3: &str,
        type_prefix: &str,
    ) -> Vec<EventRecord> {
        let keyword = keyword_for_prefix(type_prefix);
        let id_prefix = format!("{type_prefix}-");

        let mut collected: Vec<EventRecord> = Vec::new();
        let mut offset = 0u32;

        loop {
            let page = match self.fetch_page(country_iso3, offset).await {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(
                        country_iso3,
                        offset,
                        error = %e,
                        "catalog page failed, returning partial results"
                    );
                    break;
                }
            };

            if page.is_empty() {
                break;
            }

            collected.extend(
                page.into_iter()
                    .filter(|record| matches_type(record, &id_prefix, keyword)),
            );

            offset += PAGE_LIMIT;
            tokio::time::sleep(Duration::from_millis(PAGE_PACING_MS)).await;
        }

        tracing::info!(
            country_iso3,
            type_prefix,
            count = collected.len(),
            "catalog fetch complete"
        );
        collected
    }

    /// Fetches one page of records. Returns every record on the page,
    /// unfiltered, so the caller can tell an empty page from a filtered-out
    /// one.
    async fn fetch_page(
        &self,
        country_iso3: &str,
        offset: u32,
    ) -> Result<Vec<EventRecord>, CatalogError> {
        let url = self.page_url(country_iso3, offset);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| CatalogError::Format { offset, source: e })?;

        let records = value
            .get("data")
            .and_then(serde_json::Value::as_array)
            .map(|arr| arr.iter().map(record_from_json).collect())
            .unwrap_or_default();

        Ok(records)
    }

    fn page_url(&self, country_iso3: &str, offset: u32) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("appname", "gdex");
            pairs.append_pair("filter[field]", "country.iso3");
            pairs.append_pair("filter[value]", country_iso3);
            for field in ["glide", "name", "date", "type", "country", "status"] {
                pairs.append_pair("fields[include][]", field);
            }
            pairs.append_pair("limit", &PAGE_LIMIT.to_string());
            pairs.append_pair("offset", &offset.to_string());
        }
        url
    }
}

fn matches_type(record: &EventRecord, id_prefix: &str, keyword: &str) -> bool {
    if !record.event_id.is_empty() && record.event_id.starts_with(id_prefix) {
        return true;
    }
    !keyword.is_empty() && record.event_type.to_lowercase().contains(keyword)
}

/// Reads one catalog record leniently: missing fields default to empty
/// strings, the type list joins names with `", "`, and the date comes from
/// `fields.date.created`.
fn record_from_json(item: &serde_json::Value) -> EventRecord {
    let fields = item.get("fields");

    let text = |key: &str| {
        fields
            .and_then(|f| f.get(key))
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };

    let names_of = |key: &str| {
        fields
            .and_then(|f| f.get(key))
            .and_then(serde_json::Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|t| t.get("name").and_then(serde_json::Value::as_str))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    };

    let date = fields
        .and_then(|f| f.get("date"))
        .and_then(|d| d.get("created"))
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned();

    EventRecord {
        event_id: text("glide"),
        name: text("name"),
        date,
        event_type: names_of("type"),
        status: text("status"),
        country: names_of("country"),
    }
}
