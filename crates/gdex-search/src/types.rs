//! Search API response types.
//!
//! The upstream response is a Custom Search-style JSON envelope:
//! `searchInformation` carries stringly-typed totals, `items[]` the results,
//! and `queries.nextPage[0].startIndex` the token for the following page.
//! Fields are read leniently — a missing or malformed field degrades to its
//! default rather than failing the whole page.

use serde::Serialize;

/// A single web reference for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// Bare host shown by the search UI, e.g. `"reliefweb.int"`.
    pub display_host: String,
    pub formatted_url: String,
}

impl SearchResult {
    fn from_json(item: &serde_json::Value) -> Self {
        let text = |key: &str| {
            item.get(key)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        Self {
            title: text("title"),
            url: text("link"),
            snippet: text("snippet"),
            display_host: text("displayLink"),
            formatted_url: text("formattedUrl"),
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub total_results: u64,
    pub search_time_seconds: f64,
    pub items: Vec<SearchResult>,
    /// 1-based start index of the next page, if the API reports one.
    pub next_start_index: Option<u32>,
}

impl SearchResponse {
    /// Builds a response from the raw API payload.
    ///
    /// `totalResults` arrives as a decimal string; an absent or unparsable
    /// value becomes 0. An absent `items` array yields an empty page.
    #[must_use]
    pub fn from_json(body: &serde_json::Value) -> Self {
        let info = body.get("searchInformation");

        let total_results = info
            .and_then(|i| i.get("totalResults"))
            .and_then(serde_json::Value::as_str)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        let search_time_seconds = info
            .and_then(|i| i.get("searchTime"))
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0);

        let items = body
            .get("items")
            .and_then(serde_json::Value::as_array)
            .map(|arr| arr.iter().map(SearchResult::from_json).collect())
            .unwrap_or_default();

        let next_start_index = body
            .get("queries")
            .and_then(|q| q.get("nextPage"))
            .and_then(serde_json::Value::as_array)
            .and_then(|pages| pages.first())
            .and_then(|p| p.get("startIndex"))
            .and_then(serde_json::Value::as_u64)
            .and_then(|v| u32::try_from(v).ok());

        Self {
            total_results,
            search_time_seconds,
            items,
            next_start_index,
        }
    }
}

/// Results collected across pages by [`search_all`], with the terminal
/// page error when the walk stopped early. Partial results are still
/// usable; the error is there for the caller to itemize.
///
/// [`search_all`]: crate::SearchClient::search_all
#[derive(Debug)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub error: Option<crate::SearchError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_envelope() {
        let body = serde_json::json!({
            "searchInformation": { "totalResults": "231", "searchTime": 0.41 },
            "items": [
                {
                    "title": "Floods in Rio Grande do Sul",
                    "link": "https://reliefweb.int/report/brazil/x",
                    "snippet": "12,500 people affected",
                    "displayLink": "reliefweb.int",
                    "formattedUrl": "https://reliefweb.int/report/brazil/x"
                }
            ],
            "queries": { "nextPage": [ { "startIndex": 11 } ] }
        });

        let response = SearchResponse::from_json(&body);
        assert_eq!(response.total_results, 231);
        assert!((response.search_time_seconds - 0.41).abs() < 1e-9);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].display_host, "reliefweb.int");
        assert_eq!(response.next_start_index, Some(11));
    }

    #[test]
    fn missing_sections_degrade_to_defaults() {
        let response = SearchResponse::from_json(&serde_json::json!({}));
        assert_eq!(response.total_results, 0);
        assert!(response.items.is_empty());
        assert!(response.next_start_index.is_none());
    }

    #[test]
    fn unparsable_total_results_becomes_zero() {
        let body = serde_json::json!({
            "searchInformation": { "totalResults": "lots" }
        });
        assert_eq!(SearchResponse::from_json(&body).total_results, 0);
    }

    #[test]
    fn last_page_has_no_next_index() {
        let body = serde_json::json!({
            "items": [],
            "queries": { "request": [ { "startIndex": 91 } ] }
        });
        assert!(SearchResponse::from_json(&body).next_start_index.is_none());
    }
}
