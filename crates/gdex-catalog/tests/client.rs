//! Integration tests for `CatalogClient` using wiremock HTTP mocks.

use gdex_catalog::CatalogClient;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> CatalogClient {
    CatalogClient::new(base_url, 30, "gdex-test/0.1").expect("client construction should not fail")
}

fn event_json(glide: &str, type_name: &str) -> serde_json::Value {
    serde_json::json!({
        "fields": {
            "glide": glide,
            "name": format!("Event {glide}"),
            "date": { "created": "2024-05-01T00:00:00+00:00" },
            "type": [ { "name": type_name } ],
            "country": [ { "name": "Brazil" } ],
            "status": "past"
        }
    })
}

#[tokio::test]
async fn paginates_until_an_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                event_json("FL-2024-000123-BRA", "Flood"),
                event_json("FL-2024-000200-BRA", "Flash Flood"),
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [ event_json("FL-2024-000300-BRA", "Flood") ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("offset", "200"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let events = client.fetch_events("BRA", "FL").await;

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].event_id, "FL-2024-000123-BRA");
    assert_eq!(events[2].event_id, "FL-2024-000300-BRA");
}

#[tokio::test]
async fn sends_country_filter_and_field_selection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("appname", "gdex"))
        .and(query_param("filter[field]", "country.iso3"))
        .and(query_param("filter[value]", "BRA"))
        .and(query_param("limit", "100"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let events = client.fetch_events("BRA", "FL").await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn filters_out_unrelated_event_types() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                event_json("FL-2024-000123-BRA", "Flood"),
                event_json("EQ-2024-000009-BRA", "Earthquake"),
                event_json("", "Flash Flood"),
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("offset", "100"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let events = client.fetch_events("BRA", "FL").await;

    // The earthquake is dropped; the record with no identifier survives on
    // its type keyword.
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_id, "FL-2024-000123-BRA");
    assert_eq!(events[1].event_id, "");
}

#[tokio::test]
async fn page_error_returns_partial_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [ event_json("FL-2024-000123-BRA", "Flood") ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let events = client.fetch_events("BRA", "FL").await;
    assert_eq!(events.len(), 1, "partial success, not failure");
}

#[tokio::test]
async fn first_page_error_yields_empty_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let events = client.fetch_events("BRA", "FL").await;
    assert!(events.is_empty());
}
