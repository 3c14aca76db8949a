//! End-to-end tests with a mocked FileList index.
//!
//! These tests run the full router in-process: add-on protocol routes,
//! the .torrent pass-through and the operational endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use filelist_core::{LinkStrategy, UpstreamError};

use common::{fixtures, TestFixture};

const GIB: u64 = 1024 * 1024 * 1024;

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new();
    let response = fixture.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_manifest_endpoint() {
    let fixture = TestFixture::new();
    let response = fixture.get("/manifest.json").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], "org.filelist.stremio");
    assert_eq!(response.body["resources"], json!(["stream"]));
    assert_eq!(response.body["types"], json!(["movie", "series"]));
    assert_eq!(response.body["idPrefixes"], json!(["tt"]));
    assert_eq!(response.body["catalogs"], json!([]));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    fixture.get("/health").await;

    let response = fixture.get("/metrics").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("filelist_http_requests_total"));
}

// =============================================================================
// Stream Tests
// =============================================================================

#[tokio::test]
async fn test_stream_route_returns_ranked_streams() {
    let fixture = TestFixture::new();
    fixture
        .index
        .set_results(vec![
            fixtures::sized_candidate("11", "Movie A 1080p", 2 * GIB, 10),
            fixtures::sized_candidate("12", "Movie A 720p", GIB, 25),
            fixtures::sized_candidate("13", "Movie A CAM", GIB, 0),
            fixtures::sized_candidate("14", "Movie A 480p", GIB, 3),
        ])
        .await;

    let response = fixture.get("/stream/movie/tt1234567.json").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "streams": [
                {
                    "name": "FileList",
                    "title": "Movie A 720p (1.00 GB) [25 seeders]",
                    "url": "http://localhost:8080/torrent/12",
                    "behaviorHints": { "bingeGroup": "filelist" }
                },
                {
                    "name": "FileList",
                    "title": "Movie A 1080p (2.00 GB) [10 seeders]",
                    "url": "http://localhost:8080/torrent/11",
                    "behaviorHints": { "bingeGroup": "filelist" }
                }
            ]
        })
    );

    let searches = fixture.index.recorded_searches().await;
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].as_str(), "1234567");
}

#[tokio::test]
async fn test_stream_route_series_id() {
    let fixture = TestFixture::new();

    let response = fixture.get("/stream/series/tt0944947:3:9.json").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "streams": [] }));

    let searches = fixture.index.recorded_searches().await;
    assert_eq!(searches[0].episode(), Some((3, 9)));
}

#[tokio::test]
async fn test_stream_route_upstream_failure_is_empty_200() {
    let fixture = TestFixture::new();
    fixture.index.set_next_error(UpstreamError::Timeout).await;

    let response = fixture.get("/stream/movie/tt1.json").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "streams": [] }));
}

#[tokio::test]
async fn test_stream_route_without_credentials() {
    let fixture = TestFixture::with_config(fixtures::config_without_credentials());
    fixture
        .index
        .set_results(vec![fixtures::candidate("1", "a", 5)])
        .await;

    let response = fixture.get("/stream/movie/tt1.json").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "streams": [] }));
    assert_eq!(fixture.index.search_count().await, 0);
}

#[tokio::test]
async fn test_stream_route_unsupported_type() {
    let fixture = TestFixture::new();

    let response = fixture.get("/stream/tv/tt1.json").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "streams": [] }));
    assert_eq!(fixture.index.search_count().await, 0);
}

#[tokio::test]
async fn test_stream_route_magnet_links() {
    let mut config = fixtures::config();
    config.streams.link_strategy = LinkStrategy::Magnet;
    let fixture = TestFixture::with_config(config);
    fixture
        .index
        .set_results(vec![
            fixtures::candidate("1", "Good", 9),
            fixtures::candidate("2", "Gone", 8),
        ])
        .await;
    fixture
        .index
        .set_descriptor("1", fixtures::torrent_bytes("Good.mkv"))
        .await;

    let response = fixture.get("/stream/movie/tt1.json").await;

    let streams = response.body["streams"].as_array().unwrap();
    assert_eq!(streams.len(), 1);
    assert_eq!(streams[0]["title"], "Good (1.00 GB) [9 seeders]");
    assert!(streams[0]["url"]
        .as_str()
        .unwrap()
        .starts_with("magnet:?xt=urn:btih:"));
}

// =============================================================================
// Torrent Proxy Tests
// =============================================================================

#[tokio::test]
async fn test_torrent_proxy_relays_bytes() {
    let fixture = TestFixture::new();
    let bytes = fixtures::torrent_bytes("Movie.mkv");
    fixture.index.set_descriptor("42", bytes.clone()).await;

    let response = fixture.get("/torrent/42").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.content_type.as_deref(),
        Some("application/x-bittorrent")
    );
    assert_eq!(response.bytes.as_ref(), bytes.as_slice());
    assert_eq!(
        fixture.index.recorded_downloads().await,
        vec![("42".to_string(), "test-passkey".to_string())]
    );
}

#[tokio::test]
async fn test_torrent_proxy_upstream_failure_is_bad_gateway() {
    let fixture = TestFixture::new();
    fixture
        .index
        .set_descriptor_error("42", UpstreamError::Status(500))
        .await;

    let response = fixture.get("/torrent/42").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.text(), "Failed to fetch torrent file");
}

#[tokio::test]
async fn test_torrent_proxy_needs_only_passkey() {
    let mut config = fixtures::config_without_credentials();
    config.filelist.passkey = Some("only-passkey".to_string());
    let fixture = TestFixture::with_config(config);
    let bytes = fixtures::torrent_bytes("Movie.mkv");
    fixture.index.set_descriptor("7", bytes.clone()).await;

    let response = fixture.get("/torrent/7").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes.as_ref(), bytes.as_slice());
    assert_eq!(
        fixture.index.recorded_downloads().await,
        vec![("7".to_string(), "only-passkey".to_string())]
    );
}

#[tokio::test]
async fn test_torrent_proxy_without_passkey() {
    let fixture = TestFixture::with_config(fixtures::config_without_credentials());

    let response = fixture.get("/torrent/42").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(fixture.index.download_count().await, 0);
}

#[tokio::test]
async fn test_cors_headers_present() {
    let fixture = TestFixture::new();
    let request = axum::http::Request::builder()
        .uri("/manifest.json")
        .header("Origin", "https://web.stremio.com")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(fixture.router.clone(), request)
        .await
        .unwrap();

    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
