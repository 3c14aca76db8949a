//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock FileList index injected, so the add-on routes can be
//! exercised without network access.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use filelist_core::{testing::MockIndexClient, Config, StreamCache, StreamResolver};
use filelist_server::state::AppState;

/// Re-export fixtures for test convenience
pub use filelist_core::testing::fixtures;

/// Test fixture for E2E testing with a mock index.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_streams() {
///     let fixture = TestFixture::new();
///     fixture.index.set_results(vec![fixtures::candidate("1", "Movie", 5)]).await;
///
///     let response = fixture.get("/stream/movie/tt1.json").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock index - configure search results and descriptors
    pub index: Arc<MockIndexClient>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub bytes: Bytes,
    pub body: Value,
}

impl TestResponse {
    /// Body as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl TestFixture {
    /// Create a new test fixture with credentials configured.
    pub fn new() -> Self {
        Self::with_config(fixtures::config())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(config: Config) -> Self {
        let index = Arc::new(MockIndexClient::new());
        let cache = Arc::new(StreamCache::default());
        let resolver = Arc::new(StreamResolver::new(&config, index.clone(), cache));

        let state = Arc::new(AppState::new(config, resolver));
        let router = filelist_server::api::create_router(state);

        Self { router, index }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            content_type,
            bytes,
            body,
        }
    }
}
