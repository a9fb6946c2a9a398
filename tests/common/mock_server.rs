//! Mock Immich server for album and download tests.

use serde_json::Value;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use super::fixtures::API_KEY;

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockImmichServer {
    pub server: MockServer,
}

impl MockImmichServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    async fn mock_json(&self, endpoint: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header("x-api-key", API_KEY))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_albums(&self, body: Value) {
        self.mock_json("/api/albums", body).await;
    }

    pub async fn mock_album(&self, album_id: &str, body: Value) {
        self.mock_json(&format!("/api/albums/{album_id}"), body).await;
    }

    pub async fn mock_original(&self, asset_id: &str, bytes: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(format!("/api/assets/{asset_id}/original")))
            .and(header("x-api-key", API_KEY))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(bytes)
                    .insert_header("content-type", "application/octet-stream"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint that returns an error
    pub async fn mock_error(&self, endpoint: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }

    /// Number of requests received for `endpoint`
    pub async fn hits(&self, endpoint: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == endpoint)
            .count()
    }
}
