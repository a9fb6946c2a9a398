//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use inkframe::models::AppConfig;
use inkframe::server::{build_router, create_app_state, AppState};
use inkframe::services::{ConfigStore, ImmichClient};

use super::fixtures::{ALBUM_NAME, API_KEY};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
    pub config_path: PathBuf,
    pub photo_dir: PathBuf,
    /// Keeps the config and ledger files alive
    _dir: TempDir,
}

impl TestApp {
    /// App talking to the photo server at `immich_url`, with a small panel
    /// so conversions stay fast.
    pub fn new(immich_url: &str) -> Self {
        let mut config = AppConfig::default();
        config.immich.url = immich_url.to_string();
        config.immich.album = ALBUM_NAME.to_string();
        config.immich.rotation = 0;
        config.display.width = 16;
        config.display.height = 4;
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = dir.path().join("config").join("config.yaml");
        let photo_dir = dir.path().join("photos");
        config.save(&config_path).expect("Failed to write config");

        let store = Arc::new(ConfigStore::open(&config_path));
        let albums = Arc::new(ImmichClient::new(API_KEY).expect("Failed to build client"));
        let state = create_app_state(store, albums, &photo_dir);
        let router = build_router(state.clone());

        Self {
            router,
            state,
            config_path,
            photo_dir,
            _dir: dir,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a GET request with custom headers
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::get(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Contents of the tracking ledger
    pub fn ledger(&self) -> String {
        std::fs::read_to_string(self.photo_dir.join("tracking.txt")).unwrap_or_default()
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
