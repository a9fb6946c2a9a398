//! Client for the Immich photo server.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;
use thiserror::Error;

use crate::models::{AlbumDetail, AlbumSummary};

const API_KEY_HEADER: &str = "x-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("request to photo server failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid API key: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),
}

/// Source of albums and original photo bytes.
#[async_trait]
pub trait AlbumSource: Send + Sync {
    async fn list_albums(&self, base_url: &str) -> Result<Vec<AlbumSummary>, AlbumError>;

    async fn album(&self, base_url: &str, album_id: &str) -> Result<AlbumDetail, AlbumError>;

    async fn download_original(&self, base_url: &str, asset_id: &str)
        -> Result<Vec<u8>, AlbumError>;
}

/// [`AlbumSource`] backed by the Immich REST API.
///
/// The server URL is passed per call since it can change on a settings
/// update; the API key is fixed for the life of the process.
pub struct ImmichClient {
    http: reqwest::Client,
}

impl ImmichClient {
    pub fn new(api_key: &str) -> Result<Self, AlbumError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key)?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    async fn get(&self, url: String) -> Result<reqwest::Response, AlbumError> {
        tracing::debug!(%url, "Fetching from photo server");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AlbumError::Status { url, status });
        }
        Ok(response)
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[async_trait]
impl AlbumSource for ImmichClient {
    async fn list_albums(&self, base_url: &str) -> Result<Vec<AlbumSummary>, AlbumError> {
        let response = self.get(endpoint(base_url, "/api/albums")).await?;
        Ok(response.json().await?)
    }

    async fn album(&self, base_url: &str, album_id: &str) -> Result<AlbumDetail, AlbumError> {
        let response = self
            .get(endpoint(base_url, &format!("/api/albums/{album_id}")))
            .await?;
        Ok(response.json().await?)
    }

    async fn download_original(
        &self,
        base_url: &str,
        asset_id: &str,
    ) -> Result<Vec<u8>, AlbumError> {
        let response = self
            .get(endpoint(base_url, &format!("/api/assets/{asset_id}/original")))
            .await?;
        let bytes = response.bytes().await?;
        tracing::debug!(asset_id, size = bytes.len(), "Downloaded original");
        Ok(bytes.to_vec())
    }
}
