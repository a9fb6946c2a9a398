use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::SettingsError;
use crate::services::{AlbumError, FrameError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Photo server error: {0}")]
    Album(#[from] AlbumError),

    #[error("Conversion error: {0}")]
    Codec(#[from] epd_codec::CodecError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FrameError> for ApiError {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::AlbumNotFound(_) | FrameError::EmptyAlbum(_) => {
                ApiError::NotFound(e.to_string())
            }
            FrameError::Album(e) => ApiError::Album(e),
            FrameError::Codec(e) => ApiError::Codec(e),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Settings(SettingsError::Io(_) | SettingsError::Yaml(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Settings(_) => StatusCode::BAD_REQUEST,
            ApiError::Album(_) | ApiError::Codec(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
