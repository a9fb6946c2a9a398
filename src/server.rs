//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::State,
    http::{header::CONNECTION, HeaderMap, HeaderValue},
    response::{Json, Redirect, Response},
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::error::ApiError;
use crate::services::{
    AlbumSource, BatteryMonitor, ConfigStore, FrameService, SleepPlan, TrackingLedger,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConfigStore>,
    pub frames: Arc<FrameService>,
    pub battery: Arc<BatteryMonitor>,
}

/// Create application state around a config store and album source.
///
/// The tracking ledger lives in `photo_dir`.
pub fn create_app_state(
    config: Arc<ConfigStore>,
    albums: Arc<dyn AlbumSource>,
    photo_dir: &Path,
) -> AppState {
    let frames = Arc::new(FrameService::new(albums, TrackingLedger::in_dir(photo_dir)));
    AppState {
        config,
        frames,
        battery: Arc::new(BatteryMonitor::new()),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// It includes the `Connection: close` header to prevent connection
/// accumulation from ESP32 clients.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/download", get(handle_download))
        .route("/sleep", get(handle_sleep))
        .route("/settings", get(handle_get_settings).post(handle_update_settings))
        .route("/", get(|| async { Redirect::to("/settings") }))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // ESP32 HTTPClient never reuses connections; closing them
                // stops orphaned sockets from piling up.
                .layer(SetResponseHeaderLayer::overriding(
                    CONNECTION,
                    HeaderValue::from_static("close"),
                )),
        )
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_download(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    api::handle_download(
        State(state.config),
        State(state.frames),
        State(state.battery),
        headers,
    )
    .await
}

async fn handle_sleep(State(state): State<AppState>) -> Json<SleepPlan> {
    api::handle_sleep(State(state.config)).await
}

async fn handle_get_settings(State(state): State<AppState>) -> Json<api::SettingsResponse> {
    api::handle_get_settings(State(state.config), State(state.battery)).await
}

async fn handle_update_settings(
    State(state): State<AppState>,
    body: Json<api::SettingsUpdate>,
) -> Result<Json<api::SettingsResponse>, ApiError> {
    api::handle_update_settings(State(state.config), State(state.battery), body).await
}
