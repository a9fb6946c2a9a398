use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::{BatteryMonitor, ConfigStore, FrameService};

/// Header carrying the frame's battery voltage in millivolts
pub const BATTERY_HEADER: &str = "batteryCap";

/// Get the next photo as panel codes
///
/// Picks the next photo of the configured album, converts it for the panel
/// and returns the packed codes as a C array body. The frame reports its
/// battery voltage on the same request.
#[utoipa::path(
    get,
    path = "/download",
    responses(
        (
            status = 200,
            description = "Packed panel codes",
            content_type = "text/plain",
            body = String
        ),
        (status = 404, description = "Album not found or empty"),
        (status = 500, description = "Photo server or conversion failure"),
    ),
    params(
        ("batteryCap" = Option<f64>, Header, description = "Battery voltage in mV"),
    ),
    tag = "Frame"
)]
pub async fn handle_download(
    State(config): State<Arc<ConfigStore>>,
    State(frames): State<Arc<FrameService>>,
    State(battery): State<Arc<BatteryMonitor>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(millivolts) = headers
        .get(BATTERY_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
    {
        battery.record(millivolts).await;
    }

    let snapshot = config.snapshot().await;
    let frame = frames.next_frame(&snapshot).await?;

    tracing::info!(asset_id = %frame.asset_id, size = frame.text.len(), "Serving frame");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", frame.file_name()),
            ),
        ],
        frame.text,
    )
        .into_response())
}
