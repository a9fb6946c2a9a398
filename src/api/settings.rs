use axum::{extract::State, response::Json, Json as JsonExtractor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ImmichSettings;
use crate::services::{battery, BatteryMonitor, ConfigStore};

/// Current settings with the last battery reading
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    #[serde(flatten)]
    pub immich: ImmichSettings,
    /// Last reported voltage in mV, 0 when unknown
    pub battery_voltage: f64,
    /// Estimated charge in percent
    pub battery_percentage: f64,
}

/// Partial settings update; omitted fields keep their current value
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SettingsUpdate {
    pub url: Option<String>,
    pub album: Option<String>,
    pub rotation: Option<u16>,
    pub enhanced: Option<f32>,
    pub contrast: Option<f32>,
    pub strength: Option<f32>,
    pub display_mode: Option<String>,
    pub image_order: Option<String>,
    pub sleep_start_hour: Option<u32>,
    pub sleep_start_minute: Option<u32>,
    pub sleep_end_hour: Option<u32>,
    pub sleep_end_minute: Option<u32>,
    pub wakeup_interval: Option<u32>,
}

impl SettingsUpdate {
    pub fn apply(self, settings: &mut ImmichSettings) {
        macro_rules! merge {
            ($target:ident; $($field:ident),*) => {
                $(if let Some(v) = $field { $target.$field = v; })*
            };
        }
        let SettingsUpdate {
            url,
            album,
            rotation,
            enhanced,
            contrast,
            strength,
            display_mode,
            image_order,
            sleep_start_hour,
            sleep_start_minute,
            sleep_end_hour,
            sleep_end_minute,
            wakeup_interval,
        } = self;
        merge!(
            settings;
            url,
            album,
            rotation,
            enhanced,
            contrast,
            strength,
            display_mode,
            image_order,
            sleep_start_hour,
            sleep_start_minute,
            sleep_end_hour,
            sleep_end_minute,
            wakeup_interval
        );
    }
}

async fn settings_response(settings: ImmichSettings, battery: &BatteryMonitor) -> SettingsResponse {
    let voltage = battery.voltage().await;
    SettingsResponse {
        immich: settings,
        battery_voltage: voltage,
        battery_percentage: if voltage > 0.0 {
            battery::percentage(voltage)
        } else {
            0.0
        },
    }
}

/// Get the current settings
#[utoipa::path(
    get,
    path = "/settings",
    responses(
        (status = 200, description = "Current settings", body = SettingsResponse),
    ),
    tag = "Settings"
)]
pub async fn handle_get_settings(
    State(config): State<Arc<ConfigStore>>,
    State(battery): State<Arc<BatteryMonitor>>,
) -> Json<SettingsResponse> {
    let snapshot = config.snapshot().await;
    Json(settings_response(snapshot.immich.clone(), &battery).await)
}

/// Update settings
///
/// Merges the given fields into the current settings, validates the result,
/// writes it to the config file and applies it immediately.
#[utoipa::path(
    post,
    path = "/settings",
    request_body = SettingsUpdate,
    responses(
        (status = 200, description = "Settings saved", body = SettingsResponse),
        (status = 400, description = "Invalid settings"),
        (status = 500, description = "Config file could not be written"),
    ),
    tag = "Settings"
)]
pub async fn handle_update_settings(
    State(config): State<Arc<ConfigStore>>,
    State(battery): State<Arc<BatteryMonitor>>,
    JsonExtractor(update): JsonExtractor<SettingsUpdate>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let mut next = (*config.snapshot().await).clone();
    update.apply(&mut next.immich);

    let saved = config.save(next).await?;
    tracing::info!(
        album = %saved.immich.album,
        rotation = saved.immich.rotation,
        order = %saved.immich.image_order,
        "Settings updated"
    );

    Ok(Json(settings_response(saved.immich.clone(), &battery).await))
}
