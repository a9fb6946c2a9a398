use axum::{extract::State, response::Json};
use chrono::Local;
use std::sync::Arc;

use crate::services::{plan_sleep, ConfigStore, SleepPlan};

/// Get how long the frame should sleep
///
/// Next wakeup on the configured interval grid, skipping the nightly
/// sleep window.
#[utoipa::path(
    get,
    path = "/sleep",
    responses(
        (status = 200, description = "Sleep plan", body = SleepPlan),
    ),
    tag = "Frame"
)]
pub async fn handle_sleep(State(config): State<Arc<ConfigStore>>) -> Json<SleepPlan> {
    let snapshot = config.snapshot().await;
    Json(plan_sleep(Local::now().naive_local(), &snapshot.immich))
}
