use axum::{extract::State, http::StatusCode, Json};

use crate::adapters::inbound::http::{dto::HealthResponseDto, router::AppState};

/// Handle `GET /health`. Answers 200 even when storage is down, so the
/// process stays observable while degraded.
pub async fn health(State(app_state): State<AppState>) -> (StatusCode, Json<HealthResponseDto>) {
    let health = app_state.upload_service.storage_health();
    (StatusCode::OK, Json(health.into()))
}
