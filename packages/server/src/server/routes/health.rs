use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    message: String,
    version: String,
    status: String,
}

/// Health check endpoint
///
/// Liveness only; the Gemini key is not validated here.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: format!("{} is running", state.config.app_name),
        version: state.config.app_version.clone(),
        status: "healthy".to_string(),
    })
}
