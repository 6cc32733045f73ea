use axum::{extract::State, Json};
use serde::Serialize;

use crate::common::MetricsSnapshot;
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct MetricsResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    cache_enabled: bool,
    cache_entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    metrics: MetricsSnapshot,
}

/// Diagnostic counters.
///
/// Always 200: a service that cannot be built is reported in `error`.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    let metrics = state.metrics.snapshot();
    let cache_enabled = state.config.cache_enabled;

    let response = match state.fact_check_service().await {
        Ok(service) => MetricsResponse {
            status: "ok".to_string(),
            model: Some(service.model().to_string()),
            cache_enabled,
            cache_entries: service.cache_len().await,
            error: None,
            metrics,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Metrics requested while service is unavailable");
            MetricsResponse {
                status: "degraded".to_string(),
                model: None,
                cache_enabled,
                cache_entries: 0,
                error: Some(e.to_string()),
                metrics,
            }
        }
    };

    Json(response)
}
