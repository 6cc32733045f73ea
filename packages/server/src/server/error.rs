//! Error responses for the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domains::fact_check::AnalysisError;

pub const RATE_LIMIT_MESSAGE: &str =
    "Gemini API quota exceeded. Please wait a moment before trying again.";

/// `{ "detail": ... }` error body with a status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    /// Log and map an analysis failure.
    ///
    /// Quota exhaustion becomes 429 with a retry hint; everything else is a 500
    /// carrying the underlying message.
    pub fn from_analysis(operation: &str, err: AnalysisError) -> Self {
        error!(operation, error = %err, "Error analyzing content");

        if err.is_rate_limited() {
            Self::new(StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE)
        } else {
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
