//! Fact-checking analysis endpoints.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::domains::fact_check::AnalysisResult;
use crate::server::app::AppState;
use crate::server::error::ApiError;

pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
pub const DEFAULT_FILENAME: &str = "unknown";

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

/// Analyze text content for factual claims.
pub async fn analyze_text_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    info!(chars = request.text.chars().count(), "Received text analysis request");

    let service = state
        .fact_check_service()
        .await
        .map_err(|e| ApiError::from_analysis("analyze-text", e))?;

    let result = service
        .analyze_text(&request.text)
        .await
        .map_err(|e| ApiError::from_analysis("analyze-text", e))?;

    Ok(Json(result))
}

/// Analyze an uploaded image (multipart field `file`) with multimodal input.
pub async fn analyze_image_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        let mime_type = field
            .content_type()
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

        upload = Some((bytes.to_vec(), filename, mime_type));
        break;
    }

    let Some((bytes, filename, mime_type)) = upload else {
        return Err(ApiError::unprocessable("Missing multipart field: file"));
    };

    info!(
        filename = %filename,
        mime_type = %mime_type,
        bytes = bytes.len(),
        "Received image analysis request"
    );

    let service = state
        .fact_check_service()
        .await
        .map_err(|e| ApiError::from_analysis("analyze-image", e))?;

    let result = service
        .analyze_image(bytes, &filename, &mime_type)
        .await
        .map_err(|e| ApiError::from_analysis("analyze-image", e))?;

    Ok(Json(result))
}
