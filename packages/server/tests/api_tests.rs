//! HTTP surface tests driving the router in-process.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use common::{service_with, THREE_CLAIMS_RESPONSE};
use fact_check_core::kernel::MockGenerativeAI;
use fact_check_core::server::{build_app, AppState};
use fact_check_core::Config;
use gemini_client::{GeminiError, Part};
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "factcheckboundary";

fn app_with(mock: &MockGenerativeAI) -> Router {
    let (service, metrics) = service_with(mock);
    build_app(AppState::with_service(Config::default(), service, metrics))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn text_request(text: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze-text")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": text }).to_string()))
        .unwrap()
}

fn multipart_request(field: &str, filename: &str, content_type: Option<&str>, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/analyze-image")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_reports_running() {
    let app = app_with(&MockGenerativeAI::new());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "AI-Powered Fact Checker API is running");
    assert_eq!(body["version"], "1.0.0");
}

#[tokio::test]
async fn root_is_health_check() {
    let app = app_with(&MockGenerativeAI::new());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn analyze_text_returns_camel_case_result() {
    let mock = MockGenerativeAI::new().with_text_response(THREE_CLAIMS_RESPONSE);
    let app = app_with(&mock);

    let response = app.oneshot(text_request("claim A")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body = body_json(response).await;
    assert_eq!(body["inputPreview"], "claim A");
    assert_eq!(body["score"], 50.0);
    assert_eq!(body["claims"].as_array().unwrap().len(), 3);
    assert_eq!(body["claims"][0]["verdict"], "TRUE");
    assert_eq!(body["claims"][0]["sources"][0]["domain"], "nasa.gov");
    assert!(body["summaryVerdict"].is_string());
    assert!(body["searchQueries"].is_array());
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = app_with(&MockGenerativeAI::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn rate_limit_maps_to_429() {
    let mock = MockGenerativeAI::new().with_error(GeminiError::from_status(429, "Resource has been exhausted"));
    let app = app_with(&mock);

    let response = app.oneshot(text_request("claim A")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(
        body["detail"],
        "Gemini API quota exceeded. Please wait a moment before trying again."
    );
}

#[tokio::test]
async fn upstream_error_maps_to_500_with_message() {
    let mock = MockGenerativeAI::new().with_error(GeminiError::from_status(500, "Internal error encountered."));
    let app = app_with(&mock);

    let response = app.oneshot(text_request("claim A")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Gemini API Error (500): Internal error encountered.");
}

#[tokio::test]
async fn missing_api_key_fails_at_first_use() {
    let app = build_app(AppState::new(Config::default()));

    let response = app.oneshot(text_request("claim A")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "GEMINI_API_KEY not configured in environment");
}

#[tokio::test]
async fn metrics_reports_error_instead_of_failing() {
    let app = build_app(AppState::new(Config::default()));

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["error"], "GEMINI_API_KEY not configured in environment");
    assert_eq!(body["metrics"]["successes"], 0);
}

#[tokio::test]
async fn metrics_counts_analyses() {
    let mock = MockGenerativeAI::new().with_text_response(THREE_CLAIMS_RESPONSE);
    let app = app_with(&mock);

    let response = app.clone().oneshot(text_request("claim A")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "mock-gemini");
    assert!(body.get("error").is_none());
    assert_eq!(body["metrics"]["text_requests"], 1);
    assert_eq!(body["metrics"]["successes"], 1);
    assert_eq!(body["metrics"]["claims_extracted"], 3);
}

#[tokio::test]
async fn analyze_image_accepts_multipart_upload() {
    let mock = MockGenerativeAI::new().with_text_response(THREE_CLAIMS_RESPONSE);
    let app = app_with(&mock);

    let response = app
        .oneshot(multipart_request("file", "photo.png", Some("image/png"), b"png-bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["inputPreview"], "Image: photo.png");

    let calls = mock.calls();
    let first = calls[0].parts().next().unwrap();
    assert_eq!(*first, Part::inline_data(b"png-bytes", "image/png"));
}

#[tokio::test]
async fn analyze_image_defaults_media_type() {
    let mock = MockGenerativeAI::new().with_text_response(THREE_CLAIMS_RESPONSE);
    let app = app_with(&mock);

    let response = app
        .oneshot(multipart_request("file", "scan", None, b"raw"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let calls = mock.calls();
    let first = calls[0].parts().next().unwrap();
    assert_eq!(*first, Part::inline_data(b"raw", "image/jpeg"));
}

#[tokio::test]
async fn analyze_image_requires_file_field() {
    let mock = MockGenerativeAI::new();
    let app = app_with(&mock);

    let response = app
        .oneshot(multipart_request("attachment", "photo.png", Some("image/png"), b"x"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(mock.call_count(), 0);
}
