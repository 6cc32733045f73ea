//! Pure Gemini REST API client
//!
//! A minimal client for the Generative Language `generateContent` endpoint with
//! no domain-specific logic. Calls run under a per-request timeout and are
//! retried with bounded exponential backoff on transient failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateContentRequest, Part};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let request = GenerateContentRequest::new(vec![Part::text("Is the sky blue?")])
//!     .with_google_search()
//!     .json_response();
//!
//! let payload: serde_json::Value = client.generate_content(&request).await?;
//! ```

pub mod error;
pub mod retry;
pub mod types;

pub use error::{GeminiError, Result};
pub use retry::RetryPolicy;
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Per-call timeout, independent of the retry budget.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new client for the given API key and model.
    ///
    /// Fails with [`GeminiError::Config`] when the key is empty.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::Config(
                "GEMINI_API_KEY not configured in environment".into(),
            ));
        }

        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GeminiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    /// Create from environment variables `GEMINI_API_KEY` and `GEMINI_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }

    /// Set a custom base URL (for proxies, local emulators, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Get the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Generate content, retrying transient failures.
    ///
    /// Returns the raw response payload on HTTP 200.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<serde_json::Value> {
        self.retry
            .run(|attempt| self.send_once(request, attempt))
            .await
    }

    /// One POST to the generation endpoint, no retries.
    async fn send_once(
        &self,
        request: &GenerateContentRequest,
        attempt: u32,
    ) -> Result<serde_json::Value> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, attempt, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = extract_error_message(&error_text);
            warn!(status = %status, attempt, error = %message, "Gemini API error");
            return Err(GeminiError::from_status(status.as_u16(), message));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %self.model,
            attempt,
            duration_ms = start.elapsed().as_millis() as u64,
            "Gemini generateContent"
        );

        Ok(payload)
    }
}

/// Pull `error.message` out of an error body, falling back to the raw text.
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
