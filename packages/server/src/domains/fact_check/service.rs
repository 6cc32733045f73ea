//! Fact-check orchestration: request → transport → parse → normalize → score.

use std::sync::Arc;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use gemini_client::{GeminiClient, RetryPolicy};
use serde_json::Value;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::cache::{fingerprint, ResultCache};
use super::errors::AnalysisError;
use super::models::{AnalysisRequest, AnalysisResult};
use super::normalizer::{normalize_claims, reissue_claim_id};
use super::parser::{extract_search_queries, parse_gemini_response};
use super::prompt::{build_request, input_preview};
use crate::common::ServiceMetrics;
use crate::config::Config;
use crate::kernel::BaseGenerativeAI;

/// Analyzes text and images for factual claims.
///
/// Holds only immutable configuration and thread-safe counters/cache, so one
/// instance serves all concurrent requests.
pub struct FactCheckService {
    ai: Arc<dyn BaseGenerativeAI>,
    cache: Option<ResultCache>,
    metrics: Arc<ServiceMetrics>,
}

impl FactCheckService {
    pub fn new(ai: Arc<dyn BaseGenerativeAI>, metrics: Arc<ServiceMetrics>) -> Self {
        Self {
            ai,
            cache: None,
            metrics,
        }
    }

    /// Memoize results of identical inputs.
    pub fn with_cache(mut self, cache: ResultCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the service against the real Gemini API.
    ///
    /// Fails with [`AnalysisError::Configuration`] when no API key is set.
    pub fn from_config(config: &Config, metrics: Arc<ServiceMetrics>) -> Result<Self, AnalysisError> {
        let retry = RetryPolicy::default().with_client_error_retries(config.gemini_retry_client_errors);
        let client = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())
            .map_err(|e| AnalysisError::Configuration(config_message(e)))?
            .with_base_url(config.gemini_base_url.clone())
            .with_retry_policy(retry);

        info!(model = %client.model(), "Gemini fact-check service initialized");

        let service = Self::new(Arc::new(client), metrics);
        Ok(if config.cache_enabled {
            service.with_cache(ResultCache::new(config.cache_ttl, config.cache_capacity))
        } else {
            service
        })
    }

    pub fn model(&self) -> &str {
        self.ai.model()
    }

    /// Entries currently cached (0 when caching is off)
    pub async fn cache_len(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.len().await,
            None => 0,
        }
    }

    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        self.analyze(AnalysisRequest::text(text)).await
    }

    pub async fn analyze_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze(AnalysisRequest::image(bytes, filename, mime_type))
            .await
    }

    /// Run one analysis end to end.
    #[instrument(skip_all, fields(kind = request.kind()))]
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        self.metrics.record_request(request.kind());
        let start = Instant::now();

        let key = self.cache.as_ref().map(|_| fingerprint(&request));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(cached) = cache.get(key).await {
                self.metrics.record_cache_hit();
                self.metrics
                    .record_success(cached.claims.len(), start.elapsed());
                info!(fingerprint = %&key[..12], "Serving cached analysis");
                return Ok(restamp(cached, &request));
            }
            self.metrics.record_cache_miss();
        }

        match self.run(&request).await {
            Ok(result) => {
                self.metrics
                    .record_success(result.claims.len(), start.elapsed());
                info!(
                    claims = result.claims.len(),
                    score = result.score,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Analysis complete"
                );
                if let (Some(cache), Some(key)) = (&self.cache, key) {
                    cache.insert(key, result.clone()).await;
                }
                Ok(result)
            }
            Err(e) => {
                self.metrics.record_failure(e.is_rate_limited());
                error!(error = %e, kind = request.kind(), "Analysis failed");
                Err(e)
            }
        }
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let preview = input_preview(request);
        let outbound = build_request(request);

        let payload = self.ai.generate_content(&outbound).await?;

        let parsed = parse_gemini_response(&payload)?;
        let raw_claims = parsed
            .get("claims")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let (claims, score) = normalize_claims(raw_claims);
        let search_queries = extract_search_queries(&payload);

        Ok(AnalysisResult {
            id: Uuid::new_v4().to_string(),
            score,
            summary_verdict: parsed
                .get("summaryVerdict")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            claims,
            search_queries,
            timestamp: now_timestamp(),
            input_preview: preview,
        })
    }
}

/// A cached result gets its own identity and the preview of the request it answers.
///
/// Image fingerprints ignore the filename, so the preview is rebuilt.
fn restamp(mut result: AnalysisResult, request: &AnalysisRequest) -> AnalysisResult {
    result.id = Uuid::new_v4().to_string();
    result.timestamp = now_timestamp();
    result.input_preview = input_preview(request);
    for claim in &mut result.claims {
        claim.id = reissue_claim_id(&claim.id);
    }
    result
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn config_message(error: gemini_client::GeminiError) -> String {
    match error {
        gemini_client::GeminiError::Config(message) => message,
        other => other.to_string(),
    }
}
