// TestDependencies - mock implementations for testing
//
// Provides a scripted generative AI that can be injected into FactCheckService.

use async_trait::async_trait;
use gemini_client::{GeminiError, GenerateContentRequest, Result};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::BaseGenerativeAI;

// =============================================================================
// Mock Generative AI
// =============================================================================

/// Scripted responder that records every request it receives.
///
/// Responses are consumed in order; once the script is exhausted the mock
/// keeps returning an empty fact-check.
#[derive(Clone, Default)]
pub struct MockGenerativeAI {
    responses: Arc<Mutex<VecDeque<Result<Value>>>>,
    calls: Arc<Mutex<Vec<GenerateContentRequest>>>,
}

impl MockGenerativeAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw provider payload.
    pub fn with_payload(self, payload: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(payload));
        self
    }

    /// Queue a payload whose first candidate carries `text`.
    pub fn with_text_response(self, text: &str) -> Self {
        self.with_payload(candidate_payload(text, &[]))
    }

    /// Queue a payload with candidate text and grounding search queries.
    pub fn with_grounded_response(self, text: &str, queries: &[&str]) -> Self {
        self.with_payload(candidate_payload(text, queries))
    }

    /// Queue an upstream failure.
    pub fn with_error(self, error: GeminiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// All requests received so far
    pub fn calls(&self) -> Vec<GenerateContentRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseGenerativeAI for MockGenerativeAI {
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<Value> {
        self.calls.lock().unwrap().push(request.clone());

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(candidate_payload(r#"{"summaryVerdict": "", "claims": []}"#, &[])))
    }

    fn model(&self) -> &str {
        "mock-gemini"
    }
}

/// Minimal `generateContent` payload around `text`.
pub fn candidate_payload(text: &str, queries: &[&str]) -> Value {
    let mut candidate = json!({
        "content": {"parts": [{"text": text}], "role": "model"},
        "finishReason": "STOP"
    });
    if !queries.is_empty() {
        candidate["groundingMetadata"] = json!({ "webSearchQueries": queries });
    }
    json!({ "candidates": [candidate] })
}
