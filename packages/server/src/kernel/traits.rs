// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// What to ask the model and how to read its answer live in domains/fact_check.
//
// Naming convention: Base* for trait names (e.g., BaseGenerativeAI)

use async_trait::async_trait;
use gemini_client::{GenerateContentRequest, Result};

// =============================================================================
// Generative AI Trait (Infrastructure - grounded content generation)
// =============================================================================

#[async_trait]
pub trait BaseGenerativeAI: Send + Sync {
    /// Send a generation request and return the raw response payload.
    ///
    /// Implementations own transport resilience (timeouts, retries); callers
    /// see only the final outcome.
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<serde_json::Value>;

    /// Model identifier, for diagnostics
    fn model(&self) -> &str;
}
