// AI implementation using Gemini
//
// This is the infrastructure implementation of BaseGenerativeAI.

use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateContentRequest, Result};

use super::BaseGenerativeAI;

#[async_trait]
impl BaseGenerativeAI for GeminiClient {
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<serde_json::Value> {
        GeminiClient::generate_content(self, request).await
    }

    fn model(&self) -> &str {
        GeminiClient::model(self)
    }
}
