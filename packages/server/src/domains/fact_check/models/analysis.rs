use serde::{Deserialize, Serialize};

use super::Claim;

/// Input submitted for fact-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Text {
        text: String,
    },
    Image {
        bytes: Vec<u8>,
        filename: String,
        mime_type: String,
    },
}

impl AnalysisRequest {
    pub fn text(text: impl Into<String>) -> Self {
        AnalysisRequest::Text { text: text.into() }
    }

    pub fn image(
        bytes: impl Into<Vec<u8>>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        AnalysisRequest::Image {
            bytes: bytes.into(),
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisRequest::Text { .. } => "text",
            AnalysisRequest::Image { .. } => "image",
        }
    }
}

/// Structured fact-check result returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    /// Credibility score in `[0, 100]`
    pub score: f64,
    pub summary_verdict: String,
    pub claims: Vec<Claim>,
    #[serde(default)]
    pub search_queries: Vec<String>,
    /// ISO-8601 UTC
    pub timestamp: String,
    pub input_preview: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_uses_camel_case() {
        let result = AnalysisResult {
            id: "r1".into(),
            score: 50.0,
            summary_verdict: "Mixed".into(),
            claims: vec![],
            search_queries: vec!["q".into()],
            timestamp: "2025-01-01T00:00:00Z".into(),
            input_preview: "hello".into(),
        };

        let body = serde_json::to_value(&result).unwrap();
        assert_eq!(body["summaryVerdict"], json!("Mixed"));
        assert_eq!(body["searchQueries"], json!(["q"]));
        assert_eq!(body["inputPreview"], json!("hello"));
    }
}
