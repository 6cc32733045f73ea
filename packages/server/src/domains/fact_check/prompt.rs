//! Outbound request assembly for text and image analyses.

use gemini_client::{truncate_chars, GenerateContentRequest, Part};

use super::models::AnalysisRequest;

/// Characters of submitted text echoed back as the input preview.
pub const PREVIEW_CHARS: usize = 150;

pub const FACT_CHECK_PROMPT: &str = r#"You are a professional fact-checking assistant.
Analyze the provided content and extract the key factual claims.
For each claim, use Google Search to verify its accuracy.

Respond with JSON only, using this schema:
{
    "summaryVerdict": "A brief overview of the overall truthfulness",
    "claims": [
        {
            "text": "The exact claim extracted",
            "verdict": "TRUE" | "FALSE" | "UNSURE",
            "explanation": "Brief reasoning based on search results",
            "sources": [
                {
                    "domain": "example.com",
                    "title": "Page Title",
                    "url": "https://example.com/source"
                }
            ]
        }
    ]
}"#;

/// Build the grounded, JSON-mode generation request.
///
/// Text requests carry one part (prompt + text). Image requests carry the
/// inline image followed by the bare prompt.
pub fn build_request(request: &AnalysisRequest) -> GenerateContentRequest {
    let parts = match request {
        AnalysisRequest::Text { text } => vec![Part::text(format!(
            "{}\n\nText to analyze:\n{}",
            FACT_CHECK_PROMPT, text
        ))],
        AnalysisRequest::Image {
            bytes, mime_type, ..
        } => vec![
            Part::inline_data(bytes, mime_type.as_str()),
            Part::text(FACT_CHECK_PROMPT),
        ],
    };

    GenerateContentRequest::new(parts)
        .with_google_search()
        .json_response()
}

/// Short description of the input shown alongside the result.
pub fn input_preview(request: &AnalysisRequest) -> String {
    match request {
        AnalysisRequest::Text { text } => match truncate_chars(text, PREVIEW_CHARS) {
            (head, true) => format!("{}...", head),
            (whole, false) => whole.to_string(),
        },
        AnalysisRequest::Image { filename, .. } => format!("Image: {}", filename),
    }
}
