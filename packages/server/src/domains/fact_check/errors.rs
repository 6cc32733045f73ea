use gemini_client::GeminiError;
use thiserror::Error;

/// Failures of a fact-check analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Provider answered without a candidate or content part
    #[error("Gemini returned an empty response: {0}")]
    EmptyResponse(String),

    /// Candidate text could not be decoded as JSON
    #[error("Could not parse Gemini response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// Decoded JSON had the wrong top-level shape
    #[error("Unexpected Gemini response shape: {0}")]
    UnexpectedShape(String),

    #[error(transparent)]
    Upstream(#[from] GeminiError),

    /// Service could not be constructed (missing API key)
    #[error("{0}")]
    Configuration(String),
}

impl AnalysisError {
    /// Quota conditions get a distinct "try again later" response.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            AnalysisError::Upstream(e) => e.is_rate_limited(),
            _ => false,
        }
    }
}
