//! Error types for Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 429 from the generation endpoint
    #[error("Gemini API Error (429): {message}")]
    RateLimited { message: String },

    /// HTTP 5xx from the generation endpoint
    #[error("Gemini API Error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx status
    #[error("Gemini API Error ({status}): {message}")]
    Client { status: u16, message: String },

    /// Parse error (invalid JSON body)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeminiError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            429 => GeminiError::RateLimited { message },
            s if s >= 500 => GeminiError::Server { status, message },
            _ => GeminiError::Client { status, message },
        }
    }

    /// Rate limits, server errors and network faults are expected to clear on retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GeminiError::Network(_) | GeminiError::RateLimited { .. } | GeminiError::Server { .. }
        )
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, GeminiError::Client { .. })
    }

    /// Quota exhaustion, either as a 429 or reported inside another error body.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            GeminiError::RateLimited { .. } => true,
            other => other.to_string().contains("RESOURCE_EXHAUSTED"),
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GeminiError::RateLimited { .. } => Some(429),
            GeminiError::Server { status, .. } | GeminiError::Client { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            GeminiError::from_status(429, "slow down"),
            GeminiError::RateLimited { .. }
        ));
        assert!(matches!(
            GeminiError::from_status(503, "unavailable"),
            GeminiError::Server { status: 503, .. }
        ));
        assert!(matches!(
            GeminiError::from_status(401, "bad key"),
            GeminiError::Client { status: 401, .. }
        ));
    }

    #[test]
    fn test_transient_errors() {
        assert!(GeminiError::Network("reset".into()).is_transient());
        assert!(GeminiError::from_status(429, "").is_transient());
        assert!(GeminiError::from_status(500, "").is_transient());
        assert!(!GeminiError::from_status(400, "").is_transient());
        assert!(!GeminiError::Parse("eof".into()).is_transient());
        assert!(!GeminiError::Config("no key".into()).is_transient());
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(GeminiError::from_status(429, "quota").is_rate_limited());
        assert!(GeminiError::from_status(400, "RESOURCE_EXHAUSTED: quota").is_rate_limited());
        assert!(!GeminiError::from_status(500, "internal").is_rate_limited());
    }

    #[test]
    fn test_display_includes_status() {
        let err = GeminiError::from_status(503, "The model is overloaded");
        assert_eq!(err.to_string(), "Gemini API Error (503): The model is overloaded");
        assert_eq!(err.status(), Some(503));
    }
}
