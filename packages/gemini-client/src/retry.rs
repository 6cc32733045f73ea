//! Bounded retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{GeminiError, Result};

/// Retry policy for generation calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Base of the exponential wait
    pub multiplier: Duration,

    /// Lower bound on the wait between attempts
    pub min_wait: Duration,

    /// Upper bound on the wait between attempts
    pub max_wait: Duration,

    /// Retry non-429 4xx responses as if they were transient
    pub retry_client_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            multiplier: Duration::from_secs(1),
            min_wait: Duration::from_secs(2),
            max_wait: Duration::from_secs(10),
            retry_client_errors: false,
        }
    }
}

impl RetryPolicy {
    /// Same attempt budget, no waiting between attempts.
    pub fn immediate() -> Self {
        Self {
            multiplier: Duration::ZERO,
            min_wait: Duration::ZERO,
            max_wait: Duration::ZERO,
            ..Default::default()
        }
    }

    pub fn with_client_error_retries(mut self, enabled: bool) -> Self {
        self.retry_client_errors = enabled;
        self
    }

    /// Wait after the given 1-based attempt failed.
    ///
    /// `multiplier * 2^(attempt - 1)`, bounded to `[min_wait, max_wait]`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.multiplier
            .saturating_mul(exp)
            .max(self.min_wait)
            .min(self.max_wait)
    }

    /// Whether this error kind is worth another attempt.
    pub fn should_retry(&self, error: &GeminiError) -> bool {
        error.is_transient() || (self.retry_client_errors && error.is_client_error())
    }

    /// Run `operation` until it succeeds, fails permanently, or the budget runs out.
    ///
    /// The operation receives the 1-based attempt number. The last error is
    /// returned as-is.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < max_attempts && self.should_retry(&error) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Gemini call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
