//! Process-wide analysis counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Lock-free counters updated by every analysis.
#[derive(Debug)]
pub struct ServiceMetrics {
    started_at: Instant,
    text_requests: AtomicU64,
    image_requests: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    rate_limited: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    claims_extracted: AtomicU64,
    total_latency_ms: AtomicU64,
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self {
            started_at: Instant::now(),
            text_requests: AtomicU64::new(0),
            image_requests: AtomicU64::new(0),
            successes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            rate_limited: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            claims_extracted: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
        }
    }
}

/// Point-in-time copy of [`ServiceMetrics`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub text_requests: u64,
    pub image_requests: u64,
    pub successes: u64,
    pub failures: u64,
    pub rate_limited: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub claims_extracted: u64,
    pub avg_latency_ms: f64,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, kind: &str) {
        let counter = match kind {
            "image" => &self.image_requests,
            _ => &self.text_requests,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self, claims: usize, elapsed: Duration) {
        self.successes.fetch_add(1, Ordering::Relaxed);
        self.claims_extracted
            .fetch_add(claims as u64, Ordering::Relaxed);
        self.total_latency_ms
            .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_failure(&self, rate_limited: bool) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        if rate_limited {
            self.rate_limited.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let successes = self.successes.load(Ordering::Relaxed);
        let total_latency_ms = self.total_latency_ms.load(Ordering::Relaxed);

        MetricsSnapshot {
            uptime_secs: self.started_at.elapsed().as_secs(),
            text_requests: self.text_requests.load(Ordering::Relaxed),
            image_requests: self.image_requests.load(Ordering::Relaxed),
            successes,
            failures: self.failures.load(Ordering::Relaxed),
            rate_limited: self.rate_limited.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            claims_extracted: self.claims_extracted.load(Ordering::Relaxed),
            avg_latency_ms: if successes == 0 {
                0.0
            } else {
                total_latency_ms as f64 / successes as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = ServiceMetrics::new();
        metrics.record_request("text");
        metrics.record_request("image");
        metrics.record_request("text");
        metrics.record_cache_miss();
        metrics.record_success(3, Duration::from_millis(100));
        metrics.record_success(1, Duration::from_millis(300));
        metrics.record_failure(true);
        metrics.record_failure(false);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.text_requests, 2);
        assert_eq!(snapshot.image_requests, 1);
        assert_eq!(snapshot.successes, 2);
        assert_eq!(snapshot.failures, 2);
        assert_eq!(snapshot.rate_limited, 1);
        assert_eq!(snapshot.cache_misses, 1);
        assert_eq!(snapshot.claims_extracted, 4);
        assert_eq!(snapshot.avg_latency_ms, 200.0);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = ServiceMetrics::new().snapshot();
        assert_eq!(snapshot.successes, 0);
        assert_eq!(snapshot.avg_latency_ms, 0.0);
    }
}
