//! In-process memoization of analysis results by input fingerprint.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use super::models::{AnalysisRequest, AnalysisResult};

/// SHA-256 fingerprint of an analysis input.
///
/// Text and image inputs are domain-separated so identical bytes never collide
/// across kinds. Image fingerprints include the media type.
pub fn fingerprint(request: &AnalysisRequest) -> String {
    let mut hasher = Sha256::new();
    match request {
        AnalysisRequest::Text { text } => {
            hasher.update(b"text:");
            hasher.update(text.as_bytes());
        }
        AnalysisRequest::Image {
            bytes, mime_type, ..
        } => {
            hasher.update(b"image:");
            hasher.update(mime_type.as_bytes());
            hasher.update(b":");
            hasher.update(bytes);
        }
    }
    hex::encode(hasher.finalize())
}

struct CacheEntry {
    result: AnalysisResult,
    inserted_at: Instant,
}

/// LRU result cache whose entries expire after a fixed TTL.
pub struct ResultCache {
    cache: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl ResultCache {
    /// A zero `capacity` is treated as one.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Cached result for `key`, if present and not expired.
    pub async fn get(&self, key: &str) -> Option<AnalysisResult> {
        let mut cache = self.cache.lock().await;

        if let Some(entry) = cache.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.result.clone());
            }
            // Expired
            cache.pop(key);
        }
        None
    }

    /// Store `result`, evicting the least recently used entry when full.
    pub async fn insert(&self, key: String, result: AnalysisResult) {
        self.cache.lock().await.put(
            key,
            CacheEntry {
                result,
                inserted_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn capacity(&self) -> usize {
        self.cache.lock().await.cap().get()
    }
}
