//! Token-bucket request budgets, one bucket per adapter.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lode_core::entities::SearchResult;
use lode_core::enums::SourceKind;

use crate::SourceAdapter;
use crate::error::SourceError;

/// A bucket holding up to `capacity` tokens, refilled continuously at
/// `capacity` tokens per `period`.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: f64,
    refill_per_sec: f64,
    state: Mutex<BucketState>,
}

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    /// A full bucket of `capacity` tokens refilled over `period`.
    #[must_use]
    pub fn new(capacity: u32, period: Duration) -> Self {
        let capacity = f64::from(capacity.max(1));
        Self {
            capacity,
            refill_per_sec: capacity / period.as_secs_f64().max(f64::EPSILON),
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// A bucket allowing `requests` per minute.
    #[must_use]
    pub fn per_minute(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(60))
    }

    /// Take one token if available.
    pub fn try_acquire(&self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    fn try_acquire_at(&self, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let elapsed = now.saturating_duration_since(state.last_refill).as_secs_f64();
        state.tokens = elapsed
            .mul_add(self.refill_per_sec, state.tokens)
            .min(self.capacity);
        state.last_refill = now;
        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Adapter wrapper that spends one token per search.
pub struct RateLimited {
    inner: Arc<dyn SourceAdapter>,
    bucket: TokenBucket,
}

impl RateLimited {
    pub fn new(inner: Arc<dyn SourceAdapter>, bucket: TokenBucket) -> Self {
        Self { inner, bucket }
    }
}

#[async_trait]
impl SourceAdapter for RateLimited {
    fn kind(&self) -> SourceKind {
        self.inner.kind()
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SourceError> {
        if !self.bucket.try_acquire() {
            return Err(SourceError::Throttled { kind: self.kind() });
        }
        self.inner.search(query, max_results).await
    }
}
