//! Client-side pacing between consecutive calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Inserted between calls that page, batch or loop against the service.
///
/// The pause is policy, not backoff: it never reacts to response codes.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn pause(&self);
}

/// Sleep a fixed interval before the next call.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Never waits; counts how often it was asked to.
#[derive(Debug, Default)]
pub struct NoDelay {
    pauses: AtomicUsize,
}

impl NoDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RateLimiter for NoDelay {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::Relaxed);
    }
}
