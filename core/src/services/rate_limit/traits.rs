//! Rate limiting trait

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainResult;

/// Rate limiting service trait for OTP issuance
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Count one request for `key` and report whether it is within `limit`.
    ///
    /// The request is counted even when it is denied.
    async fn check_and_increment(&self, key: &str, limit: u32, window: Duration)
        -> DomainResult<bool>;

    /// Requests counted for `key` in its current window, if any
    async fn current_count(&self, key: &str) -> DomainResult<Option<u32>>;

    /// Drop windows older than `window`; returns how many were removed
    async fn purge_stale(&self, window: Duration) -> DomainResult<usize>;

    /// Forget every window
    async fn clear(&self) -> DomainResult<()>;
}
