//! In-memory fixed-window limiter

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::RateWindow;
use crate::errors::DomainResult;
use crate::services::clock::{Clock, SystemClock};

use super::traits::RateLimiterTrait;

/// Fixed-window counter backed by a sharded concurrent map
///
/// Every increment is a single entry-level read-modify-write, so concurrent
/// calls for one key never lose updates and distinct keys rarely share a
/// shard lock.
pub struct FixedWindowRateLimiter {
    windows: DashMap<String, RateWindow>,
    clock: Arc<dyn Clock>,
}

impl FixedWindowRateLimiter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: DashMap::new(),
            clock,
        }
    }

    /// Number of tracked identifiers
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}

impl Default for FixedWindowRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimiterTrait for FixedWindowRateLimiter {
    async fn check_and_increment(
        &self,
        key: &str,
        limit: u32,
        window: Duration,
    ) -> DomainResult<bool> {
        let now = self.clock.now();
        let count = self
            .windows
            .entry(key.to_owned())
            .and_modify(|current| {
                current.register(window, now);
            })
            .or_insert_with(|| RateWindow::open(now))
            .count;

        Ok(count <= limit)
    }

    async fn current_count(&self, key: &str) -> DomainResult<Option<u32>> {
        Ok(self.windows.get(key).map(|window| window.count))
    }

    async fn purge_stale(&self, window: Duration) -> DomainResult<usize> {
        let now = self.clock.now();
        let mut removed = 0;
        self.windows.retain(|_, current| {
            let keep = !current.is_stale(window, now);
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }

    async fn clear(&self) -> DomainResult<()> {
        self.windows.clear();
        Ok(())
    }
}
