//! Periodic purge of abandoned sessions and rate windows
//!
//! Expiry is always enforced on access; this service only bounds memory for
//! phones and addresses that never come back.

use std::sync::Arc;
use std::time::Duration;

use otp_shared::config::CleanupConfig;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::services::clock::Clock;
use crate::services::rate_limit::RateLimiterTrait;
use crate::services::verification::SessionStore;

/// Service for removing expired sessions and stale rate windows
pub struct VerificationCleanupService<S: SessionStore + 'static, R: RateLimiterTrait + 'static> {
    sessions: Arc<S>,
    limiters: Vec<Arc<R>>,
    clock: Arc<dyn Clock>,
    session_ttl: Duration,
    rate_window: Duration,
    config: CleanupConfig,
}

impl<S: SessionStore, R: RateLimiterTrait> VerificationCleanupService<S, R> {
    pub fn new(
        sessions: Arc<S>,
        limiters: Vec<Arc<R>>,
        clock: Arc<dyn Clock>,
        session_ttl: Duration,
        rate_window: Duration,
        config: CleanupConfig,
    ) -> Self {
        Self {
            sessions,
            limiters,
            clock,
            session_ttl,
            rate_window,
            config,
        }
    }

    /// Run a single cleanup cycle
    ///
    /// Failures of one store are collected in the result and do not stop
    /// the others.
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of cleanup operations
    /// * `Err(DomainError)` - If cleanup fails
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        let mut result = CleanupResult::default();

        match self
            .sessions
            .purge_expired(self.session_ttl, self.clock.now())
            .await
        {
            Ok(count) => result.expired_sessions_removed = count,
            Err(e) => {
                error!("Failed to purge expired sessions: {}", e);
                result.errors.push(format!("Session purge error: {}", e));
            }
        }

        for limiter in &self.limiters {
            match limiter.purge_stale(self.rate_window).await {
                Ok(count) => result.stale_windows_removed += count,
                Err(e) => {
                    error!("Failed to purge stale rate windows: {}", e);
                    result.errors.push(format!("Rate window purge error: {}", e));
                }
            }
        }

        info!(
            expired_sessions = result.expired_sessions_removed,
            stale_windows = result.stale_windows_removed,
            event = "otp_cleanup",
            "Verification cleanup completed"
        );

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` without spawning when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Verification cleanup service is disabled");
            return None;
        }

        let interval = self.config.interval();

        Some(tokio::spawn(async move {
            info!(
                "Verification cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);
            // The first tick completes immediately
            interval_timer.tick().await;

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Verification cleanup cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired sessions removed
    pub expired_sessions_removed: usize,
    /// Number of stale rate windows removed across all limiters
    pub stale_windows_removed: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get total number of items cleaned up
    pub fn total_cleaned(&self) -> usize {
        self.expired_sessions_removed + self.stale_windows_removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{OtpPurpose, VerificationSession};
    use crate::services::clock::ManualClock;
    use crate::services::rate_limit::FixedWindowRateLimiter;
    use crate::services::verification::InMemorySessionStore;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};

    const HOUR: Duration = Duration::from_secs(3600);
    const FIVE_MINUTES: Duration = Duration::from_secs(300);

    fn fixture(
        enabled: bool,
    ) -> (
        Arc<VerificationCleanupService<InMemorySessionStore, FixedWindowRateLimiter>>,
        Arc<InMemorySessionStore>,
        Arc<FixedWindowRateLimiter>,
        Arc<ManualClock>,
    ) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
        ));
        let sessions = Arc::new(InMemorySessionStore::new());
        let limiter = Arc::new(FixedWindowRateLimiter::with_clock(clock.clone()));
        let service = Arc::new(VerificationCleanupService::new(
            sessions.clone(),
            vec![limiter.clone()],
            clock.clone(),
            FIVE_MINUTES,
            HOUR,
            CleanupConfig {
                enabled,
                interval_seconds: 60,
            },
        ));
        (service, sessions, limiter, clock)
    }

    #[tokio::test]
    async fn test_run_cleanup_removes_only_expired_entries() {
        let (service, sessions, limiter, clock) = fixture(true);

        let start = clock.now();
        sessions
            .upsert(VerificationSession::new(
                "+919876543210",
                "111111",
                OtpPurpose::Registration,
                start,
            ))
            .await
            .unwrap();
        limiter.check_and_increment("10.0.0.1", 15, HOUR).await.unwrap();

        clock.advance(ChronoDuration::minutes(10));
        sessions
            .upsert(VerificationSession::new(
                "+919876543211",
                "222222",
                OtpPurpose::Registration,
                clock.now(),
            ))
            .await
            .unwrap();

        let result = service.run_cleanup().await.unwrap();
        assert!(result.is_success());
        assert_eq!(result.expired_sessions_removed, 1);
        assert_eq!(result.stale_windows_removed, 0);
        assert_eq!(sessions.count().await.unwrap(), 1);

        clock.advance(ChronoDuration::minutes(55));
        let result = service.run_cleanup().await.unwrap();
        assert_eq!(result.stale_windows_removed, 1);
        assert_eq!(result.total_cleaned(), 2);
    }

    #[tokio::test]
    async fn test_disabled_service_does_not_spawn() {
        let (service, _, _, _) = fixture(false);
        assert!(service.start_background_task().is_none());
    }

    #[tokio::test]
    async fn test_background_task_spawns_when_enabled() {
        let (service, _, _, _) = fixture(true);
        let handle = service.start_background_task().unwrap();
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
    }
}
