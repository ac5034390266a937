//! Unit tests for the fixed-window rate limiter

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::services::clock::ManualClock;
use crate::services::rate_limit::{FixedWindowRateLimiter, RateLimiterTrait};

const HOUR: Duration = Duration::from_secs(3600);

fn limiter() -> (FixedWindowRateLimiter, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
    ));
    (FixedWindowRateLimiter::with_clock(clock.clone()), clock)
}

#[tokio::test]
async fn test_allows_up_to_limit_then_denies() {
    let (limiter, _) = limiter();

    for _ in 0..15 {
        assert!(limiter.check_and_increment("+919876543210", 15, HOUR).await.unwrap());
    }
    assert!(!limiter.check_and_increment("+919876543210", 15, HOUR).await.unwrap());
}

#[tokio::test]
async fn test_denied_calls_keep_counting() {
    let (limiter, _) = limiter();

    for _ in 0..5 {
        limiter.check_and_increment("10.0.0.1", 2, HOUR).await.unwrap();
    }
    assert_eq!(limiter.current_count("10.0.0.1").await.unwrap(), Some(5));
}

#[tokio::test]
async fn test_window_reset_after_elapsed() {
    let (limiter, clock) = limiter();

    assert!(limiter.check_and_increment("key", 1, HOUR).await.unwrap());
    assert!(!limiter.check_and_increment("key", 1, HOUR).await.unwrap());

    clock.advance(ChronoDuration::minutes(61));
    assert!(limiter.check_and_increment("key", 1, HOUR).await.unwrap());
    assert_eq!(limiter.current_count("key").await.unwrap(), Some(1));
}

#[tokio::test]
async fn test_keys_are_independent() {
    let (limiter, _) = limiter();

    assert!(limiter.check_and_increment("a", 1, HOUR).await.unwrap());
    assert!(!limiter.check_and_increment("a", 1, HOUR).await.unwrap());
    assert!(limiter.check_and_increment("b", 1, HOUR).await.unwrap());
    assert_eq!(limiter.current_count("c").await.unwrap(), None);
}

#[tokio::test]
async fn test_purge_stale_windows() {
    let (limiter, clock) = limiter();

    limiter.check_and_increment("old", 5, HOUR).await.unwrap();
    clock.advance(ChronoDuration::minutes(45));
    limiter.check_and_increment("fresh", 5, HOUR).await.unwrap();
    clock.advance(ChronoDuration::minutes(30));

    assert_eq!(limiter.purge_stale(HOUR).await.unwrap(), 1);
    assert_eq!(limiter.tracked_keys(), 1);
    assert_eq!(limiter.current_count("fresh").await.unwrap(), Some(1));

    limiter.clear().await.unwrap();
    assert_eq!(limiter.tracked_keys(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_are_not_lost() {
    let limiter = Arc::new(FixedWindowRateLimiter::new());

    let handles: Vec<_> = (0..64)
        .map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move {
                limiter.check_and_increment("shared", 10, HOUR).await.unwrap()
            })
        })
        .collect();

    let mut allowed = 0;
    for handle in handles {
        if handle.await.unwrap() {
            allowed += 1;
        }
    }

    assert_eq!(allowed, 10);
    assert_eq!(limiter.current_count("shared").await.unwrap(), Some(64));
}
