//! Unit tests for verification service wiring

use chrono::Duration as ChronoDuration;
use otp_shared::config::{CleanupConfig, OtpConfig, RateLimitConfig};
use std::time::Duration;

use crate::domain::entities::OtpPurpose;
use crate::domain::value_objects::{SendOtpResult, VerifyOtpResult};
use crate::services::verification::{RequestOrigin, SessionStore, VerificationServiceConfig};

use super::mocks::{harness, PHONE};

#[test]
fn test_config_from_shared_config() {
    let otp = OtpConfig {
        session_ttl_ms: 120_000,
        max_verify_attempts: 4,
        code_length: 8,
        sender_name: Some("SafeScan24".to_string()),
    };
    let rate_limit = RateLimitConfig {
        enabled: false,
        max_requests_per_window_per_phone: 3,
        max_requests_per_window_per_source: 7,
        window_duration_ms: 600_000,
    };

    let config = VerificationServiceConfig::from_config(&otp, &rate_limit).unwrap();
    assert_eq!(config.session_ttl, Duration::from_secs(120));
    assert_eq!(config.max_verify_attempts, 4);
    assert_eq!(config.code_length, 8);
    assert_eq!(config.sender_name.as_deref(), Some("SafeScan24"));
    assert!(!config.rate_limiting_enabled);
    assert_eq!(config.max_requests_per_phone, 3);
    assert_eq!(config.max_requests_per_source, 7);
    assert_eq!(config.rate_window, Duration::from_secs(600));

    let policy = config.attempt_policy();
    assert_eq!(policy.max_attempts, 4);
    assert_eq!(policy.session_ttl, Duration::from_secs(120));
}

#[test]
fn test_default_config_matches_shared_defaults() {
    let from_shared = VerificationServiceConfig::from_config(
        &OtpConfig::default(),
        &RateLimitConfig::default(),
    )
    .unwrap();
    let default = VerificationServiceConfig::default();

    assert_eq!(from_shared.session_ttl, default.session_ttl);
    assert_eq!(from_shared.max_verify_attempts, default.max_verify_attempts);
    assert_eq!(from_shared.code_length, default.code_length);
    assert_eq!(from_shared.max_requests_per_phone, default.max_requests_per_phone);
    assert_eq!(from_shared.max_requests_per_source, default.max_requests_per_source);
    assert_eq!(from_shared.rate_window, default.rate_window);
}

#[test]
fn test_from_config_rejects_invalid_values() {
    let long_code = OtpConfig {
        code_length: 20,
        ..Default::default()
    };
    assert!(
        VerificationServiceConfig::from_config(&long_code, &RateLimitConfig::default()).is_err()
    );

    let no_attempts = OtpConfig {
        max_verify_attempts: 0,
        ..Default::default()
    };
    assert!(
        VerificationServiceConfig::from_config(&no_attempts, &RateLimitConfig::default()).is_err()
    );

    let zero_window = RateLimitConfig {
        window_duration_ms: 0,
        ..Default::default()
    };
    assert!(VerificationServiceConfig::from_config(&OtpConfig::default(), &zero_window).is_err());
}

#[test]
fn test_validate_direct_config() {
    assert!(VerificationServiceConfig::default().validate().is_ok());

    for config in [
        VerificationServiceConfig {
            code_length: 0,
            ..Default::default()
        },
        VerificationServiceConfig {
            code_length: 20,
            ..Default::default()
        },
        VerificationServiceConfig {
            max_verify_attempts: 0,
            ..Default::default()
        },
        VerificationServiceConfig {
            session_ttl: Duration::ZERO,
            ..Default::default()
        },
    ] {
        assert!(config.validate().is_err());
    }

    // Limits are irrelevant when limiting is off
    let unlimited = VerificationServiceConfig {
        rate_limiting_enabled: false,
        max_requests_per_phone: 0,
        ..Default::default()
    };
    assert!(unlimited.validate().is_ok());
}

#[tokio::test]
async fn test_cross_purpose_issue_overwrites_session() {
    let h = harness(VerificationServiceConfig::default());

    h.service
        .send_otp(PHONE, OtpPurpose::Registration, &RequestOrigin::Internal)
        .await
        .unwrap();
    let registration_code = h.gateway.last_code_for(PHONE).unwrap();

    h.service
        .send_otp(PHONE, OtpPurpose::ContactVerify, &RequestOrigin::Internal)
        .await
        .unwrap();
    let contact_code = h.gateway.last_code_for(PHONE).unwrap();

    let result = h
        .service
        .verify_otp(PHONE, &registration_code, OtpPurpose::Registration)
        .await
        .unwrap();
    assert_eq!(result, VerifyOtpResult::NotFound);

    let result = h
        .service
        .verify_otp(PHONE, &contact_code, OtpPurpose::ContactVerify)
        .await
        .unwrap();
    assert_eq!(result, VerifyOtpResult::Success);
}

#[tokio::test]
async fn test_cleanup_service_shares_stores() {
    let h = harness(VerificationServiceConfig::default());

    let result = h
        .service
        .send_otp(PHONE, OtpPurpose::Registration, &RequestOrigin::remote("192.0.2.1"))
        .await
        .unwrap();
    assert_eq!(result, SendOtpResult::Success);
    assert_eq!(h.service.sessions().count().await.unwrap(), 1);

    let cleanup = h.service.cleanup_service(CleanupConfig::default());

    let result = cleanup.run_cleanup().await.unwrap();
    assert_eq!(result.total_cleaned(), 0);

    h.clock.advance(ChronoDuration::minutes(90));
    let result = cleanup.run_cleanup().await.unwrap();
    assert_eq!(result.expired_sessions_removed, 1);
    // One window per limiter: the phone and the source address
    assert_eq!(result.stale_windows_removed, 2);
    assert_eq!(h.service.sessions().count().await.unwrap(), 0);
}
