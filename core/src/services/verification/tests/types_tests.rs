//! Unit tests for request origin resolution and code helpers

use std::collections::HashSet;
use std::time::Duration;

use otp_shared::ConfigError;

use crate::services::verification::{compose_message, generate_secure_code, RequestOrigin};

#[test]
fn test_from_forwarded_takes_first_hop() {
    let origin = RequestOrigin::from_forwarded(
        Some("198.51.100.4, 10.0.0.2, 10.0.0.3"),
        Some("10.0.0.3"),
    );
    assert_eq!(origin, RequestOrigin::remote("198.51.100.4"));
}

#[test]
fn test_from_forwarded_falls_back_to_peer() {
    assert_eq!(
        RequestOrigin::from_forwarded(None, Some("192.0.2.10")),
        RequestOrigin::remote("192.0.2.10")
    );
    assert_eq!(
        RequestOrigin::from_forwarded(Some("  "), Some("192.0.2.10")),
        RequestOrigin::remote("192.0.2.10")
    );
    assert_eq!(
        RequestOrigin::from_forwarded(None, None),
        RequestOrigin::remote("unknown")
    );
}

#[test]
fn test_rate_limit_key() {
    assert_eq!(RequestOrigin::remote("192.0.2.10").rate_limit_key(), Some("192.0.2.10"));
    assert_eq!(RequestOrigin::Internal.rate_limit_key(), None);
    assert!(RequestOrigin::Internal.is_internal());
    assert_eq!(RequestOrigin::Internal.to_string(), "internal");
}

#[test]
fn test_generate_code_format() {
    for length in [4, 6, 9] {
        for _ in 0..50 {
            let code = generate_secure_code(length).unwrap();
            assert_eq!(code.len(), length);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

#[test]
fn test_generate_code_rejects_unsupported_lengths() {
    for length in [0, 3, 10, 20, usize::MAX] {
        assert!(matches!(
            generate_secure_code(length),
            Err(ConfigError::Constraint(_))
        ));
    }
}

#[test]
fn test_code_uniqueness() {
    let codes: HashSet<String> = (0..100).map(|_| generate_secure_code(6).unwrap()).collect();
    assert!(codes.len() > 1);
}

#[test]
fn test_compose_message() {
    assert_eq!(
        compose_message("042917", Duration::from_secs(300), None),
        "Your verification code is 042917. Valid for 5 minutes."
    );
    assert_eq!(
        compose_message("042917", Duration::from_secs(61), Some("SafeScan24")),
        "SafeScan24: Your verification code is 042917. Valid for 2 minutes."
    );
    assert_eq!(
        compose_message("042917", Duration::from_secs(30), None),
        "Your verification code is 042917. Valid for 1 minute."
    );
}
