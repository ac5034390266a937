//! Pending phone verification challenge.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::purpose::OtpPurpose;
use crate::domain::value_objects::VerifyOtpResult;

/// Default number of code comparisons allowed per session
pub const DEFAULT_MAX_ATTEMPTS: u32 = 12;

/// Default number of digits in a code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default session lifetime (5 minutes)
pub const DEFAULT_SESSION_TTL_MINUTES: u64 = 5;

/// Limits applied while checking a candidate code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptPolicy {
    pub session_ttl: Duration,
    pub max_attempts: u32,
}

impl Default for AttemptPolicy {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_MINUTES * 60),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Result of one verification attempt against a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub result: VerifyOtpResult,

    /// Whether the session must be removed from the store
    pub consumed: bool,
}

impl AttemptOutcome {
    fn kept(result: VerifyOtpResult) -> Self {
        Self {
            result,
            consumed: false,
        }
    }

    fn consumed(result: VerifyOtpResult) -> Self {
        Self {
            result,
            consumed: true,
        }
    }
}

/// One pending OTP challenge; at most one exists per phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Canonical phone number (E.164)
    pub phone: String,

    /// The zero-padded numeric code
    pub code: String,

    /// Flow the code was issued for
    pub purpose: OtpPurpose,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Number of verification attempts made
    pub attempts: u32,
}

impl VerificationSession {
    /// Creates a fresh session with no attempts
    ///
    /// # Arguments
    ///
    /// * `phone` - Canonical phone number the code was delivered to
    /// * `code` - The delivered code
    /// * `purpose` - Flow the code belongs to
    /// * `now` - Issue time
    pub fn new(
        phone: impl Into<String>,
        code: impl Into<String>,
        purpose: OtpPurpose,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            phone: phone.into(),
            code: code.into(),
            purpose,
            created_at: now,
            attempts: 0,
        }
    }

    /// Checks if more than `ttl` has passed since the code was issued
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        (now - self.created_at)
            .to_std()
            .map_or(false, |elapsed| elapsed > ttl)
    }

    /// Whether no further attempt can succeed
    pub fn is_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Checks `candidate` against this session and updates attempt accounting.
    ///
    /// Order matters: purpose, then expiry, then the attempt counter, and only
    /// then the code itself. A purpose mismatch leaves the session untouched.
    /// The attempt that uses up the last allowed comparison reports
    /// `MaxAttemptsExceeded` but keeps the session; the next one crosses the
    /// cap and consumes it without comparing.
    ///
    /// # Returns
    ///
    /// The verification result and whether the session is used up
    pub fn register_attempt(
        &mut self,
        purpose: OtpPurpose,
        candidate: &str,
        policy: &AttemptPolicy,
        now: DateTime<Utc>,
    ) -> AttemptOutcome {
        if self.purpose != purpose {
            return AttemptOutcome::kept(VerifyOtpResult::NotFound);
        }

        if self.is_expired(policy.session_ttl, now) {
            return AttemptOutcome::consumed(VerifyOtpResult::Expired);
        }

        self.attempts = self.attempts.saturating_add(1);
        if self.attempts > policy.max_attempts {
            return AttemptOutcome::consumed(VerifyOtpResult::MaxAttemptsExceeded);
        }

        if constant_time_eq(self.code.as_bytes(), candidate.as_bytes()) {
            return AttemptOutcome::consumed(VerifyOtpResult::Success);
        }

        if self.is_exhausted(policy.max_attempts) {
            AttemptOutcome::kept(VerifyOtpResult::MaxAttemptsExceeded)
        } else {
            AttemptOutcome::kept(VerifyOtpResult::WrongCode)
        }
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }
}
