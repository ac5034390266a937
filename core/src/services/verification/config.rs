//! Configuration for the verification service

use otp_shared::config::otp::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};
use otp_shared::config::{OtpConfig, RateLimitConfig};
use otp_shared::ConfigError;
use std::time::Duration;

use crate::domain::entities::{
    AttemptPolicy, DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS, DEFAULT_SESSION_TTL_MINUTES,
};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Lifetime of a session
    pub session_ttl: Duration,
    /// Maximum number of verification attempts allowed
    pub max_verify_attempts: u32,
    /// Digits per code
    pub code_length: usize,
    /// Prefix for outgoing messages
    pub sender_name: Option<String>,
    /// Whether issue requests are rate limited at all
    pub rate_limiting_enabled: bool,
    /// Issue requests allowed per phone per window
    pub max_requests_per_phone: u32,
    /// Issue requests allowed per source address per window
    pub max_requests_per_source: u32,
    /// Length of the fixed rate window
    pub rate_window: Duration,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_MINUTES * 60),
            max_verify_attempts: DEFAULT_MAX_ATTEMPTS,
            code_length: DEFAULT_CODE_LENGTH,
            sender_name: None,
            rate_limiting_enabled: true,
            max_requests_per_phone: 15,
            max_requests_per_source: 15,
            rate_window: Duration::from_secs(60 * 60),
        }
    }
}

impl VerificationServiceConfig {
    /// Build from the externally supplied configuration
    ///
    /// Both inputs are validated first.
    pub fn from_config(
        otp: &OtpConfig,
        rate_limit: &RateLimitConfig,
    ) -> Result<Self, ConfigError> {
        otp.validate()?;
        rate_limit.validate()?;

        let config = Self {
            session_ttl: otp.session_ttl(),
            max_verify_attempts: otp.max_verify_attempts,
            code_length: otp.code_length,
            sender_name: otp.sender_name.clone(),
            rate_limiting_enabled: rate_limit.enabled,
            max_requests_per_phone: rate_limit.max_requests_per_window_per_phone,
            max_requests_per_source: rate_limit.max_requests_per_window_per_source,
            rate_window: rate_limit.window(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make codes unissuable or unverifiable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_ttl.is_zero() {
            return Err(ConfigError::Constraint(
                "session_ttl must be greater than zero".to_string(),
            ));
        }
        if self.max_verify_attempts == 0 {
            return Err(ConfigError::Constraint(
                "max_verify_attempts must be at least 1".to_string(),
            ));
        }
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(ConfigError::Constraint(format!(
                "code_length must be between {} and {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH
            )));
        }
        if self.rate_limiting_enabled
            && (self.rate_window.is_zero()
                || self.max_requests_per_phone == 0
                || self.max_requests_per_source == 0)
        {
            return Err(ConfigError::Constraint(
                "rate limits need a non-zero window and allow at least one request".to_string(),
            ));
        }
        Ok(())
    }

    pub fn attempt_policy(&self) -> AttemptPolicy {
        AttemptPolicy {
            session_ttl: self.session_ttl,
            max_attempts: self.max_verify_attempts,
        }
    }
}
