//! OTP session configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{env_or, ConfigError};

/// Shortest code length accepted by [`OtpConfig::validate`]
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest code length accepted by [`OtpConfig::validate`] (10^9 still fits in a `u32`)
pub const MAX_CODE_LENGTH: usize = 9;

/// Verification session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Lifetime of a pending verification session in milliseconds
    pub session_ttl_ms: u64,

    /// Number of code comparisons allowed per session
    pub max_verify_attempts: u32,

    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Optional sender name prefixed to the SMS body
    #[serde(default)]
    pub sender_name: Option<String>,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            session_ttl_ms: 5 * 60 * 1000, // 5 minutes
            max_verify_attempts: 12,
            code_length: default_code_length(),
            sender_name: None,
        }
    }
}

impl OtpConfig {
    /// Session lifetime as a `Duration`
    pub fn session_ttl(&self) -> Duration {
        Duration::from_millis(self.session_ttl_ms)
    }

    /// Apply `OTP_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let sender_name = std::env::var("SMS_SENDER_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .or(self.sender_name);

        Ok(Self {
            session_ttl_ms: env_or("OTP_SESSION_TTL_MS", self.session_ttl_ms)?,
            max_verify_attempts: env_or("OTP_MAX_VERIFY_ATTEMPTS", self.max_verify_attempts)?,
            code_length: env_or("OTP_CODE_LENGTH", self.code_length)?,
            sender_name,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_ttl_ms == 0 {
            return Err(ConfigError::Constraint(
                "session_ttl_ms must be greater than zero".to_string(),
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
        Ok(())
    }
}

/// Configuration for the periodic purge of abandoned sessions and rate windows
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Whether to spawn the cleanup task
    pub enabled: bool,

    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_seconds: 600,
        }
    }
}

impl CleanupConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Apply `OTP_CLEANUP_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: env_or("OTP_CLEANUP_ENABLED", self.enabled)?,
            interval_seconds: env_or("OTP_CLEANUP_INTERVAL_SECS", self.interval_seconds)?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.interval_seconds == 0 {
            return Err(ConfigError::Constraint(
                "cleanup interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_code_length() -> usize {
    6
}
