//! Rate limiting configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{env_or, ConfigError};

/// Fixed-window limits applied to OTP issuance
///
/// Both limits share one window length. The per-source limit only applies to
/// anonymous callers; trusted internal calls are counted per phone only.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Max OTP requests per phone number per window
    pub max_requests_per_window_per_phone: u32,

    /// Max OTP requests per source address per window
    pub max_requests_per_window_per_source: u32,

    /// Window length in milliseconds
    pub window_duration_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_requests_per_window_per_phone: 15,
            max_requests_per_window_per_source: 15,
            window_duration_ms: 60 * 60 * 1000, // 1 hour
        }
    }
}

impl RateLimitConfig {
    /// Window length as a `Duration`
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_duration_ms)
    }

    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            max_requests_per_window_per_phone: 50,
            max_requests_per_window_per_source: 100,
            ..Default::default()
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }

    /// Apply `RATE_LIMIT_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: env_or("RATE_LIMIT_ENABLED", self.enabled)?,
            max_requests_per_window_per_phone: env_or(
                "RATE_LIMIT_PER_PHONE",
                self.max_requests_per_window_per_phone,
            )?,
            max_requests_per_window_per_source: env_or(
                "RATE_LIMIT_PER_SOURCE",
                self.max_requests_per_window_per_source,
            )?,
            window_duration_ms: env_or("RATE_LIMIT_WINDOW_MS", self.window_duration_ms)?,
        })
    }

    /// Reject limits that would block every request or never reset
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_duration_ms == 0 {
            return Err(ConfigError::Constraint(
                "window_duration_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_requests_per_window_per_phone == 0
            || self.max_requests_per_window_per_source == 0
        {
            return Err(ConfigError::Constraint(
                "rate limits must allow at least one request per window".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_enabled() -> bool {
    true
}
