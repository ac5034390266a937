//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Verification session lifetime, attempt caps, code length and cleanup
//! - `rate_limit` - Fixed-window limits for OTP issuance per phone and per source

pub mod environment;
pub mod otp;
pub mod rate_limit;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{CleanupConfig, OtpConfig};
pub use rate_limit::RateLimitConfig;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration constraint violated: {0}")]
    Constraint(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// OTP session configuration
    pub otp: OtpConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Periodic purge of abandoned sessions and rate windows
    #[serde(default)]
    pub cleanup: CleanupConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            otp: OtpConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cleanup: CleanupConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            otp: OtpConfig::default(),
            rate_limit: RateLimitConfig::development(),
            cleanup: CleanupConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            otp: OtpConfig::default(),
            rate_limit: RateLimitConfig::production(),
            cleanup: CleanupConfig {
                enabled: true,
                ..Default::default()
            },
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    ///
    /// Every environment starts from the production limits and cleanup
    /// settings; only logging follows the detected environment. Looser
    /// limits need explicit `RATE_LIMIT_*` variables. The result is
    /// validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let mut config = Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            ..Self::production()
        };

        config.otp = config.otp.with_env_overrides()?;
        config.rate_limit = config.rate_limit.with_env_overrides()?;
        config.cleanup = config.cleanup.with_env_overrides()?;
        config.logging = config.logging.with_env_overrides()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate every sub-configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.otp.validate()?;
        self.rate_limit.validate()?;
        self.cleanup.validate()
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
///
/// A set but unparsable value is an error rather than a silent fallback.
pub fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}
