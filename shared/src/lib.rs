//! Shared configuration and utilities for the phone verification workspace
//!
//! This crate provides common functionality used across all modules:
//! - Configuration types
//! - Error response structures
//! - Phone number canonicalisation and masking

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CleanupConfig, ConfigError, Environment, LogFormat, LoggingConfig, OtpConfig,
    RateLimitConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use utils::phone;
