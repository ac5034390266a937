//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message (localized)
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an error response with details
    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Stable error codes returned to clients of the verification flow
pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const PHONE_INVALID: &str = "PHONE_INVALID";
    pub const OTP_INVALID_FORMAT: &str = "OTP_INVALID_FORMAT";
    pub const PHONE_RATE_LIMITED: &str = "PHONE_RATE_LIMITED";
    pub const IP_BLOCKED: &str = "IP_BLOCKED";
    pub const SMS_ERROR: &str = "SMS_ERROR";
    pub const OTP_NOT_FOUND: &str = "OTP_NOT_FOUND";
    pub const OTP_EXPIRED: &str = "OTP_EXPIRED";
    pub const OTP_INVALID: &str = "OTP_INVALID";
    pub const OTP_MAX_ATTEMPTS: &str = "OTP_MAX_ATTEMPTS";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

/// Result type with ErrorResponse as error
pub type ApiResult<T> = Result<T, ErrorResponse>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_details() {
        let response = ErrorResponse::new(error_codes::PHONE_RATE_LIMITED, "Too many OTP requests.")
            .add_detail("retry_after_secs", 3600);

        assert_eq!(response.error, "PHONE_RATE_LIMITED");
        let details = response.details.unwrap();
        assert_eq!(details["retry_after_secs"], serde_json::json!(3600));
    }

    #[test]
    fn test_details_omitted_when_empty() {
        let response = ErrorResponse::new(error_codes::OTP_EXPIRED, "OTP expired.");
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["message"], "OTP expired.");
    }
}
