//! Domain-specific error types and error handling.

mod types;


pub use types::ValidationError;

use otp_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use otp_shared::ConfigError;
use thiserror::Error;

/// Core domain errors (general purpose)
///
/// Only caller mistakes and internal faults are errors. Rate limiting,
/// delivery failure and verification denials are ordinary outcomes and are
/// reported through the result enums instead.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    // Bridge to specific error types
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Whether the error was caused by caller input rather than a fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::ValidationErr(_))
    }

    /// HTTP status a consumer should answer with
    pub fn http_status(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::ValidationErr(ValidationError::InvalidPhoneFormat { .. }) => {
                ErrorResponse::new(error_codes::PHONE_INVALID, "Invalid phone number.")
            }
            DomainError::ValidationErr(ValidationError::InvalidCodeFormat { expected_length }) => {
                ErrorResponse::new(
                    error_codes::OTP_INVALID_FORMAT,
                    format!("OTP must be {} digits.", expected_length),
                )
            }
            DomainError::ValidationErr(ValidationError::InvalidPurpose { .. }) => {
                ErrorResponse::new(error_codes::BAD_REQUEST, "Unknown verification purpose.")
            }
            DomainError::ValidationErr(err) => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string())
            }
            // Internal details stay in the logs
            DomainError::Internal { .. } | DomainError::Config(_) => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Something went wrong.")
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
