//! Input validation errors raised before any shared state is touched

use thiserror::Error;

/// Validation errors
///
/// These errors represent malformed caller input. Phone numbers are never
/// embedded in the message so the error can be logged as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid phone number format")]
    InvalidPhoneFormat,

    #[error("Invalid verification code format (expected {expected_length} digits)")]
    InvalidCodeFormat { expected_length: usize },

    #[error("Unknown verification purpose: {value}")]
    InvalidPurpose { value: String },
}
