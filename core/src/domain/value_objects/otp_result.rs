//! Outcomes of issuing and verifying an OTP.
//!
//! Both enums are ordinary results rather than errors: a rate-limited or
//! failed request is an expected answer that consumers turn into a response.

use otp_shared::errors::{error_codes, ErrorResponse};
use serde::{Deserialize, Serialize};

/// Outcome of an issue request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SendOtpResult {
    /// Code delivered and session stored
    Success,
    /// Source address exceeded its window quota
    IpBlocked,
    /// Phone number exceeded its window quota
    PhoneRateLimited,
    /// Delivery gateway failed; no session was created
    ProviderError,
}

impl SendOtpResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SendOtpResult::Success)
    }

    /// Whether the request was throttled by a rate limiter
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SendOtpResult::IpBlocked | SendOtpResult::PhoneRateLimited)
    }

    /// HTTP status a consumer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            SendOtpResult::Success => 200,
            SendOtpResult::IpBlocked | SendOtpResult::PhoneRateLimited => 429,
            SendOtpResult::ProviderError => 503,
        }
    }

    /// User-facing message
    pub fn message(&self) -> &'static str {
        match self {
            SendOtpResult::Success => "OTP sent successfully.",
            SendOtpResult::IpBlocked => "Too many requests from your network. Try again later.",
            SendOtpResult::PhoneRateLimited => "Too many OTP requests. Try again in an hour.",
            SendOtpResult::ProviderError => "Failed to send OTP. Please try again.",
        }
    }

    /// Error body for every outcome except `Success`
    pub fn to_error_response(&self) -> Option<ErrorResponse> {
        let code = match self {
            SendOtpResult::Success => return None,
            SendOtpResult::IpBlocked => error_codes::IP_BLOCKED,
            SendOtpResult::PhoneRateLimited => error_codes::PHONE_RATE_LIMITED,
            SendOtpResult::ProviderError => error_codes::SMS_ERROR,
        };
        Some(ErrorResponse::new(code, self.message()))
    }
}

/// Outcome of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerifyOtpResult {
    /// Code matched; the phone is verified and the session is gone
    Success,
    /// No session for this phone and purpose
    NotFound,
    /// Session outlived its TTL and was removed
    Expired,
    /// Code did not match; the session stays for another attempt
    WrongCode,
    /// Attempt cap reached; a new code must be requested
    MaxAttemptsExceeded,
}

impl VerifyOtpResult {
    pub fn is_success(&self) -> bool {
        matches!(self, VerifyOtpResult::Success)
    }

    /// Only a wrong code allows retrying without re-issuing
    pub fn allows_retry(&self) -> bool {
        matches!(self, VerifyOtpResult::WrongCode)
    }

    pub fn http_status(&self) -> u16 {
        match self {
            VerifyOtpResult::Success => 200,
            VerifyOtpResult::MaxAttemptsExceeded => 429,
            VerifyOtpResult::NotFound | VerifyOtpResult::Expired | VerifyOtpResult::WrongCode => {
                400
            }
        }
    }

    /// User-facing message
    pub fn message(&self) -> &'static str {
        match self {
            VerifyOtpResult::Success => "Phone number verified.",
            VerifyOtpResult::NotFound => "No OTP found. Please request a new one.",
            VerifyOtpResult::Expired => "OTP expired. Please request a new one.",
            VerifyOtpResult::WrongCode => "Invalid OTP.",
            VerifyOtpResult::MaxAttemptsExceeded => "Too many wrong attempts. Request a new OTP.",
        }
    }

    /// Error body for every outcome except `Success`
    pub fn to_error_response(&self) -> Option<ErrorResponse> {
        let code = match self {
            VerifyOtpResult::Success => return None,
            VerifyOtpResult::NotFound => error_codes::OTP_NOT_FOUND,
            VerifyOtpResult::Expired => error_codes::OTP_EXPIRED,
            VerifyOtpResult::WrongCode => error_codes::OTP_INVALID,
            VerifyOtpResult::MaxAttemptsExceeded => error_codes::OTP_MAX_ATTEMPTS,
        };
        Some(ErrorResponse::new(code, self.message()))
    }
}
