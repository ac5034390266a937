//! Value objects representing immutable domain concepts.

pub mod otp_result;


// Re-export commonly used types
pub use otp_result::{SendOtpResult, VerifyOtpResult};
