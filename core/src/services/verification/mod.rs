//! Phone verification module
//!
//! This module provides the complete OTP workflow:
//! - Per-phone and per-source rate limiting of issue requests
//! - Secure code generation and dispatch through a delivery gateway
//! - Expiring, attempt-limited sessions held in a concurrent store
//! - Verification with purpose isolation and one-time use

mod code;
mod config;
mod issuer;
mod service;
mod session_store;
mod traits;
mod types;
mod verifier;

#[cfg(test)]
mod tests;

pub use code::{compose_message, generate_secure_code};
pub use config::VerificationServiceConfig;
pub use issuer::OtpIssuer;
pub use service::VerificationService;
pub use session_store::InMemorySessionStore;
pub use traits::{DeliveryGateway, SessionStore};
pub use types::RequestOrigin;
pub use verifier::OtpVerifier;
