//! # OTP Core
//!
//! Phone verification logic: one-time passcode issuance, expiring
//! attempt-limited sessions, and layered fixed-window rate limiting.
//! Delivery is abstracted behind [`services::DeliveryGateway`]; everything
//! else lives in memory.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
