//! Domain entities representing pending challenges and rate windows.

pub mod purpose;
pub mod rate_window;
pub mod verification_session;


// Re-export commonly used types
pub use purpose::OtpPurpose;
pub use rate_window::RateWindow;
pub use verification_session::{
    AttemptOutcome, AttemptPolicy, VerificationSession, DEFAULT_CODE_LENGTH,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_SESSION_TTL_MINUTES,
};
