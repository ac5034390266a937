//! Business services containing domain logic and use cases.

pub mod cleanup;
pub mod clock;
pub mod rate_limit;
pub mod verification;

// Re-export commonly used types
pub use cleanup::{CleanupResult, VerificationCleanupService};
pub use clock::{Clock, ManualClock, SystemClock};
pub use rate_limit::{FixedWindowRateLimiter, RateLimiterTrait};
pub use verification::{
    DeliveryGateway, InMemorySessionStore, OtpIssuer, OtpVerifier, RequestOrigin, SessionStore,
    VerificationService, VerificationServiceConfig,
};
