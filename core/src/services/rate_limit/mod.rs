//! Fixed-window rate limiting
//!
//! Counters are keyed by an arbitrary identifier (a phone number, a source
//! address). Each limiter instance owns its own windows, so separate
//! instances are used per dimension.

mod fixed_window;
mod traits;

#[cfg(test)]
mod tests;

pub use fixed_window::FixedWindowRateLimiter;
pub use traits::RateLimiterTrait;
