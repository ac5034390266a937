//! Code generation and message formatting

use otp_shared::config::otp::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};
use otp_shared::ConfigError;
use rand::{rngs::OsRng, Rng};
use std::time::Duration;

/// Generate a cryptographically secure random numeric code
///
/// Uses OsRng (OS-provided CSPRNG) and a uniform range, so every value in
/// `[0, 10^length)` is equally likely.
///
/// # Arguments
///
/// * `length` - Number of digits; the result is zero-padded to this width
///
/// # Errors
///
/// `ConfigError::Constraint` when `length` is outside
/// `MIN_CODE_LENGTH..=MAX_CODE_LENGTH`.
pub fn generate_secure_code(length: usize) -> Result<String, ConfigError> {
    let upper = u32::try_from(length)
        .ok()
        .filter(|_| (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length))
        .and_then(|digits| 10u64.checked_pow(digits))
        .ok_or_else(|| {
            ConfigError::Constraint(format!(
                "code_length must be between {} and {}, got {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH, length
            ))
        })?;
    let value = OsRng.gen_range(0..upper);
    Ok(format!("{:0width$}", value, width = length))
}

/// Text sent to the user
///
/// The validity is rounded up to whole minutes.
pub fn compose_message(code: &str, ttl: Duration, sender_name: Option<&str>) -> String {
    let minutes = ttl.as_secs().div_ceil(60).max(1);
    let unit = if minutes == 1 { "minute" } else { "minutes" };
    let body = format!(
        "Your verification code is {}. Valid for {} {}.",
        code, minutes, unit
    );

    match sender_name {
        Some(name) => format!("{}: {}", name, body),
        None => body,
    }
}
