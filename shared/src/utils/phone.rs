//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Indian mobile number regex (national significant number)
static INDIA_MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").expect("valid Indian mobile regex"));

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("valid E.164 regex"));

/// Country calling code used for bare national numbers
pub const INDIA_COUNTRY_CODE: &str = "91";

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is a valid Indian mobile number (10 digits, no prefix)
pub fn is_valid_indian_mobile(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    INDIA_MOBILE_REGEX.is_match(&normalized)
}

/// Check if a phone number is valid (international E.164 format)
pub fn is_valid_international_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    INTERNATIONAL_PHONE_REGEX.is_match(&normalized)
}

/// Canonicalize a user-supplied phone number to E.164.
///
/// Bare 10-digit Indian mobiles and `91`-prefixed 12-digit numbers become
/// `+91XXXXXXXXXX`; anything already in E.164 form is kept. Returns `None`
/// for input that is neither.
///
/// # Examples
/// ```
/// use otp_shared::utils::phone::canonicalize_phone;
/// assert_eq!(canonicalize_phone("98765 43210").as_deref(), Some("+919876543210"));
/// assert_eq!(canonicalize_phone("919876543210").as_deref(), Some("+919876543210"));
/// assert_eq!(canonicalize_phone("+14155552671").as_deref(), Some("+14155552671"));
/// assert_eq!(canonicalize_phone("12345"), None);
/// ```
pub fn canonicalize_phone(phone: &str) -> Option<String> {
    let normalized = normalize_phone_number(phone);

    // A '+' is only meaningful as the leading character
    if normalized.rfind('+').map_or(false, |idx| idx > 0) {
        return None;
    }

    if normalized.starts_with('+') {
        return INTERNATIONAL_PHONE_REGEX
            .is_match(&normalized)
            .then_some(normalized);
    }

    if INDIA_MOBILE_REGEX.is_match(&normalized) {
        return Some(format!("+{}{}", INDIA_COUNTRY_CODE, normalized));
    }

    if normalized.len() == 12 {
        if let Some(national) = normalized.strip_prefix(INDIA_COUNTRY_CODE) {
            if INDIA_MOBILE_REGEX.is_match(national) {
                return Some(format!("+{}", normalized));
            }
        }
    }

    None
}

/// National form of a canonical number, as most SMS gateways expect it.
///
/// `+919876543210` becomes `9876543210`; other countries keep their E.164 form.
pub fn to_national_number(canonical: &str) -> String {
    canonical
        .strip_prefix('+')
        .and_then(|digits| digits.strip_prefix(INDIA_COUNTRY_CODE))
        .filter(|national| INDIA_MOBILE_REGEX.is_match(national))
        .map(str::to_string)
        .unwrap_or_else(|| canonical.to_string())
}

/// Mask a phone number for display (e.g., +91****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
