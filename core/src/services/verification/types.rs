//! Request metadata for issue calls

use serde::{Deserialize, Serialize};
use std::fmt;

/// Address used when an anonymous caller's address is unknown
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Who is asking for an OTP
///
/// Anonymous callers are counted against their source address. Trusted
/// internal callers, such as an authenticated owner adding an emergency
/// contact, skip the source check and do not share the anonymous quota.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestOrigin {
    /// Anonymous caller identified by its network address
    Remote(String),
    /// Authenticated flow inside the application
    Internal,
}

impl RequestOrigin {
    pub fn remote(address: impl Into<String>) -> Self {
        RequestOrigin::Remote(address.into())
    }

    /// Resolve the caller address from proxy headers.
    ///
    /// Takes the first hop of `X-Forwarded-For`, falling back to the socket
    /// peer address.
    ///
    /// # Arguments
    ///
    /// * `forwarded_for` - Raw `X-Forwarded-For` header value, if present
    /// * `peer` - Remote address of the connection, if known
    pub fn from_forwarded(forwarded_for: Option<&str>, peer: Option<&str>) -> Self {
        let first_hop = forwarded_for
            .and_then(|header| header.split(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty());

        let address = first_hop
            .or_else(|| peer.map(str::trim).filter(|peer| !peer.is_empty()))
            .unwrap_or(UNKNOWN_SOURCE);

        RequestOrigin::Remote(address.to_string())
    }

    /// Key for the source-address limiter, `None` for trusted callers
    pub fn rate_limit_key(&self) -> Option<&str> {
        match self {
            RequestOrigin::Remote(address) => Some(address),
            RequestOrigin::Internal => None,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, RequestOrigin::Internal)
    }
}

impl fmt::Display for RequestOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestOrigin::Remote(address) => f.write_str(address),
            RequestOrigin::Internal => f.write_str("internal"),
        }
    }
}

/// Canonical form of a caller-supplied phone number
pub(crate) fn canonical_phone(phone: &str) -> Result<String, crate::errors::ValidationError> {
    use crate::errors::ValidationError;

    if phone.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: "phone".to_string(),
        });
    }
    otp_shared::phone::canonicalize_phone(phone).ok_or(ValidationError::InvalidPhoneFormat)
}
