//! Purpose an OTP was issued for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Flow a verification session belongs to
///
/// A code issued for one purpose never satisfies another, so a registration
/// code cannot be replayed to confirm an emergency contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpPurpose {
    /// New account sign-up
    Registration,
    /// Confirming a freshly added emergency contact
    ContactVerify,
    /// Confirming a changed emergency contact number
    ContactPhoneEdit,
}

impl OtpPurpose {
    pub const ALL: [OtpPurpose; 3] = [
        OtpPurpose::Registration,
        OtpPurpose::ContactVerify,
        OtpPurpose::ContactPhoneEdit,
    ];

    /// Wire name of the purpose
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "REGISTRATION",
            OtpPurpose::ContactVerify => "CONTACT_VERIFY",
            OtpPurpose::ContactPhoneEdit => "CONTACT_PHONE_EDIT",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OtpPurpose::ALL
            .into_iter()
            .find(|purpose| purpose.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidPurpose {
                value: wanted.to_string(),
            })
    }
}
