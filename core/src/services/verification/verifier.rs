//! OTP verification

use std::sync::Arc;

use otp_shared::phone::mask_phone_number;

use crate::domain::entities::OtpPurpose;
use crate::domain::value_objects::VerifyOtpResult;
use crate::errors::{DomainResult, ValidationError};
use crate::services::clock::Clock;

use super::config::VerificationServiceConfig;
use super::traits::SessionStore;
use super::types::canonical_phone;

/// Checks submitted codes against pending sessions
pub struct OtpVerifier<S: SessionStore> {
    sessions: Arc<S>,
    clock: Arc<dyn Clock>,
    config: VerificationServiceConfig,
}

impl<S: SessionStore> OtpVerifier<S> {
    pub fn new(sessions: Arc<S>, clock: Arc<dyn Clock>, config: VerificationServiceConfig) -> Self {
        Self {
            sessions,
            clock,
            config,
        }
    }

    /// Verify a submitted code
    ///
    /// Lookup, expiry check, attempt accounting, comparison and removal of a
    /// consumed session happen atomically per phone in the session store.
    ///
    /// # Arguments
    ///
    /// * `phone` - Phone number as entered by the user
    /// * `candidate` - Submitted code; surrounding whitespace is ignored
    /// * `purpose` - Flow the code must have been issued for
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyOtpResult)` - Outcome of the attempt
    /// * `Err(DomainError)` - If the phone or code is malformed, or the
    ///   configuration is invalid
    pub async fn verify_otp(
        &self,
        phone: &str,
        candidate: &str,
        purpose: OtpPurpose,
    ) -> DomainResult<VerifyOtpResult> {
        self.config.validate()?;
        let phone = canonical_phone(phone)?;
        let candidate = self.validate_candidate(candidate)?;

        let result = self
            .sessions
            .attempt(
                &phone,
                purpose,
                candidate,
                &self.config.attempt_policy(),
                self.clock.now(),
            )
            .await?;

        let masked = mask_phone_number(&phone);
        match result {
            VerifyOtpResult::Success => tracing::info!(
                phone = %masked,
                purpose = %purpose,
                event = "otp_verified",
                "Phone number verified"
            ),
            VerifyOtpResult::WrongCode => tracing::warn!(
                phone = %masked,
                purpose = %purpose,
                event = "otp_wrong_code",
                "Wrong OTP submitted"
            ),
            VerifyOtpResult::MaxAttemptsExceeded => tracing::warn!(
                phone = %masked,
                purpose = %purpose,
                event = "otp_max_attempts",
                "OTP attempt limit reached"
            ),
            VerifyOtpResult::Expired | VerifyOtpResult::NotFound => tracing::debug!(
                phone = %masked,
                purpose = %purpose,
                outcome = ?result,
                event = "otp_not_verifiable",
                "No live OTP for phone and purpose"
            ),
        }

        Ok(result)
    }

    fn validate_candidate<'a>(&self, candidate: &'a str) -> Result<&'a str, ValidationError> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "otp".to_string(),
            });
        }
        if candidate.len() != self.config.code_length
            || !candidate.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ValidationError::InvalidCodeFormat {
                expected_length: self.config.code_length,
            });
        }
        Ok(candidate)
    }
}
