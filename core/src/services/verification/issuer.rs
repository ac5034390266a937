//! OTP issuance

use std::sync::Arc;

use otp_shared::phone::mask_phone_number;

use crate::domain::entities::{OtpPurpose, VerificationSession};
use crate::domain::value_objects::SendOtpResult;
use crate::errors::DomainResult;
use crate::services::clock::Clock;
use crate::services::rate_limit::RateLimiterTrait;

use super::code::{compose_message, generate_secure_code};
use super::config::VerificationServiceConfig;
use super::traits::{DeliveryGateway, SessionStore};
use super::types::{canonical_phone, RequestOrigin};

/// Issues codes: rate checks, generation, dispatch and session creation
pub struct OtpIssuer<G: DeliveryGateway, S: SessionStore, R: RateLimiterTrait> {
    gateway: Arc<G>,
    sessions: Arc<S>,
    /// Windows keyed by canonical phone
    phone_limiter: Arc<R>,
    /// Windows keyed by source address
    source_limiter: Arc<R>,
    clock: Arc<dyn Clock>,
    config: VerificationServiceConfig,
}

impl<G: DeliveryGateway, S: SessionStore, R: RateLimiterTrait> OtpIssuer<G, S, R> {
    pub fn new(
        gateway: Arc<G>,
        sessions: Arc<S>,
        phone_limiter: Arc<R>,
        source_limiter: Arc<R>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            gateway,
            sessions,
            phone_limiter,
            source_limiter,
            clock,
            config,
        }
    }

    /// Send a fresh code to a phone number
    ///
    /// This method:
    /// 1. Canonicalizes the phone number
    /// 2. Checks the source-address window (skipped for internal callers)
    /// 3. Checks the per-phone window
    /// 4. Generates a code and dispatches it
    /// 5. Replaces any pending session for the phone once delivery succeeded
    ///
    /// # Arguments
    ///
    /// * `phone` - Phone number as entered by the user
    /// * `purpose` - Flow the code is issued for
    /// * `origin` - Caller identity for source-address limiting
    ///
    /// # Returns
    ///
    /// * `Ok(SendOtpResult)` - Outcome of the request
    /// * `Err(DomainError)` - If the phone number is malformed or the
    ///   configuration is invalid
    pub async fn send_otp(
        &self,
        phone: &str,
        purpose: OtpPurpose,
        origin: &RequestOrigin,
    ) -> DomainResult<SendOtpResult> {
        self.config.validate()?;
        let phone = canonical_phone(phone)?;
        let masked = mask_phone_number(&phone);

        if self.config.rate_limiting_enabled {
            if let Some(source) = origin.rate_limit_key() {
                let allowed = self
                    .source_limiter
                    .check_and_increment(
                        source,
                        self.config.max_requests_per_source,
                        self.config.rate_window,
                    )
                    .await?;
                if !allowed {
                    tracing::warn!(
                        phone = %masked,
                        source = source,
                        purpose = %purpose,
                        event = "otp_source_blocked",
                        "OTP request rate limit exceeded for source address"
                    );
                    return Ok(SendOtpResult::IpBlocked);
                }
            }

            let allowed = self
                .phone_limiter
                .check_and_increment(
                    &phone,
                    self.config.max_requests_per_phone,
                    self.config.rate_window,
                )
                .await?;
            if !allowed {
                tracing::warn!(
                    phone = %masked,
                    purpose = %purpose,
                    event = "otp_phone_rate_limited",
                    "OTP request rate limit exceeded for phone number"
                );
                return Ok(SendOtpResult::PhoneRateLimited);
            }
        }

        let code = generate_secure_code(self.config.code_length)?;
        let message = compose_message(
            &code,
            self.config.session_ttl,
            self.config.sender_name.as_deref(),
        );

        if !self.gateway.send(&phone, &message).await {
            tracing::error!(
                phone = %masked,
                purpose = %purpose,
                event = "otp_delivery_failed",
                "Delivery gateway failed to send OTP"
            );
            return Ok(SendOtpResult::ProviderError);
        }

        let session = VerificationSession::new(phone, code, purpose, self.clock.now());
        self.sessions.upsert(session).await?;

        tracing::info!(
            phone = %masked,
            purpose = %purpose,
            source = %origin,
            event = "otp_sent",
            "OTP issued and delivered"
        );

        Ok(SendOtpResult::Success)
    }
}
