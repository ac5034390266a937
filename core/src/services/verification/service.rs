//! Verification service facade wiring issuer, verifier and shared stores

use std::sync::Arc;

use otp_shared::config::CleanupConfig;

use crate::domain::entities::OtpPurpose;
use crate::domain::value_objects::{SendOtpResult, VerifyOtpResult};
use crate::errors::DomainResult;
use crate::services::cleanup::VerificationCleanupService;
use crate::services::clock::{Clock, SystemClock};
use crate::services::rate_limit::{FixedWindowRateLimiter, RateLimiterTrait};

use super::config::VerificationServiceConfig;
use super::issuer::OtpIssuer;
use super::session_store::InMemorySessionStore;
use super::traits::{DeliveryGateway, SessionStore};
use super::types::RequestOrigin;
use super::verifier::OtpVerifier;

/// Phone verification service
///
/// Owns the session store and both rate limiters; the issuer and verifier
/// share them. Dropping the service drops all pending state.
pub struct VerificationService<
    G: DeliveryGateway,
    S: SessionStore = InMemorySessionStore,
    R: RateLimiterTrait = FixedWindowRateLimiter,
> {
    issuer: OtpIssuer<G, S, R>,
    verifier: OtpVerifier<S>,
    sessions: Arc<S>,
    phone_limiter: Arc<R>,
    source_limiter: Arc<R>,
    clock: Arc<dyn Clock>,
    config: VerificationServiceConfig,
}

impl<G: DeliveryGateway> VerificationService<G> {
    /// Create a service with in-memory stores and the wall clock
    pub fn in_memory(gateway: Arc<G>, config: VerificationServiceConfig) -> Self {
        Self::in_memory_with_clock(gateway, config, Arc::new(SystemClock))
    }

    /// Create a service with in-memory stores driven by `clock`
    pub fn in_memory_with_clock(
        gateway: Arc<G>,
        config: VerificationServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sessions = Arc::new(InMemorySessionStore::new());
        let phone_limiter = Arc::new(FixedWindowRateLimiter::with_clock(clock.clone()));
        let source_limiter = Arc::new(FixedWindowRateLimiter::with_clock(clock.clone()));
        Self::from_parts(gateway, sessions, phone_limiter, source_limiter, clock, config)
    }
}

impl<G: DeliveryGateway, S: SessionStore, R: RateLimiterTrait> VerificationService<G, S, R> {
    /// Create a service from explicit components
    ///
    /// # Arguments
    ///
    /// * `gateway` - Delivery channel for codes
    /// * `sessions` - Pending session store
    /// * `phone_limiter` - Limiter keyed by phone number
    /// * `source_limiter` - Limiter keyed by source address
    /// * `clock` - Time source
    /// * `config` - Service configuration
    pub fn from_parts(
        gateway: Arc<G>,
        sessions: Arc<S>,
        phone_limiter: Arc<R>,
        source_limiter: Arc<R>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        let issuer = OtpIssuer::new(
            gateway,
            sessions.clone(),
            phone_limiter.clone(),
            source_limiter.clone(),
            clock.clone(),
            config.clone(),
        );
        let verifier = OtpVerifier::new(sessions.clone(), clock.clone(), config.clone());

        Self {
            issuer,
            verifier,
            sessions,
            phone_limiter,
            source_limiter,
            clock,
            config,
        }
    }

    /// See [`OtpIssuer::send_otp`]
    pub async fn send_otp(
        &self,
        phone: &str,
        purpose: OtpPurpose,
        origin: &RequestOrigin,
    ) -> DomainResult<SendOtpResult> {
        self.issuer.send_otp(phone, purpose, origin).await
    }

    /// See [`OtpVerifier::verify_otp`]
    pub async fn verify_otp(
        &self,
        phone: &str,
        candidate: &str,
        purpose: OtpPurpose,
    ) -> DomainResult<VerifyOtpResult> {
        self.verifier.verify_otp(phone, candidate, purpose).await
    }

    /// Cleanup service over this service's stores
    pub fn cleanup_service(&self, config: CleanupConfig) -> VerificationCleanupService<S, R> {
        VerificationCleanupService::new(
            self.sessions.clone(),
            vec![self.phone_limiter.clone(), self.source_limiter.clone()],
            self.clock.clone(),
            self.config.session_ttl,
            self.config.rate_window,
            config,
        )
    }

    pub fn sessions(&self) -> &Arc<S> {
        &self.sessions
    }

    pub fn phone_limiter(&self) -> &Arc<R> {
        &self.phone_limiter
    }

    pub fn source_limiter(&self) -> &Arc<R> {
        &self.source_limiter
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }
}
