//! Traits for delivery and session storage integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::domain::entities::{AttemptPolicy, OtpPurpose, VerificationSession};
use crate::domain::value_objects::VerifyOtpResult;
use crate::errors::DomainResult;

/// Outbound message channel (SMS or otherwise)
///
/// Implementations swallow their own transport errors; the issuer only needs
/// to know whether the message went out.
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    /// Deliver `message` to `destination`, returning `true` on success
    async fn send(&self, destination: &str, message: &str) -> bool;
}

/// Store holding at most one pending session per phone number
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert or replace the session for `session.phone`
    async fn upsert(&self, session: VerificationSession) -> DomainResult<()>;

    /// Check a candidate code against the stored session in one atomic step.
    ///
    /// Attempt accounting and removal of a consumed session happen under the
    /// same per-key lock, so concurrent attempts are serialised.
    async fn attempt(
        &self,
        phone: &str,
        purpose: OtpPurpose,
        candidate: &str,
        policy: &AttemptPolicy,
        now: DateTime<Utc>,
    ) -> DomainResult<VerifyOtpResult>;

    /// Snapshot of the session for `phone`
    async fn get(&self, phone: &str) -> DomainResult<Option<VerificationSession>>;

    /// Remove the session for `phone`; returns whether one existed
    async fn remove(&self, phone: &str) -> DomainResult<bool>;

    /// Remove every session older than `ttl`; returns how many were removed
    async fn purge_expired(&self, ttl: Duration, now: DateTime<Utc>) -> DomainResult<usize>;

    /// Number of stored sessions
    async fn count(&self) -> DomainResult<usize>;

    async fn clear(&self) -> DomainResult<()>;
}
