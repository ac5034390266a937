//! In-memory session store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::Duration;

use crate::domain::entities::{AttemptPolicy, OtpPurpose, VerificationSession};
use crate::domain::value_objects::VerifyOtpResult;
use crate::errors::DomainResult;

use super::traits::SessionStore;

/// Session store backed by a sharded concurrent map keyed by canonical phone
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, VerificationSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn upsert(&self, session: VerificationSession) -> DomainResult<()> {
        self.sessions.insert(session.phone.clone(), session);
        Ok(())
    }

    async fn attempt(
        &self,
        phone: &str,
        purpose: OtpPurpose,
        candidate: &str,
        policy: &AttemptPolicy,
        now: DateTime<Utc>,
    ) -> DomainResult<VerifyOtpResult> {
        match self.sessions.entry(phone.to_owned()) {
            Entry::Vacant(_) => Ok(VerifyOtpResult::NotFound),
            Entry::Occupied(mut entry) => {
                let outcome = entry
                    .get_mut()
                    .register_attempt(purpose, candidate, policy, now);
                if outcome.consumed {
                    entry.remove();
                }
                Ok(outcome.result)
            }
        }
    }

    async fn get(&self, phone: &str) -> DomainResult<Option<VerificationSession>> {
        Ok(self.sessions.get(phone).map(|session| session.clone()))
    }

    async fn remove(&self, phone: &str) -> DomainResult<bool> {
        Ok(self.sessions.remove(phone).is_some())
    }

    async fn purge_expired(&self, ttl: Duration, now: DateTime<Utc>) -> DomainResult<usize> {
        let mut removed = 0;
        self.sessions.retain(|_, session| {
            let keep = !session.is_expired(ttl, now);
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.sessions.len())
    }

    async fn clear(&self) -> DomainResult<()> {
        self.sessions.clear();
        Ok(())
    }
}
