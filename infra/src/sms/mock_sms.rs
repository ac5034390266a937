//! Mock SMS Service Implementation
//!
//! Records messages in memory instead of sending them, so development
//! setups and tests can read back delivered codes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use otp_shared::phone::mask_phone_number;

use super::sms_service::{is_deliverable_number, SmsService};
use crate::InfrastructureError;

/// A message accepted by the mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub message_id: String,
    pub phone_number: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

/// Mock SMS service for development and testing
///
/// Clones share the same outbox and counters.
#[derive(Clone)]
pub struct MockSmsService {
    name: String,
    outbox: Arc<Mutex<Vec<SentSms>>>,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to console
    console_output: bool,
    /// Artificial provider latency
    delay: Duration,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            name: "Mock".to_string(),
            outbox: Arc::new(Mutex::new(Vec::new())),
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
            delay: Duration::ZERO,
        }
    }

    /// Rename the provider, useful when two mocks back a failover pair
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Delay every send by `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// All accepted messages, oldest first
    pub fn sent_messages(&self) -> Vec<SentSms> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent message sent to `phone_number`
    pub fn last_message_to(&self, phone_number: &str) -> Option<SentSms> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|sms| sms.phone_number == phone_number)
            .cloned()
    }

    /// Forget all messages and reset the counter
    pub fn reset(&self) {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.message_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone_number);

        if !is_deliverable_number(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                target: "sms_service",
                provider = %self.name,
                phone = %masked_phone,
                "Mock SMS service simulating failure"
            );
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentSms {
                message_id: message_id.clone(),
                phone_number: phone_number.to_string(),
                message: message.to_string(),
                sent_at: Utc::now(),
            });

        if self.console_output {
            // Development aid: the full message, code included, goes to stdout only
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS ({}) - MESSAGE #{}", self.name, count);
            println!("To: {}", masked_phone);
            println!("Content: {}", message);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "sms_service",
            provider = %self.name,
            phone = %masked_phone,
            message_id = %message_id,
            message_length = message.len(),
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
