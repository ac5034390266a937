//! SMS Service Module
//!
//! SMS providers for delivering verification codes, and the adapter that
//! exposes them to the core as a
//! [`DeliveryGateway`](otp_core::services::verification::DeliveryGateway).
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: In-memory outbox and console output for development
//! - **Failover**: Primary/backup pairing with timed recovery
//! - **Gateway Adapter**: Timeout, national-format destinations and masked logging

use std::sync::Arc;
use std::time::Duration;

pub mod failover_sms;
pub mod gateway_adapter;
pub mod mock_sms;
pub mod sms_service;

// Re-export commonly used types
pub use failover_sms::FailoverSmsService;
pub use gateway_adapter::{SmsDeliveryGateway, DEFAULT_SEND_TIMEOUT};
pub use mock_sms::{MockSmsService, SentSms};
pub use sms_service::{is_deliverable_number, SmsService};

use crate::config::SmsConfig;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Unknown provider names fall back to the mock implementation with a
/// warning. When `backup_provider` is set the result is a
/// [`FailoverSmsService`] over both providers.
pub fn create_sms_service(config: &SmsConfig) -> Arc<dyn SmsService> {
    let primary = create_provider(&config.provider, config.console_output);

    match config.backup_provider.as_deref() {
        Some(backup) => {
            let backup = create_provider(backup, config.console_output);
            tracing::info!(
                primary = primary.provider_name(),
                backup = backup.provider_name(),
                "Created failover SMS service"
            );
            Arc::new(FailoverSmsService::new(
                primary,
                backup,
                Duration::from_secs(config.failover_timeout_secs),
            ))
        }
        None => primary,
    }
}

fn create_provider(provider: &str, console_output: bool) -> Arc<dyn SmsService> {
    match provider {
        "mock" => Arc::new(MockSmsService::with_options(console_output, false)),
        other => {
            tracing::warn!(
                provider = other,
                "Unknown SMS provider, using mock implementation"
            );
            Arc::new(MockSmsService::with_options(console_output, false))
        }
    }
}
