//! Bridges an [`SmsService`] provider to the core [`DeliveryGateway`] seam.
//!
//! The core only needs a yes/no answer per send; provider errors and
//! timeouts are logged here and reported as `false`.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use otp_core::services::verification::DeliveryGateway;
use otp_shared::phone::{mask_phone_number, to_national_number};

use super::sms_service::SmsService;

/// Default upper bound on a single provider call
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// [`DeliveryGateway`] backed by an SMS provider
pub struct SmsDeliveryGateway<S: SmsService + ?Sized = dyn SmsService> {
    service: Arc<S>,
    timeout: Duration,
    national_format: bool,
}

impl<S: SmsService + ?Sized> SmsDeliveryGateway<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            timeout: DEFAULT_SEND_TIMEOUT,
            national_format: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Hand Indian numbers to the provider without the `+91` prefix
    pub fn with_national_format(mut self, national_format: bool) -> Self {
        self.national_format = national_format;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.service.provider_name()
    }

    fn destination_for(&self, destination: &str) -> String {
        if self.national_format {
            to_national_number(destination)
        } else {
            destination.to_string()
        }
    }
}

#[async_trait]
impl<S: SmsService + ?Sized> DeliveryGateway for SmsDeliveryGateway<S> {
    async fn send(&self, destination: &str, message: &str) -> bool {
        let masked = mask_phone_number(destination);
        let target = self.destination_for(destination);

        match tokio::time::timeout(self.timeout, self.service.send_sms(&target, message)).await {
            Ok(Ok(message_id)) => {
                debug!(
                    provider = self.service.provider_name(),
                    phone = %masked,
                    message_id = %message_id,
                    "SMS accepted by provider"
                );
                true
            }
            Ok(Err(e)) => {
                error!(
                    provider = self.service.provider_name(),
                    phone = %masked,
                    error = %e,
                    "SMS provider rejected message"
                );
                false
            }
            Err(_) => {
                warn!(
                    provider = self.service.provider_name(),
                    phone = %masked,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "SMS provider timed out"
                );
                false
            }
        }
    }
}
