//! SMS Service Interface
//!
//! Defines the provider-facing trait used by the delivery gateway adapter.
//! Concrete gateway protocols live behind this trait.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number (E.164 or national form)
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str)
        -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Whether a destination is acceptable to an SMS provider
///
/// Accepts canonical E.164 numbers and bare 10-digit national mobiles.
pub fn is_deliverable_number(phone: &str) -> bool {
    otp_shared::phone::is_valid_international_phone(phone)
        || otp_shared::phone::is_valid_indian_mobile(phone)
}
