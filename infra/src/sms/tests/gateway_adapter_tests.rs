//! Unit tests for the SMS delivery gateway adapter

use std::sync::Arc;
use std::time::Duration;

use otp_core::services::verification::DeliveryGateway;

use crate::sms::{MockSmsService, SmsDeliveryGateway};

fn quiet_mock() -> MockSmsService {
    MockSmsService::with_options(false, false)
}

#[tokio::test]
async fn test_send_passes_canonical_destination() {
    let mock = quiet_mock();
    let gateway = SmsDeliveryGateway::new(Arc::new(mock.clone()));

    assert!(gateway.send("+919876543210", "Your code").await);

    let sent = mock.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].phone_number, "+919876543210");
    assert_eq!(sent[0].message, "Your code");
}

#[tokio::test]
async fn test_national_format_strips_indian_prefix() {
    let mock = quiet_mock();
    let gateway = SmsDeliveryGateway::new(Arc::new(mock.clone())).with_national_format(true);

    assert!(gateway.send("+919876543210", "Your code").await);
    assert!(gateway.send("+14155552671", "Your code").await);

    let sent = mock.sent_messages();
    assert_eq!(sent[0].phone_number, "9876543210");
    assert_eq!(sent[1].phone_number, "+14155552671");
}

#[tokio::test]
async fn test_provider_error_reports_false() {
    let mock = quiet_mock();
    mock.set_simulate_failure(true);
    let gateway = SmsDeliveryGateway::new(Arc::new(mock));

    assert!(!gateway.send("+919876543210", "Your code").await);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_reports_false() {
    let mock = quiet_mock().with_delay(Duration::from_secs(60));
    let gateway = SmsDeliveryGateway::new(Arc::new(mock.clone()))
        .with_timeout(Duration::from_secs(5));

    assert!(!gateway.send("+919876543210", "Your code").await);
    assert_eq!(mock.get_message_count(), 0);
}

#[test]
fn test_provider_name_comes_from_service() {
    let gateway = SmsDeliveryGateway::new(Arc::new(quiet_mock().named("Primary")));
    assert_eq!(gateway.provider_name(), "Primary");
}
