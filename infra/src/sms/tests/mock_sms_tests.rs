//! Unit tests for mock SMS service

use std::time::Duration;

use crate::sms::{MockSmsService, SmsService};
use crate::InfrastructureError;

#[tokio::test]
async fn test_mock_sms_send_success() {
    let service = MockSmsService::with_options(false, false);
    let result = service.send_sms("+919876543210", "Test message").await;

    let message_id = result.unwrap();
    assert!(message_id.starts_with("mock_"));
    assert_eq!(service.get_message_count(), 1);

    let sent = service.last_message_to("+919876543210").unwrap();
    assert_eq!(sent.message, "Test message");
    assert_eq!(sent.message_id, message_id);
}

#[tokio::test]
async fn test_mock_sms_invalid_phone() {
    let service = MockSmsService::with_options(false, false);
    let result = service.send_sms("12345", "Test message").await;

    match result {
        Err(InfrastructureError::Sms(msg)) => assert!(msg.contains("Invalid phone number")),
        other => panic!("Expected Sms error, got {:?}", other),
    }
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test]
async fn test_mock_sms_simulate_failure() {
    let service = MockSmsService::with_options(false, false);
    service.set_simulate_failure(true);

    let result = service.send_sms("+919876543210", "Test message").await;
    assert!(result.is_err());
    assert!(!service.is_available().await);
    assert!(service.sent_messages().is_empty());

    service.set_simulate_failure(false);
    assert!(service.send_sms("+919876543210", "Retry").await.is_ok());
    assert!(service.is_available().await);
}

#[tokio::test]
async fn test_mock_sms_counter_and_reset() {
    let service = MockSmsService::with_options(false, false);

    for i in 1..=3 {
        let _ = service
            .send_sms("+919876543210", &format!("Message {}", i))
            .await;
        assert_eq!(service.get_message_count(), i);
    }

    service.reset();
    assert_eq!(service.get_message_count(), 0);
    assert!(service.sent_messages().is_empty());
}

#[tokio::test]
async fn test_clones_share_outbox() {
    let service = MockSmsService::with_options(false, false);
    let handle = service.clone();

    service.send_sms("+14155552671", "Hello").await.unwrap();

    assert_eq!(handle.get_message_count(), 1);
    assert_eq!(handle.sent_messages()[0].phone_number, "+14155552671");
}

#[tokio::test(start_paused = true)]
async fn test_delay_is_applied() {
    let service = MockSmsService::with_options(false, false).with_delay(Duration::from_secs(2));
    let started = tokio::time::Instant::now();

    service.send_sms("+919876543210", "Slow").await.unwrap();

    assert!(started.elapsed() >= Duration::from_secs(2));
}

#[test]
fn test_provider_name() {
    assert_eq!(MockSmsService::new().provider_name(), "Mock");
    assert_eq!(
        MockSmsService::new().named("Backup").provider_name(),
        "Backup"
    );
}
