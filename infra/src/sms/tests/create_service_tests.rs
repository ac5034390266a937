//! Unit tests for SMS service creation

use crate::config::SmsConfig;
use crate::sms::create_sms_service;

fn quiet_config(provider: &str) -> SmsConfig {
    SmsConfig {
        provider: provider.to_string(),
        console_output: false,
        ..Default::default()
    }
}

#[test]
fn test_create_mock_service() {
    let service = create_sms_service(&quiet_config("mock"));
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_create_unknown_provider_fallback() {
    let service = create_sms_service(&quiet_config("carrier-pigeon"));
    // Should fallback to mock
    assert_eq!(service.provider_name(), "Mock");
}

#[tokio::test]
async fn test_backup_provider_enables_failover() {
    let config = SmsConfig {
        backup_provider: Some("mock".to_string()),
        ..quiet_config("mock")
    };

    let service = create_sms_service(&config);
    assert_eq!(service.provider_name(), "Failover");
    assert!(service.send_sms("+919876543210", "hello").await.is_ok());
}
