//! Walks through issuing, rate limiting and verifying codes against the mock SMS provider
//!
//! Run with: cargo run -p otp_infra --example otp_flow_demo

use std::sync::Arc;
use std::time::Duration;

use otp_core::domain::{OtpPurpose, SendOtpResult};
use otp_core::services::{RequestOrigin, VerificationService, VerificationServiceConfig};
use otp_infra::sms::{MockSmsService, SmsDeliveryGateway};
use otp_infra::telemetry::init_tracing;
use otp_shared::{LoggingConfig, OtpConfig, RateLimitConfig};

fn code_in(message: &str) -> Option<String> {
    message
        .split_whitespace()
        .map(|word| word.trim_end_matches('.'))
        .find(|word| word.len() >= 4 && word.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&LoggingConfig::default())?;

    let sms = MockSmsService::with_options(true, false).with_delay(Duration::from_millis(100));
    let gateway = SmsDeliveryGateway::new(Arc::new(sms.clone()));

    let otp = OtpConfig {
        sender_name: Some("SafeScan24".to_string()),
        ..Default::default()
    };
    let rate_limit = RateLimitConfig {
        max_requests_per_window_per_phone: 3,
        ..Default::default()
    };
    let service = VerificationService::in_memory(
        Arc::new(gateway),
        VerificationServiceConfig::from_config(&otp, &rate_limit)?,
    );

    let phone = "98765 43210";
    let origin = RequestOrigin::from_forwarded(Some("203.0.113.7, 10.0.0.1"), None);

    println!("\n=== Issuing codes (limit 3 per phone) ===");
    for i in 1..=4 {
        let result = service
            .send_otp(phone, OtpPurpose::Registration, &origin)
            .await?;
        println!("Request {}: {:?} -> HTTP {}", i, result, result.http_status());
        if let Some(body) = result.to_error_response() {
            println!("  {}", serde_json::to_string(&body)?);
        }
        if result != SendOtpResult::Success {
            break;
        }
    }

    println!("\n=== Verifying ===");
    let wrong = service
        .verify_otp(phone, "000000", OtpPurpose::Registration)
        .await?;
    println!("Wrong code: {:?}", wrong);

    let code = sms
        .last_message_to("+919876543210")
        .and_then(|sent| code_in(&sent.message))
        .ok_or_else(|| anyhow::anyhow!("no code was delivered"))?;
    let right = service
        .verify_otp(phone, &code, OtpPurpose::Registration)
        .await?;
    println!("Delivered code: {:?}", right);

    let replay = service
        .verify_otp(phone, &code, OtpPurpose::Registration)
        .await?;
    println!("Replayed code: {:?}", replay);

    println!("\nMessages sent: {}", sms.get_message_count());
    Ok(())
}
