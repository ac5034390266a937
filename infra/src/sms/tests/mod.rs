//! Unit tests for SMS module

pub mod create_service_tests;
pub mod gateway_adapter_tests;
pub mod mock_sms_tests;
