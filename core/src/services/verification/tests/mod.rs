//! Tests for the verification module

mod service_tests;
mod types_tests;
