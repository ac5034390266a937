//! # Infrastructure Layer
//!
//! Concrete adapters and bootstrap for the phone verification core.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **SMS**: provider trait, mock and failover providers, and the adapter
//!   exposing them as the core delivery gateway
//! - **Telemetry**: `tracing` subscriber setup driven by
//!   [`LoggingConfig`](otp_shared::LoggingConfig)
//! - **Bootstrap**: configuration loading and [`initialize`]

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use otp_core::services::verification::{VerificationService, VerificationServiceConfig};
use otp_shared::ConfigError;

/// SMS service module - providers and the delivery gateway adapter
pub mod sms;

/// Tracing subscriber setup
pub mod telemetry;

use sms::SmsDeliveryGateway;

/// Configuration module for infrastructure services
pub mod config {
    //! SMS delivery settings plus the shared application configuration

    use serde::{Deserialize, Serialize};

    use otp_shared::config::env_or;
    use otp_shared::{AppConfig, ConfigError};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct InfrastructureConfig {
        /// OTP, rate limit, cleanup and logging settings
        pub app: AppConfig,
        /// SMS service configuration
        pub sms: SmsConfig,
    }

    /// SMS service configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SmsConfig {
        /// SMS service provider ("mock")
        pub provider: String,
        /// Provider to fail over to, if any
        #[serde(default)]
        pub backup_provider: Option<String>,
        /// Upper bound on a single send, in milliseconds
        pub timeout_ms: u64,
        /// Send Indian numbers without the country prefix
        #[serde(default)]
        pub national_format: bool,
        /// How long to stay on the backup before retrying the primary
        pub failover_timeout_secs: u64,
        /// Print mock messages to stdout
        #[serde(default)]
        pub console_output: bool,
    }

    impl Default for SmsConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                backup_provider: None,
                timeout_ms: 10_000,
                national_format: false,
                failover_timeout_secs: 30,
                console_output: true,
            }
        }
    }

    impl SmsConfig {
        /// Load `SMS_*` settings on top of the defaults
        pub fn from_env() -> Result<Self, ConfigError> {
            let defaults = Self::default();
            let non_empty = |key: &str| {
                std::env::var(key)
                    .ok()
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
            };

            Ok(Self {
                provider: non_empty("SMS_PROVIDER").unwrap_or(defaults.provider),
                backup_provider: non_empty("SMS_BACKUP_PROVIDER"),
                timeout_ms: env_or("SMS_TIMEOUT_MS", defaults.timeout_ms)?,
                national_format: env_or("SMS_NATIONAL_FORMAT", defaults.national_format)?,
                failover_timeout_secs: env_or(
                    "SMS_FAILOVER_TIMEOUT_SECS",
                    defaults.failover_timeout_secs,
                )?,
                console_output: env_or("SMS_CONSOLE_OUTPUT", defaults.console_output)?,
            })
        }

        pub fn validate(&self) -> Result<(), ConfigError> {
            if self.timeout_ms == 0 {
                return Err(ConfigError::Constraint(
                    "SMS timeout must be greater than zero".to_string(),
                ));
            }
            Ok(())
        }
    }
}

/// Infrastructure service container
pub struct InfrastructureServices {
    /// Verification service wired to the configured SMS provider
    pub verification: Arc<VerificationService<SmsDeliveryGateway>>,
    /// Background cleanup task, when enabled
    pub cleanup_handle: Option<JoinHandle<()>>,
    pub config: config::InfrastructureConfig,
}

impl InfrastructureServices {
    /// Wire the verification service from an already loaded configuration
    ///
    /// The configuration is validated before anything is built. Must be
    /// called inside a Tokio runtime when cleanup is enabled.
    pub fn build(config: config::InfrastructureConfig) -> Result<Self, InfrastructureError> {
        config.app.validate()?;
        config.sms.validate()?;

        let service_config =
            VerificationServiceConfig::from_config(&config.app.otp, &config.app.rate_limit)?;

        let sms_service = sms::create_sms_service(&config.sms);
        let gateway = SmsDeliveryGateway::new(sms_service)
            .with_timeout(Duration::from_millis(config.sms.timeout_ms))
            .with_national_format(config.sms.national_format);

        let verification = Arc::new(VerificationService::in_memory(
            Arc::new(gateway),
            service_config,
        ));

        let cleanup_handle = Arc::new(verification.cleanup_service(config.app.cleanup.clone()))
            .start_background_task();

        Ok(Self {
            verification,
            cleanup_handle,
            config,
        })
    }

    /// Stop the background cleanup task
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
            tracing::info!("Cleanup task stopped");
        }
    }
}

/// Initialize infrastructure services with async runtime
///
/// This function:
/// - Loads `.env` and the environment configuration
/// - Builds the SMS provider and delivery gateway
/// - Creates the verification service and starts cleanup when enabled
pub async fn initialize() -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let config = load_config()?;
    tracing::info!(
        environment = %config.app.environment,
        sms_provider = %config.sms.provider,
        rate_limiting = config.app.rate_limit.enabled,
        cleanup = config.app.cleanup.enabled,
        "Configuration loaded"
    );

    let services = InfrastructureServices::build(config)?;

    tracing::info!("Infrastructure services initialized successfully");
    Ok(services)
}

/// Load infrastructure configuration from environment
///
/// `.env` is read first, then the environment-specific file such as
/// `.env.production`. Neither overrides variables that are already set.
pub fn load_config() -> Result<config::InfrastructureConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present
    let environment = otp_shared::Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();

    let app = otp_shared::AppConfig::from_env()?;
    let sms = config::SmsConfig::from_env()?;
    sms.validate()?;

    if environment.is_production() && sms.provider == "mock" && sms.backup_provider.is_none() {
        tracing::warn!(
            environment = %environment,
            "Mock SMS provider configured in production, codes will not be delivered"
        );
    }

    Ok(config::InfrastructureConfig { app, sms })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Telemetry setup error
    #[error("Telemetry error: {0}")]
    Telemetry(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<ConfigError> for InfrastructureError {
    fn from(err: ConfigError) -> Self {
        InfrastructureError::Config(err.to_string())
    }
}
