//! Tracing subscriber setup

use tracing_subscriber::{fmt, EnvFilter};

use otp_shared::{LogFormat, LoggingConfig};

use crate::InfrastructureError;

/// Filter used when `RUST_LOG` is unset: `config.level` for our crates,
/// `warn` for everything else.
pub fn default_filter(config: &LoggingConfig) -> String {
    let level = config.level.trim();
    if level.contains('=') {
        return level.to_string();
    }
    format!(
        "warn,otp_core={level},otp_infra={level},otp_shared={level},sms_service={level}",
        level = level
    )
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter(config))
            .map_err(|e| InfrastructureError::Telemetry(e.to_string()))?,
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().with_target(false).try_init(),
    };

    result.map_err(|e| InfrastructureError::Telemetry(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_scopes_plain_level() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            ..Default::default()
        };
        let filter = default_filter(&config);
        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("otp_core=debug"));
        assert!(filter.contains("sms_service=debug"));
    }

    #[test]
    fn test_default_filter_keeps_directives() {
        let config = LoggingConfig {
            level: "info,otp_core=trace".to_string(),
            ..Default::default()
        };
        assert_eq!(default_filter(&config), "info,otp_core=trace");
    }

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig {
            format: LogFormat::Compact,
            ..Default::default()
        };
        let _ = init_tracing(&config);
        assert!(matches!(
            init_tracing(&config),
            Err(InfrastructureError::Telemetry(_))
        ));
    }
}
