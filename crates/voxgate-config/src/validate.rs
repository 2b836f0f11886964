//! Configuration validation.

use regex::RegexBuilder;

use crate::error::{ConfigError, ConfigResult};
use crate::types::AppConfig;

/// Upper bound on gateway retries.
pub const MAX_RETRIES: u32 = 10;

/// Validate a deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &AppConfig) -> ConfigResult<()> {
    validate_gateway(config)?;
    validate_timeouts(config)?;
    validate_execution_policy(config)?;
    validate_health(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_gateway(config: &AppConfig) -> ConfigResult<()> {
    let g = &config.gateway;

    if g.binary.trim().is_empty() {
        return Err(invalid("gateway.binary", "binary must not be empty"));
    }
    if g.gateway_url.trim().is_empty() {
        return Err(invalid("gateway.gateway_url", "gateway_url must not be empty"));
    }
    if g.retries > MAX_RETRIES {
        return Err(invalid(
            "gateway.retries",
            format!("retries {} exceeds the maximum of {MAX_RETRIES}", g.retries),
        ));
    }
    Ok(())
}

fn validate_timeouts(config: &AppConfig) -> ConfigResult<()> {
    let g = &config.gateway;
    let t = &g.timeouts;
    let bounds = [
        ("gateway.default_timeout_ms", g.default_timeout_ms),
        ("gateway.timeouts.agent_turn_ms", t.agent_turn_ms),
        ("gateway.timeouts.health_ms", t.health_ms),
        ("gateway.timeouts.status_ms", t.status_ms),
        ("gateway.timeouts.call_ms", t.call_ms),
        ("gateway.timeouts.approvals_ms", t.approvals_ms),
    ];

    for (field, value) in bounds {
        if value == 0 {
            return Err(invalid(field, "timeout must be greater than zero"));
        }
    }
    Ok(())
}

fn validate_execution_policy(config: &AppConfig) -> ConfigResult<()> {
    let policy = &config.execution_policy;
    let lists = [
        ("execution_policy.blocked_patterns", &policy.blocked_patterns),
        (
            "execution_policy.confirmation_required_patterns",
            &policy.confirmation_required_patterns,
        ),
    ];

    for (field, patterns) in lists {
        for pattern in patterns {
            if let Err(e) = RegexBuilder::new(pattern).case_insensitive(true).build() {
                return Err(invalid(field, format!("invalid pattern '{pattern}': {e}")));
            }
        }
    }
    Ok(())
}

fn validate_health(config: &AppConfig) -> ConfigResult<()> {
    if config.health.interval_secs == 0 {
        return Err(invalid("health.interval_secs", "interval must be greater than zero"));
    }
    Ok(())
}

fn validate_logging(config: &AppConfig) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        ));
    }

    let valid_formats = ["pretty", "compact", "json"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(config: &AppConfig) -> String {
        match validate(config).unwrap_err() {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_blank_gateway_url() {
        let mut config = AppConfig::default();
        config.gateway.gateway_url = "  ".to_owned();
        assert_eq!(field_of(&config), "gateway.gateway_url");
    }

    #[test]
    fn test_retries_upper_bound() {
        let mut config = AppConfig::default();
        config.gateway.retries = MAX_RETRIES;
        assert!(validate(&config).is_ok());
        config.gateway.retries = MAX_RETRIES.saturating_add(1);
        assert_eq!(field_of(&config), "gateway.retries");
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = AppConfig::default();
        config.gateway.timeouts.call_ms = 0;
        assert_eq!(field_of(&config), "gateway.timeouts.call_ms");
    }

    #[test]
    fn test_invalid_confirmation_pattern() {
        let mut config = AppConfig::default();
        config.execution_policy.blocked_patterns = vec![r"rm\s+-rf".to_owned()];
        config.execution_policy.confirmation_required_patterns = vec!["(unclosed".to_owned()];
        assert_eq!(
            field_of(&config),
            "execution_policy.confirmation_required_patterns"
        );
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = AppConfig::default();
        config.logging.format = "full".to_owned();
        assert_eq!(field_of(&config), "logging.format");
    }
}
