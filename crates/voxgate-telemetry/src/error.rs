//! Telemetry errors.

use thiserror::Error;

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The logging configuration is invalid.
    #[error("invalid logging configuration: {0}")]
    ConfigError(String),

    /// A global subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    InitError(String),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
