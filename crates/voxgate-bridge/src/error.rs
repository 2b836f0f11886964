//! Error types for the gateway bridge.

use serde::Serialize;
use std::fmt;

/// Stable failure codes surfaced to callers and UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BridgeErrorCode {
    /// The bridge was constructed with missing required settings.
    ConfigError,
    /// The subprocess could not be spawned or awaited.
    ProcessError,
    /// The subprocess exceeded its time bound.
    Timeout,
    /// The subprocess reported failure through its exit status.
    NonZeroExit,
    /// Stdout did not contain a recoverable JSON payload.
    ParseError,
    /// The gateway transport is unreachable.
    Unavailable,
}

impl BridgeErrorCode {
    /// The wire representation of this code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigError => "CONFIG_ERROR",
            Self::ProcessError => "PROCESS_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::NonZeroExit => "NON_ZERO_EXIT",
            Self::ParseError => "PARSE_ERROR",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for BridgeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the mixed-output JSON parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    /// The text was empty after trimming.
    #[error("No output to parse.")]
    Empty,

    /// No candidate in the text parsed as JSON.
    #[error("Could not locate JSON payload in command output.")]
    NoJsonPayload,
}

/// Result type for output parsing.
pub type OutputResult<T> = Result<T, OutputError>;

/// Errors that can occur while invoking the gateway CLI.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Required construction settings are missing.
    #[error("bridge configuration error: {0}")]
    Config(String),

    /// The process failed to spawn or could not be awaited.
    #[error("failed to spawn gateway process ({invocation_id}): {message}")]
    Process {
        /// Correlation id of the invocation.
        invocation_id: String,
        /// Underlying I/O failure.
        message: String,
    },

    /// The process was killed after exceeding its time bound.
    #[error("gateway command timed out after {timeout_ms}ms ({invocation_id})")]
    Timeout {
        /// Correlation id of the invocation.
        invocation_id: String,
        /// The bound that was exceeded.
        timeout_ms: u64,
    },

    /// The process exited with a non-zero status.
    #[error("gateway exited with code {exit_code} ({invocation_id})")]
    NonZeroExit {
        /// Correlation id of the invocation.
        invocation_id: String,
        /// Exit code, or -1 when terminated by a signal.
        exit_code: i32,
        /// Captured stdout.
        stdout: String,
        /// Captured stderr.
        stderr: String,
    },

    /// Stdout did not contain a JSON payload.
    #[error("{source}")]
    Parse {
        /// Parser failure.
        #[source]
        source: OutputError,
        /// The stdout that failed to parse.
        stdout: String,
    },

    /// The gateway is unreachable at the transport level.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

impl BridgeError {
    /// The stable failure code for this error.
    #[must_use]
    pub fn code(&self) -> BridgeErrorCode {
        match self {
            Self::Config(_) => BridgeErrorCode::ConfigError,
            Self::Process { .. } => BridgeErrorCode::ProcessError,
            Self::Timeout { .. } => BridgeErrorCode::Timeout,
            Self::NonZeroExit { .. } => BridgeErrorCode::NonZeroExit,
            Self::Parse { .. } => BridgeErrorCode::ParseError,
            Self::Unavailable(_) => BridgeErrorCode::Unavailable,
        }
    }

    /// Captured stdout, if this failure carries any.
    #[must_use]
    pub fn stdout(&self) -> Option<&str> {
        match self {
            Self::NonZeroExit { stdout, .. } | Self::Parse { stdout, .. } => Some(stdout),
            _ => None,
        }
    }

    /// Captured stderr, if this failure carries any.
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::NonZeroExit { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_wire_names() {
        assert_eq!(
            BridgeError::Config("x".into()).code().to_string(),
            "CONFIG_ERROR"
        );
        let timeout = BridgeError::Timeout {
            invocation_id: "abc".into(),
            timeout_ms: 10,
        };
        assert_eq!(timeout.code(), BridgeErrorCode::Timeout);
        assert_eq!(
            serde_json::to_string(&BridgeErrorCode::NonZeroExit).unwrap(),
            r#""NON_ZERO_EXIT""#
        );
    }

    #[test]
    fn test_non_zero_exit_keeps_output() {
        let err = BridgeError::NonZeroExit {
            invocation_id: "abc".into(),
            exit_code: 2,
            stdout: "partial".into(),
            stderr: "boom".into(),
        };
        assert_eq!(err.stdout(), Some("partial"));
        assert_eq!(err.stderr(), Some("boom"));
        assert!(err.to_string().contains("code 2"));
    }
}
