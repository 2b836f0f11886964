//! Configuration struct definitions.
//!
//! Every section is `#[serde(default)]`, so a config file only needs to name
//! the values it changes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use voxgate_core::ExecutionPolicy;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gateway CLI invocation.
    pub gateway: GatewaySection,
    /// Guardrails applied to agent requests.
    pub execution_policy: ExecutionPolicy,
    /// Path of the workspaces JSON file.
    pub workspaces_file: PathBuf,
    /// Background health polling.
    pub health: HealthSection,
    /// Logging and tracing.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// GatewaySection
// ---------------------------------------------------------------------------

/// How to reach the gateway CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySection {
    /// Binary name or path.
    pub binary: String,
    /// Gateway URL handed to every subprocess.
    pub gateway_url: String,
    /// Optional gateway token.
    pub gateway_token: Option<String>,
    /// Retries after the first failed attempt.
    pub retries: u32,
    /// Bound for raw gateway commands run without a per-operation timeout,
    /// in milliseconds. Named operations use `timeouts`.
    pub default_timeout_ms: u64,
    /// Per-operation bounds.
    pub timeouts: TimeoutsSection,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            binary: "openclaw".to_owned(),
            gateway_url: "ws://127.0.0.1:18789".to_owned(),
            gateway_token: None,
            retries: 1,
            default_timeout_ms: 20_000,
            timeouts: TimeoutsSection::default(),
        }
    }
}

/// Per-operation timeouts in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutsSection {
    /// Agent turns.
    pub agent_turn_ms: u64,
    /// Health probes.
    pub health_ms: u64,
    /// Status, plugin and node listings.
    pub status_ms: u64,
    /// Call status and hang-up.
    pub call_ms: u64,
    /// Allowlist edits and approvals snapshots.
    pub approvals_ms: u64,
}

impl Default for TimeoutsSection {
    fn default() -> Self {
        Self {
            agent_turn_ms: 120_000,
            health_ms: 15_000,
            status_ms: 40_000,
            call_ms: 30_000,
            approvals_ms: 30_000,
        }
    }
}

// ---------------------------------------------------------------------------
// HealthSection
// ---------------------------------------------------------------------------

/// Background health polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthSection {
    /// Seconds between probes.
    pub interval_secs: u64,
}

impl Default for HealthSection {
    fn default() -> Self {
        Self { interval_secs: 15 }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global level filter (`"trace"` through `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"` or `"json"`.
    pub format: String,
    /// Per-crate directives such as `"voxgate_bridge=debug"`.
    pub directives: Vec<String>,
    /// Directory for daily log files. Logs go to stderr when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_gateway_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [gateway]
            binary = "/opt/openclaw/bin/openclaw"

            [gateway.timeouts]
            agent_turn_ms = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.binary, "/opt/openclaw/bin/openclaw");
        assert_eq!(config.gateway.gateway_url, "ws://127.0.0.1:18789");
        assert_eq!(config.gateway.retries, 1);
        assert_eq!(config.gateway.timeouts.agent_turn_ms, 5000);
        assert_eq!(config.gateway.timeouts.status_ms, 40_000);
    }

    #[test]
    fn test_execution_policy_snake_case_keys() {
        let config: AppConfig = toml::from_str(
            r#"
            [execution_policy]
            ask = "always"
            blocked_patterns = ["rm\\s+-rf"]
            "#,
        )
        .unwrap();

        assert_eq!(config.execution_policy.blocked_patterns, vec![r"rm\s+-rf"]);
        assert!(config.execution_policy.confirmation_required_patterns.is_empty());
    }
}
