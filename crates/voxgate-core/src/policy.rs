//! Execution policy configuration.
//!
//! The [`ExecutionPolicy`] is plain configuration. Pattern compilation and
//! evaluation happen in `voxgate-approval`.

use serde::{Deserialize, Serialize};

/// Where the external agent executes shell commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    /// Inside the agent's sandbox.
    Sandbox,
    /// On the gateway host.
    Gateway,
    /// On a paired node.
    #[default]
    Node,
}

/// How strictly the agent's command execution is restricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityMode {
    /// Deny all command execution.
    Deny,
    /// Only allow-listed binaries run.
    #[default]
    Allowlist,
    /// No restriction.
    Full,
}

/// When the agent asks a human before running a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AskMode {
    /// Never ask.
    Off,
    /// Ask when the command is not in the allowlist.
    #[default]
    OnMiss,
    /// Always ask.
    Always,
}

/// Execution policy for agent requests.
///
/// Pattern lists are ordered. Evaluation order is externally visible in the
/// reported match, so it must follow configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutionPolicy {
    /// Host execution mode.
    pub host: HostMode,
    /// Security mode.
    pub security: SecurityMode,
    /// Confirmation mode.
    pub ask: AskMode,
    /// Binaries the agent may run without asking.
    #[serde(alias = "allowlisted_bins")]
    pub allowlisted_bins: Vec<String>,
    /// Regex patterns that mark a request as blocked-grade risky.
    #[serde(alias = "blocked_patterns")]
    pub blocked_patterns: Vec<String>,
    /// Regex patterns that require confirmation before forwarding.
    #[serde(alias = "confirmation_required_patterns")]
    pub confirmation_required_patterns: Vec<String>,
}

impl ExecutionPolicy {
    /// Builder: append a blocked pattern.
    #[must_use]
    pub fn with_blocked_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.blocked_patterns.push(pattern.into());
        self
    }

    /// Builder: append a confirmation-required pattern.
    #[must_use]
    pub fn with_confirmation_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.confirmation_required_patterns.push(pattern.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_gateway_defaults() {
        let policy = ExecutionPolicy::default();
        assert_eq!(policy.host, HostMode::Node);
        assert_eq!(policy.security, SecurityMode::Allowlist);
        assert_eq!(policy.ask, AskMode::OnMiss);
        assert!(policy.blocked_patterns.is_empty());
    }

    #[test]
    fn test_ask_mode_kebab_case() {
        let policy: ExecutionPolicy =
            serde_json::from_str(r#"{"ask":"on-miss","blockedPatterns":["rm\\s+-rf"]}"#).unwrap();
        assert_eq!(policy.ask, AskMode::OnMiss);
        assert_eq!(policy.blocked_patterns, vec![r"rm\s+-rf".to_string()]);

        let always: AskMode = serde_json::from_str(r#""always""#).unwrap();
        assert_eq!(always, AskMode::Always);
    }
}
