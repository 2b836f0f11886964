//! `OpenClaw` CLI bridge.
//!
//! Every operation builds a fixed argument vector and hands it to the shared
//! executor, which spawns one subprocess per attempt:
//!
//! - stdout/stderr are captured in full
//! - the process is killed when the per-call bound expires
//! - a non-zero exit is a failure even if stdout holds a payload
//! - up to `retries + 1` attempts run back to back, and only the last
//!   failure is reported

use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};
use uuid::Uuid;
use voxgate_core::{AgentTurnRequest, AgentTurnResponse, CallStatus, GatewayHealth};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::gateway::GatewayBridge;
use crate::output::{extract_json, sanitize_cli_text};
use crate::reply_risk::infer_reply_risk;

/// Environment variable carrying the gateway URL into the subprocess.
pub const GATEWAY_URL_ENV: &str = "OPENCLAW_GATEWAY_URL";

/// Environment variable carrying the gateway token into the subprocess.
pub const GATEWAY_TOKEN_ENV: &str = "OPENCLAW_GATEWAY_TOKEN";

/// Output of one successful subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
    /// Exit code (always 0 for a returned result).
    pub exit_code: i32,
}

impl CommandResult {
    /// Sanitized stdout, or stderr when stdout is empty.
    fn text_or_stderr(&self) -> String {
        if self.stdout.is_empty() {
            sanitize_cli_text(&self.stderr)
        } else {
            sanitize_cli_text(&self.stdout)
        }
    }
}

/// Bridge to the `OpenClaw` gateway CLI.
///
/// Holds only static configuration, so concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct OpenClawBridge {
    config: BridgeConfig,
}

impl OpenClawBridge {
    /// Create a bridge.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if the binary or gateway URL is empty.
    pub fn new(config: BridgeConfig) -> BridgeResult<Self> {
        if config.binary.trim().is_empty() {
            return Err(BridgeError::Config(
                "OpenClaw binary path is required.".to_string(),
            ));
        }
        if config.gateway_url.trim().is_empty() {
            return Err(BridgeError::Config("Gateway URL is required.".to_string()));
        }
        Ok(Self { config })
    }

    /// The bridge configuration.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Gateway URL this bridge targets.
    #[must_use]
    pub fn gateway_url(&self) -> &str {
        &self.config.gateway_url
    }

    /// Run the CLI with `args` under the retry policy.
    ///
    /// `timeout` bounds each attempt; `None` uses the default timeout.
    ///
    /// # Errors
    ///
    /// Returns the failure of the final attempt.
    pub async fn execute(
        &self,
        args: &[String],
        timeout: Option<Duration>,
    ) -> BridgeResult<CommandResult> {
        let timeout = timeout.unwrap_or(self.config.default_timeout);
        let attempts = self.config.retries.saturating_add(1);
        let mut attempt: u32 = 1;

        loop {
            match self.run_command(args, timeout).await {
                Ok(result) => return Ok(result),
                Err(e) if attempt < attempts => {
                    warn!(
                        code = %e.code(),
                        attempt,
                        attempts,
                        error = %e,
                        "Gateway command failed, retrying"
                    );
                    attempt = attempt.saturating_add(1);
                },
                Err(e) => {
                    warn!(code = %e.code(), attempt, error = %e, "Gateway command failed");
                    return Err(e);
                },
            }
        }
    }

    /// One spawn/wait cycle.
    ///
    /// The child is owned by the wait future and spawned with
    /// `kill_on_drop`, so when the timeout drops the future the process is
    /// killed and its pipes closed.
    async fn run_command(&self, args: &[String], timeout: Duration) -> BridgeResult<CommandResult> {
        let invocation_id = Uuid::new_v4().to_string();

        let mut cmd = Command::new(&self.config.binary);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env(GATEWAY_URL_ENV, &self.config.gateway_url)
            .kill_on_drop(true);
        if let Some(token) = &self.config.gateway_token {
            cmd.env(GATEWAY_TOKEN_ENV, token);
        }

        debug!(
            invocation_id = %invocation_id,
            binary = %self.config.binary,
            args = ?redact_args(args),
            timeout_ms = duration_ms(timeout),
            "Spawning gateway command"
        );

        let child = cmd.spawn().map_err(|e| BridgeError::Process {
            invocation_id: invocation_id.clone(),
            message: e.to_string(),
        })?;

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(BridgeError::Process {
                    invocation_id,
                    message: e.to_string(),
                });
            },
            Err(_) => {
                return Err(BridgeError::Timeout {
                    invocation_id,
                    timeout_ms: duration_ms(timeout),
                });
            },
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code().unwrap_or(-1);

        if exit_code != 0 {
            return Err(BridgeError::NonZeroExit {
                invocation_id,
                exit_code,
                stdout,
                stderr,
            });
        }

        debug!(invocation_id = %invocation_id, stdout_len = stdout.len(), "Gateway command finished");

        Ok(CommandResult {
            stdout,
            stderr,
            exit_code,
        })
    }

    fn parse_json(stdout: &str) -> BridgeResult<Value> {
        extract_json(&sanitize_cli_text(stdout)).map_err(|source| BridgeError::Parse {
            source,
            stdout: stdout.to_string(),
        })
    }
}

#[async_trait]
impl GatewayBridge for OpenClawBridge {
    async fn agent_turn(&self, request: &AgentTurnRequest) -> BridgeResult<AgentTurnResponse> {
        let args = argv(&[
            "agent",
            "--session-id",
            &request.session_key,
            "--message",
            &request.text,
            "--json",
        ]);
        debug!(
            workspace_id = %request.workspace_id,
            mode = ?request.mode,
            "Running agent turn"
        );

        let result = self
            .execute(&args, Some(self.config.timeouts.agent_turn))
            .await?;
        let payload = Self::parse_json(&result.stdout)?;

        let text = string_field(&payload, "response")
            .or_else(|| string_field(&payload, "text"))
            .unwrap_or_default();
        let tool_summary = string_field(&payload, "toolSummary");
        let raw = match payload.get("raw") {
            Some(raw) if !raw.is_null() => raw.clone(),
            _ => payload.clone(),
        };

        Ok(AgentTurnResponse {
            risk_level: infer_reply_risk(&text),
            text,
            tool_summary,
            raw,
        })
    }

    async fn health(&self) -> GatewayHealth {
        let mut args = argv(&["gateway", "health", "--url", &self.config.gateway_url]);
        if let Some(token) = &self.config.gateway_token {
            args.push("--token".to_string());
            args.push(token.clone());
        }

        match self.execute(&args, Some(self.config.timeouts.health)).await {
            Ok(result) => GatewayHealth {
                reachable: true,
                url: self.config.gateway_url.clone(),
                detail: Some(sanitize_cli_text(&result.stdout)),
            },
            Err(e) => GatewayHealth {
                reachable: false,
                url: self.config.gateway_url.clone(),
                detail: Some(e.to_string()),
            },
        }
    }

    async fn status(&self) -> BridgeResult<String> {
        let result = self
            .execute(&argv(&["status"]), Some(self.config.timeouts.status))
            .await?;
        Ok(sanitize_cli_text(&result.stdout))
    }

    async fn list_plugins(&self) -> BridgeResult<String> {
        let result = self
            .execute(&argv(&["plugins", "list"]), Some(self.config.timeouts.status))
            .await?;
        Ok(sanitize_cli_text(&result.stdout))
    }

    async fn list_nodes_status(&self) -> BridgeResult<String> {
        let result = self
            .execute(&argv(&["nodes", "status"]), Some(self.config.timeouts.status))
            .await?;
        Ok(sanitize_cli_text(&result.stdout))
    }

    async fn call_status(&self, call_id: &str) -> BridgeResult<CallStatus> {
        let args = argv(&["voicecall", "status", "--call-id", call_id, "--json"]);
        let result = self.execute(&args, Some(self.config.timeouts.call)).await?;
        let payload = Self::parse_json(&result.stdout)?;

        Ok(CallStatus {
            found: payload.get("found").and_then(Value::as_bool).unwrap_or(false),
            call: payload.get("call").filter(|c| !c.is_null()).cloned(),
            raw: payload,
        })
    }

    async fn end_call(&self, call_id: &str) -> BridgeResult<String> {
        let args = argv(&["voicecall", "end", "--call-id", call_id]);
        let result = self.execute(&args, Some(self.config.timeouts.call)).await?;
        Ok(result.text_or_stderr())
    }

    async fn add_allowlist_entry(&self, pattern: &str, agent: &str) -> BridgeResult<String> {
        let args = argv(&["approvals", "allowlist", "add", "--agent", agent, pattern]);
        let result = self
            .execute(&args, Some(self.config.timeouts.approvals))
            .await?;
        Ok(result.text_or_stderr())
    }

    async fn remove_allowlist_entry(&self, pattern: &str, agent: &str) -> BridgeResult<String> {
        let args = argv(&["approvals", "allowlist", "remove", "--agent", agent, pattern]);
        let result = self
            .execute(&args, Some(self.config.timeouts.approvals))
            .await?;
        Ok(result.text_or_stderr())
    }

    async fn approvals_snapshot(&self) -> BridgeResult<String> {
        let result = self
            .execute(&argv(&["approvals", "get"]), Some(self.config.timeouts.approvals))
            .await?;
        Ok(sanitize_cli_text(&result.stdout))
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| (*p).to_string()).collect()
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Hide the value following `--token` in logged argument vectors.
fn redact_args(args: &[String]) -> Vec<&str> {
    let mut redacted = Vec::with_capacity(args.len());
    let mut hide_next = false;
    for arg in args {
        if hide_next {
            redacted.push("<redacted>");
            hide_next = false;
        } else {
            hide_next = arg == "--token";
            redacted.push(arg.as_str());
        }
    }
    redacted
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_missing_binary() {
        let err = OpenClawBridge::new(BridgeConfig::new("  ", "ws://127.0.0.1:18789")).unwrap_err();
        assert_eq!(err.code().as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn test_new_rejects_missing_url() {
        let err = OpenClawBridge::new(BridgeConfig::new("openclaw", "")).unwrap_err();
        assert!(matches!(err, BridgeError::Config(msg) if msg.contains("Gateway URL")));
    }

    #[test]
    fn test_redact_args_hides_token() {
        let args = argv(&["gateway", "health", "--url", "ws://x", "--token", "secret"]);
        let redacted = redact_args(&args);
        assert_eq!(
            redacted,
            vec!["gateway", "health", "--url", "ws://x", "--token", "<redacted>"]
        );
    }

    #[test]
    fn test_text_or_stderr() {
        let result = CommandResult {
            stdout: String::new(),
            stderr: "\x1b[33mcall ended\x1b[0m\n".into(),
            exit_code: 0,
        };
        assert_eq!(result.text_or_stderr(), "call ended");
    }

    #[tokio::test]
    async fn test_spawn_failure_is_process_error() {
        let config = BridgeConfig::new("/nonexistent/voxgate/openclaw", "ws://127.0.0.1:1")
            .with_retries(0);
        let bridge = OpenClawBridge::new(config).unwrap();

        let err = bridge.status().await.unwrap_err();
        assert_eq!(err.code().as_str(), "PROCESS_ERROR");
    }

    #[tokio::test]
    async fn test_health_never_fails() {
        let config = BridgeConfig::new("/nonexistent/voxgate/openclaw", "ws://127.0.0.1:1")
            .with_retries(0);
        let bridge = OpenClawBridge::new(config).unwrap();

        let health = bridge.health().await;
        assert!(!health.reachable);
        assert_eq!(health.url, "ws://127.0.0.1:1");
        assert!(health.detail.unwrap().contains("failed to spawn"));
    }
}
