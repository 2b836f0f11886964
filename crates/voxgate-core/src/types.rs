//! Common types exchanged between the bridge, guardrails and orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse risk classification attached to agent replies.
///
/// This is informational metadata derived from reply text. It never gates
/// anything; gating is the job of [`RiskAssessment`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Nothing suspicious.
    #[default]
    Low,
    /// Mentions removal or overwriting.
    Medium,
    /// Mentions destructive system operations.
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Control commands recognised in user utterances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlIntent {
    /// Begin capturing voice input.
    StartListening,
    /// Stop capturing voice input.
    StopListening,
    /// Pause without stopping.
    Pause,
    /// Resume after a pause.
    Resume,
    /// Approve the pending risky action.
    Confirm,
    /// Discard the pending risky action.
    Cancel,
    /// Report gateway status.
    Status,
    /// Change the active workspace.
    SwitchWorkspace,
    /// Report phone call status.
    CallStatus,
}

impl ControlIntent {
    /// The wire name of this intent.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartListening => "start_listening",
            Self::StopListening => "stop_listening",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Status => "status",
            Self::SwitchWorkspace => "switch_workspace",
            Self::CallStatus => "call_status",
        }
    }
}

impl fmt::Display for ControlIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel an agent turn originated from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentTurnMode {
    /// Spoken through the microphone.
    #[default]
    Voice,
    /// Arrived through a phone call.
    Call,
    /// Typed.
    Text,
}

/// A single request to the external agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTurnRequest {
    /// Session key the agent conversation is bound to.
    pub session_key: String,
    /// Workspace the request targets.
    pub workspace_id: String,
    /// The user's request text.
    pub text: String,
    /// Input channel.
    #[serde(default)]
    pub mode: AgentTurnMode,
}

impl AgentTurnRequest {
    /// Create a new agent turn request.
    #[must_use]
    pub fn new(
        session_key: impl Into<String>,
        workspace_id: impl Into<String>,
        text: impl Into<String>,
        mode: AgentTurnMode,
    ) -> Self {
        Self {
            session_key: session_key.into(),
            workspace_id: workspace_id.into(),
            text: text.into(),
            mode,
        }
    }
}

/// The agent's reply to a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTurnResponse {
    /// Reply text.
    pub text: String,
    /// Summary of tools the agent ran, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_summary: Option<String>,
    /// Coarse risk level inferred from the reply text.
    #[serde(default)]
    pub risk_level: RiskLevel,
    /// The raw JSON payload the agent produced.
    #[serde(default)]
    pub raw: serde_json::Value,
}

/// Result of a gateway health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayHealth {
    /// Whether the probe succeeded.
    pub reachable: bool,
    /// Gateway URL that was probed.
    pub url: String,
    /// Probe output or failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Status of a phone call known to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallStatus {
    /// Whether the call id was known.
    pub found: bool,
    /// Call details, when found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<serde_json::Value>,
    /// The full payload returned by the gateway.
    pub raw: serde_json::Value,
}

/// Outcome of evaluating request text against the execution policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Whether the text must be confirmed before it reaches the agent.
    pub requires_confirmation: bool,
    /// The configured pattern that matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_pattern: Option<String>,
    /// Human-readable explanation.
    pub reason: String,
}

impl RiskAssessment {
    /// An assessment that lets the text through.
    #[must_use]
    pub fn low_risk() -> Self {
        Self {
            requires_confirmation: false,
            matched_pattern: None,
            reason: "No high-risk patterns detected.".to_string(),
        }
    }

    /// An assessment that holds the text for confirmation.
    #[must_use]
    pub fn flagged(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            requires_confirmation: true,
            matched_pattern: Some(pattern.into()),
            reason: reason.into(),
        }
    }
}

/// A risky request held until the user confirms or cancels it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    /// Workspace that was active when the request was made.
    pub workspace_id: String,
    /// The request text.
    pub text: String,
}
