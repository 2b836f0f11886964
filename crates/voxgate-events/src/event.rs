//! Event types published by a voice session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use voxgate_core::{AgentTurnResponse, CallStatus, GatewayHealth};

/// A single event on the session stream.
///
/// Serializes as `{type, sessionId, workspaceId, timestamp, payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceEvent {
    /// Session key of the active workspace when the event was emitted.
    pub session_id: String,
    /// Active workspace when the event was emitted.
    pub workspace_id: String,
    /// Emission time.
    pub timestamp: DateTime<Utc>,
    /// Event type and payload.
    #[serde(flatten)]
    pub kind: VoiceEventKind,
}

impl VoiceEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        workspace_id: impl Into<String>,
        kind: VoiceEventKind,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            workspace_id: workspace_id.into(),
            timestamp: Utc::now(),
            kind,
        }
    }

    /// The wire name of this event's type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }
}

/// Event type with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum VoiceEventKind {
    /// Interim speech recognition text.
    #[serde(rename = "transcript.partial")]
    TranscriptPartial {
        /// Recognized text so far.
        text: String,
    },

    /// A complete utterance about to be interpreted.
    #[serde(rename = "transcript.final")]
    TranscriptFinal {
        /// The trimmed utterance.
        text: String,
    },

    /// The agent answered a turn.
    #[serde(rename = "agent.reply")]
    AgentReply(AgentTurnResponse),

    /// A request is held for confirmation.
    #[serde(rename = "approval.required")]
    ApprovalRequired(ApprovalPayload),

    /// Session state or a gateway query result changed.
    #[serde(rename = "state.changed")]
    StateChanged(StateChange),

    /// Something failed.
    #[serde(rename = "error")]
    Error {
        /// Failure message.
        message: String,
    },

    /// Result of a phone call status query.
    #[serde(rename = "call.status")]
    CallStatus(CallStatus),
}

impl VoiceEventKind {
    /// The wire name of this event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TranscriptPartial { .. } => "transcript.partial",
            Self::TranscriptFinal { .. } => "transcript.final",
            Self::AgentReply(_) => "agent.reply",
            Self::ApprovalRequired(_) => "approval.required",
            Self::StateChanged(_) => "state.changed",
            Self::Error { .. } => "error",
            Self::CallStatus(_) => "call.status",
        }
    }
}

/// Payload of `approval.required`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApprovalPayload {
    /// A new request was flagged and is now pending.
    Flagged {
        /// Why the request was held.
        reason: String,
        /// The policy pattern that matched.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
        /// What the user should say next.
        prompt: String,
    },
    /// A request arrived while another is still pending.
    StillPending {
        /// Notice for the user.
        message: String,
    },
}

/// Payload of `state.changed`.
///
/// The keys present depend on what changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateChange {
    /// Listening flags.
    Listening {
        /// Whether voice input is captured.
        listening: bool,
        /// Whether capture is paused.
        paused: bool,
    },
    /// Active workspace.
    #[serde(rename_all = "camelCase")]
    Workspace {
        /// The new workspace id.
        workspace_id: String,
    },
    /// Informational notice.
    Message {
        /// Notice text.
        message: String,
    },
    /// Gateway health probe result.
    Health {
        /// Probe result.
        health: GatewayHealth,
    },
    /// Combined gateway status report.
    GatewayStatus {
        /// `status` output.
        status: String,
        /// `plugins list` output.
        plugins: String,
        /// `nodes status` output, or a degraded notice.
        nodes: String,
    },
    /// Allowlist command output.
    Allowlist {
        /// CLI output.
        allowlist: String,
    },
    /// Approvals snapshot.
    Approvals {
        /// CLI output.
        approvals: String,
    },
    /// Call hang-up output.
    #[serde(rename_all = "camelCase")]
    CallEnd {
        /// CLI output.
        call_end: String,
    },
}

impl StateChange {
    /// Informational notice.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use voxgate_core::RiskLevel;

    fn to_value(kind: VoiceEventKind) -> serde_json::Value {
        serde_json::to_value(VoiceEvent::new("main", "web", kind)).unwrap()
    }

    #[test]
    fn test_envelope_shape() {
        let value = to_value(VoiceEventKind::TranscriptFinal {
            text: "status".into(),
        });
        assert_eq!(value["type"], "transcript.final");
        assert_eq!(value["sessionId"], "main");
        assert_eq!(value["workspaceId"], "web");
        assert_eq!(value["payload"], json!({"text": "status"}));
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_state_change_keys() {
        let value = to_value(VoiceEventKind::StateChanged(StateChange::Listening {
            listening: true,
            paused: false,
        }));
        assert_eq!(value["payload"], json!({"listening": true, "paused": false}));

        let value = to_value(VoiceEventKind::StateChanged(StateChange::Workspace {
            workspace_id: "api".into(),
        }));
        assert_eq!(value["payload"], json!({"workspaceId": "api"}));

        let value = to_value(VoiceEventKind::StateChanged(StateChange::CallEnd {
            call_end: "ended".into(),
        }));
        assert_eq!(value["payload"], json!({"callEnd": "ended"}));
    }

    #[test]
    fn test_approval_payloads() {
        let value = to_value(VoiceEventKind::ApprovalRequired(ApprovalPayload::Flagged {
            reason: "Blocked pattern matched: rm\\s+-rf".into(),
            pattern: Some("rm\\s+-rf".into()),
            prompt: "Say confirm to proceed or cancel to discard.".into(),
        }));
        assert_eq!(value["payload"]["pattern"], "rm\\s+-rf");

        let value = to_value(VoiceEventKind::ApprovalRequired(
            ApprovalPayload::StillPending {
                message: "pending".into(),
            },
        ));
        assert_eq!(value["payload"], json!({"message": "pending"}));
    }

    #[test]
    fn test_agent_reply_payload() {
        let value = to_value(VoiceEventKind::AgentReply(AgentTurnResponse {
            text: "Done".into(),
            tool_summary: None,
            risk_level: RiskLevel::Medium,
            raw: json!({"response": "Done"}),
        }));
        assert_eq!(value["type"], "agent.reply");
        assert_eq!(value["payload"]["riskLevel"], "medium");
        assert!(value["payload"].get("toolSummary").is_none());
    }

    #[test]
    fn test_deserialize_event() {
        let text = r#"{
            "type": "error",
            "sessionId": "main",
            "workspaceId": "web",
            "timestamp": "2026-01-01T00:00:00Z",
            "payload": {"message": "boom"}
        }"#;
        let event: VoiceEvent = serde_json::from_str(text).unwrap();
        assert_eq!(
            event.kind,
            VoiceEventKind::Error {
                message: "boom".into()
            }
        );
        assert_eq!(event.event_type(), "error");
    }
}
