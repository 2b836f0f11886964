//! Terminal rendering of session events.

use std::fmt::Write;

use colored::Colorize;
use voxgate_events::{ApprovalPayload, StateChange, VoiceEvent, VoiceEventKind};

use crate::theme::Theme;

/// Render one event, or `None` for events the terminal does not show.
///
/// Final transcripts are the user's own input and are not echoed.
pub(crate) fn render_event(event: &VoiceEvent) -> Option<String> {
    let line = match &event.kind {
        VoiceEventKind::TranscriptPartial { text } => Theme::dimmed(&format!("… {text}")),
        VoiceEventKind::TranscriptFinal { .. } => return None,
        VoiceEventKind::AgentReply(reply) => {
            let mut out = format!(
                "{} {}",
                "agent".bold().green(),
                Theme::dimmed(&format!("[{}]", event.workspace_id))
            );
            out.push('\n');
            out.push_str(&reply.text);
            if let Some(summary) = &reply.tool_summary {
                out.push('\n');
                out.push_str(&Theme::dimmed(&format!("tools: {summary}")));
            }
            let _ = write!(out, "\nrisk: {}", Theme::risk_level(reply.risk_level));
            out
        },
        VoiceEventKind::ApprovalRequired(ApprovalPayload::Flagged {
            reason,
            pattern,
            prompt,
        }) => {
            let mut out = Theme::warning(reason);
            if let Some(pattern) = pattern {
                out.push_str(&Theme::dimmed(&format!(" ({pattern})")));
            }
            out.push('\n');
            out.push_str(prompt);
            out
        },
        VoiceEventKind::ApprovalRequired(ApprovalPayload::StillPending { message }) => {
            Theme::warning(message)
        },
        VoiceEventKind::StateChanged(change) => render_state(change),
        VoiceEventKind::Error { message } => Theme::error(message),
        VoiceEventKind::CallStatus(status) => {
            if status.found {
                let call = status
                    .call
                    .as_ref()
                    .and_then(|c| serde_json::to_string_pretty(c).ok())
                    .unwrap_or_default();
                format!("{}\n{call}", Theme::header("Call found"))
            } else {
                Theme::info("Call not found")
            }
        },
    };
    Some(line)
}

fn render_state(change: &StateChange) -> String {
    match change {
        StateChange::Listening { listening, paused } => {
            let state = match (listening, paused) {
                (false, _) => "stopped",
                (true, true) => "paused",
                (true, false) => "listening",
            };
            Theme::dimmed(&format!("listening: {state}"))
        },
        StateChange::Workspace { workspace_id } => {
            format!("Workspace: {}", Theme::workspace(workspace_id))
        },
        StateChange::Message { message } => Theme::info(message),
        StateChange::Health { health } => {
            let detail = health.detail.as_deref().unwrap_or_default();
            if health.reachable {
                Theme::success(&format!("Gateway reachable at {} {detail}", health.url))
            } else {
                Theme::error(&format!("Gateway unreachable at {}: {detail}", health.url))
            }
        },
        StateChange::GatewayStatus {
            status,
            plugins,
            nodes,
        } => {
            let separator = format!("\n{}\n", Theme::separator());
            [("Status", status), ("Plugins", plugins), ("Nodes", nodes)]
                .iter()
                .map(|(title, body)| format!("{}\n{body}", Theme::header(title)))
                .collect::<Vec<_>>()
                .join(separator.as_str())
        },
        StateChange::Allowlist { allowlist } => allowlist.clone(),
        StateChange::Approvals { approvals } => approvals.clone(),
        StateChange::CallEnd { call_end } => call_end.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use voxgate_core::{AgentTurnResponse, CallStatus, GatewayHealth, RiskLevel};

    fn event(kind: VoiceEventKind) -> VoiceEvent {
        VoiceEvent::new("agent:web", "web", kind)
    }

    #[test]
    fn test_final_transcript_hidden() {
        let rendered = render_event(&event(VoiceEventKind::TranscriptFinal {
            text: "hello".into(),
        }));
        assert!(rendered.is_none());
    }

    #[test]
    fn test_agent_reply() {
        let rendered = render_event(&event(VoiceEventKind::AgentReply(AgentTurnResponse {
            text: "Created the migration.".into(),
            tool_summary: Some("fs.write".into()),
            risk_level: RiskLevel::Medium,
            raw: json!({}),
        })))
        .unwrap();

        assert!(rendered.contains("Created the migration."));
        assert!(rendered.contains("tools: fs.write"));
        assert!(rendered.contains("medium"));
        assert!(rendered.contains("[web]"));
    }

    #[test]
    fn test_flagged_request() {
        let rendered = render_event(&event(VoiceEventKind::ApprovalRequired(
            ApprovalPayload::Flagged {
                reason: "Blocked pattern matched: rm\\s+-rf".into(),
                pattern: Some("rm\\s+-rf".into()),
                prompt: "Say confirm to proceed or cancel to discard.".into(),
            },
        )))
        .unwrap();

        assert!(rendered.contains("Blocked pattern matched"));
        assert!(rendered.contains("Say confirm to proceed"));
    }

    #[test]
    fn test_gateway_status_sections() {
        let rendered = render_event(&event(VoiceEventKind::StateChanged(
            StateChange::GatewayStatus {
                status: "gateway running".into(),
                plugins: "voicecall (enabled)".into(),
                nodes: "0 nodes paired".into(),
            },
        )))
        .unwrap();

        let status = rendered.find("gateway running").unwrap();
        let nodes = rendered.find("0 nodes paired").unwrap();
        assert!(status < nodes);
        assert!(rendered.contains("Plugins"));
    }

    #[test]
    fn test_health_and_call_status() {
        let unreachable = render_event(&event(VoiceEventKind::StateChanged(StateChange::Health {
            health: GatewayHealth {
                reachable: false,
                url: "ws://gw:1".into(),
                detail: Some("timed out".into()),
            },
        })))
        .unwrap();
        assert!(unreachable.contains("Gateway unreachable at ws://gw:1"));

        let missing = render_event(&event(VoiceEventKind::CallStatus(CallStatus {
            found: false,
            call: None,
            raw: json!({ "found": false }),
        })))
        .unwrap();
        assert!(missing.contains("Call not found"));
    }

    #[test]
    fn test_listening_state() {
        let rendered = render_event(&event(VoiceEventKind::StateChanged(
            StateChange::Listening {
                listening: true,
                paused: true,
            },
        )))
        .unwrap();
        assert!(rendered.contains("listening: paused"));
    }
}
