//! Test fixtures for common types.

use serde_json::json;
use voxgate_core::{AgentTurnResponse, ExecutionPolicy, RiskLevel, WorkspaceConfig};
use voxgate_workspace::WorkspaceRegistry;

/// Two workspaces: `web` (default) and `api`.
#[must_use]
pub fn test_workspaces() -> Vec<WorkspaceConfig> {
    vec![
        WorkspaceConfig::new("web", "/srv/web", "/mnt/web", "agent:web"),
        WorkspaceConfig::new("api", "/srv/api", "/mnt/api", "agent:api"),
    ]
}

/// Registry over [`test_workspaces`].
///
/// # Panics
///
/// Never; the fixture workspaces are valid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_registry() -> WorkspaceRegistry {
    WorkspaceRegistry::new(test_workspaces()).expect("fixture workspaces are valid")
}

/// Policy that blocks `rm -rf` and asks before `drop database`.
#[must_use]
pub fn test_policy() -> ExecutionPolicy {
    ExecutionPolicy::default()
        .with_blocked_pattern(r"rm\s+-rf")
        .with_confirmation_pattern("drop database")
}

/// A low-risk agent reply with the given text.
#[must_use]
pub fn test_agent_reply(text: impl Into<String>) -> AgentTurnResponse {
    let text = text.into();
    AgentTurnResponse {
        raw: json!({ "response": text }),
        text,
        tool_summary: None,
        risk_level: RiskLevel::Low,
    }
}
