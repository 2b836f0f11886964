//! Editor configuration snippets for attaching to a workspace session over ACP.

use serde::Serialize;
use serde_json::json;
use voxgate_core::{IdeProfile, WorkspaceConfig};

/// A ready-to-paste editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcpSnippet {
    /// Editor the snippet is for.
    pub editor: IdeProfile,
    /// Short label.
    pub title: String,
    /// Snippet body.
    pub content: String,
}

/// Build the Zed and generic ACP snippets for `workspace`.
#[must_use]
pub fn build_acp_snippets(
    workspace: &WorkspaceConfig,
    gateway_url: &str,
    token: Option<&str>,
) -> Vec<AcpSnippet> {
    let mut args = vec![
        "acp",
        "--session",
        workspace.default_session_key.as_str(),
        "--url",
        gateway_url,
    ];
    if let Some(token) = token {
        args.extend(["--token", token]);
    }

    let zed = json!({
        "agent_servers": {
            format!("OpenClaw ACP ({})", workspace.id): {
                "type": "custom",
                "command": "openclaw",
                "args": args,
                "env": {}
            }
        }
    });

    vec![
        AcpSnippet {
            editor: IdeProfile::Zed,
            title: "Zed settings.json snippet".to_string(),
            content: serde_json::to_string_pretty(&zed).unwrap_or_else(|_| zed.to_string()),
        },
        AcpSnippet {
            editor: IdeProfile::Generic,
            title: "Generic ACP command".to_string(),
            content: format!("openclaw {}", args.join(" ")),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> WorkspaceConfig {
        WorkspaceConfig::new("web", "/srv/web", "/mnt/web", "agent:web")
    }

    #[test]
    fn test_zed_snippet() {
        let snippets = build_acp_snippets(&workspace(), "ws://127.0.0.1:18789", None);
        assert_eq!(snippets[0].editor, IdeProfile::Zed);

        let parsed: serde_json::Value = serde_json::from_str(&snippets[0].content).unwrap();
        let server = &parsed["agent_servers"]["OpenClaw ACP (web)"];
        assert_eq!(server["command"], "openclaw");
        assert_eq!(
            server["args"],
            json!(["acp", "--session", "agent:web", "--url", "ws://127.0.0.1:18789"])
        );
    }

    #[test]
    fn test_generic_snippet_with_token() {
        let snippets = build_acp_snippets(&workspace(), "ws://gw:1", Some("tok"));
        assert_eq!(snippets[1].editor, IdeProfile::Generic);
        assert_eq!(
            snippets[1].content,
            "openclaw acp --session agent:web --url ws://gw:1 --token tok"
        );
    }
}
