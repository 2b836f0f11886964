//! Control-intent classification of utterances.
//!
//! Multi-word phrases are checked before the single-word aliases so that,
//! for example, "call status" never falls through to plain "status" and
//! "stop" only counts when it is the whole utterance.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use voxgate_core::ControlIntent;

/// A recognised control command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIntent {
    /// The command.
    pub intent: ControlIntent,
    /// Target workspace of a switch command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

impl ParsedIntent {
    fn bare(intent: ControlIntent) -> Self {
        Self {
            intent,
            workspace_id: None,
        }
    }
}

static SWITCH_WORKSPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bswitch workspace\s+([a-z0-9-]+)\b").expect("invalid regex")
});

static SWITCH_WORKSPACE_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^switch workspace$").expect("invalid regex"));

// Evaluation order is significant.
static INTENT_PATTERNS: LazyLock<Vec<(ControlIntent, Regex)>> = LazyLock::new(|| {
    [
        (ControlIntent::CallStatus, r"\bcall status\b|\bphone status\b"),
        (
            ControlIntent::StartListening,
            r"\bstart listening\b|\blisten now\b|^start$",
        ),
        (
            ControlIntent::StopListening,
            r"\bstop listening\b|^stop$|\bmute mic\b",
        ),
        (ControlIntent::Pause, r"\bpause\b|\bhold on\b"),
        (ControlIntent::Resume, r"\bresume\b|\bcontinue listening\b"),
        (
            ControlIntent::Confirm,
            r"\bconfirm\b|^yes$|\bgo ahead\b|\bapprove\b",
        ),
        (
            ControlIntent::Cancel,
            r"\bcancel\b|^no$|\bnever mind\b|\babort\b",
        ),
        (
            ControlIntent::Status,
            r"\bstatus\b|\bhealth check\b|\bwhat'?s going on\b",
        ),
    ]
    .into_iter()
    .map(|(intent, pattern)| {
        (
            intent,
            Regex::new(&format!("(?i){pattern}")).expect("invalid regex"),
        )
    })
    .collect()
});

/// Classify an utterance.
///
/// Returns `None` for text that should go to the agent as a request.
#[must_use]
pub fn parse_control_intent(text: &str) -> Option<ParsedIntent> {
    let normalized = text.trim();
    if normalized.is_empty() {
        return None;
    }

    if let Some(caps) = SWITCH_WORKSPACE.captures(normalized) {
        return Some(ParsedIntent {
            intent: ControlIntent::SwitchWorkspace,
            workspace_id: caps.get(1).map(|m| m.as_str().to_string()),
        });
    }
    if SWITCH_WORKSPACE_BARE.is_match(normalized) {
        return Some(ParsedIntent::bare(ControlIntent::SwitchWorkspace));
    }

    INTENT_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(normalized))
        .map(|(intent, _)| ParsedIntent::bare(*intent))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent_of(text: &str) -> Option<ControlIntent> {
        parse_control_intent(text).map(|p| p.intent)
    }

    #[test]
    fn test_switch_workspace() {
        let parsed = parse_control_intent("switch workspace ice-core-ai").unwrap();
        assert_eq!(parsed.intent, ControlIntent::SwitchWorkspace);
        assert_eq!(parsed.workspace_id.as_deref(), Some("ice-core-ai"));

        let parsed = parse_control_intent("please Switch Workspace API now").unwrap();
        assert_eq!(parsed.workspace_id.as_deref(), Some("API"));
    }

    #[test]
    fn test_switch_workspace_without_id() {
        let parsed = parse_control_intent("switch workspace").unwrap();
        assert_eq!(parsed.intent, ControlIntent::SwitchWorkspace);
        assert!(parsed.workspace_id.is_none());
    }

    #[test]
    fn test_confirm_aliases() {
        assert_eq!(intent_of("go ahead"), Some(ControlIntent::Confirm));
        assert_eq!(intent_of("Yes"), Some(ControlIntent::Confirm));
        assert_eq!(intent_of("I approve"), Some(ControlIntent::Confirm));
    }

    #[test]
    fn test_cancel_aliases() {
        assert_eq!(intent_of("no"), Some(ControlIntent::Cancel));
        assert_eq!(intent_of("never mind"), Some(ControlIntent::Cancel));
        assert_eq!(intent_of("abort that"), Some(ControlIntent::Cancel));
    }

    #[test]
    fn test_single_words_only_match_whole_utterance() {
        assert_eq!(intent_of("stop"), Some(ControlIntent::StopListening));
        assert_eq!(intent_of(" start "), Some(ControlIntent::StartListening));
        assert_eq!(intent_of("no more globals in the config module"), None);
        assert_eq!(intent_of("stop the dev server on port 3000"), None);
    }

    #[test]
    fn test_call_status_before_status() {
        assert_eq!(intent_of("what's the call status"), Some(ControlIntent::CallStatus));
        assert_eq!(intent_of("gateway status"), Some(ControlIntent::Status));
        assert_eq!(intent_of("whats going on"), Some(ControlIntent::Status));
    }

    #[test]
    fn test_listening_controls() {
        assert_eq!(intent_of("start listening"), Some(ControlIntent::StartListening));
        assert_eq!(intent_of("mute mic"), Some(ControlIntent::StopListening));
        assert_eq!(intent_of("hold on"), Some(ControlIntent::Pause));
        assert_eq!(intent_of("continue listening"), Some(ControlIntent::Resume));
    }

    #[test]
    fn test_plain_requests() {
        assert_eq!(parse_control_intent("create a migration for billing"), None);
        assert_eq!(parse_control_intent("   "), None);
    }
}
