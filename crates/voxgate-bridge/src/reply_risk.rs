//! Coarse risk tagging of agent replies.
//!
//! Metadata only. Request gating is done by `voxgate-approval` before the
//! text ever reaches the agent.

use regex::Regex;
use std::sync::LazyLock;
use voxgate_core::RiskLevel;

static HIGH_RISK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\brm\s+-rf\b|\bdel\s+/f\b|\bformat\b|\bshutdown\b").expect("invalid regex")
});

static MEDIUM_RISK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bdelete\b|\bremove\b|\bdrop\b|\boverwrite\b").expect("invalid regex")
});

/// Classify an agent reply by the operations it mentions.
#[must_use]
pub fn infer_reply_risk(text: &str) -> RiskLevel {
    let normalized = text.to_lowercase();
    if HIGH_RISK.is_match(&normalized) {
        RiskLevel::High
    } else if MEDIUM_RISK.is_match(&normalized) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_risk_reply() {
        assert_eq!(infer_reply_risk("I ran rm -rf build/"), RiskLevel::High);
        assert_eq!(infer_reply_risk("Scheduled a SHUTDOWN"), RiskLevel::High);
        assert_eq!(infer_reply_risk(r"used del /f on the lock"), RiskLevel::High);
    }

    #[test]
    fn test_medium_risk_reply() {
        assert_eq!(
            infer_reply_risk("I will remove the unused import"),
            RiskLevel::Medium
        );
        assert_eq!(infer_reply_risk("Dropped? No: drop table"), RiskLevel::Medium);
    }

    #[test]
    fn test_low_risk_reply() {
        assert_eq!(infer_reply_risk("Added a button component"), RiskLevel::Low);
        // Word boundaries keep substrings from matching.
        assert_eq!(infer_reply_risk("formatted the removed-lines report"), RiskLevel::Low);
    }
}
