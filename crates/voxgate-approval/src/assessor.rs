//! Pattern-based risk assessment of request text.

use regex::{Regex, RegexBuilder};
use tracing::debug;
use voxgate_core::{ExecutionPolicy, RiskAssessment};

use crate::error::{ApprovalError, ApprovalResult};

#[derive(Debug, Clone)]
struct PolicyPattern {
    source: String,
    regex: Regex,
}

impl PolicyPattern {
    fn compile(source: &str) -> ApprovalResult<Self> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|e| ApprovalError::InvalidPattern {
                pattern: source.to_string(),
                source: e,
            })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }
}

fn compile_all(sources: &[String]) -> ApprovalResult<Vec<PolicyPattern>> {
    sources.iter().map(|s| PolicyPattern::compile(s)).collect()
}

/// Evaluates request text against an execution policy.
///
/// Blocked patterns are checked before confirmation patterns, each list in
/// configuration order; the first match wins. Both kinds hold the request
/// for confirmation, but blocked matches carry the stronger reason.
#[derive(Debug, Clone)]
pub struct RiskAssessor {
    blocked: Vec<PolicyPattern>,
    confirmation: Vec<PolicyPattern>,
}

impl RiskAssessor {
    /// Compile the policy's pattern lists.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::InvalidPattern`] for the first pattern that
    /// does not compile.
    pub fn new(policy: &ExecutionPolicy) -> ApprovalResult<Self> {
        Ok(Self {
            blocked: compile_all(&policy.blocked_patterns)?,
            confirmation: compile_all(&policy.confirmation_required_patterns)?,
        })
    }

    /// Assess a request.
    #[must_use]
    pub fn assess(&self, text: &str) -> RiskAssessment {
        if let Some(p) = self.blocked.iter().find(|p| p.regex.is_match(text)) {
            debug!(pattern = %p.source, "Blocked pattern matched");
            return RiskAssessment::flagged(
                &p.source,
                format!("Blocked pattern matched: {}", p.source),
            );
        }

        if let Some(p) = self.confirmation.iter().find(|p| p.regex.is_match(text)) {
            debug!(pattern = %p.source, "Confirmation pattern matched");
            return RiskAssessment::flagged(
                &p.source,
                format!("Confirmation required by policy: {}", p.source),
            );
        }

        RiskAssessment::low_risk()
    }
}

/// Assess `text` against `policy` without keeping the compiled matchers.
///
/// # Errors
///
/// Returns [`ApprovalError::InvalidPattern`] if a policy pattern does not
/// compile.
pub fn assess_risk(text: &str, policy: &ExecutionPolicy) -> ApprovalResult<RiskAssessment> {
    Ok(RiskAssessor::new(policy)?.assess(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ExecutionPolicy {
        ExecutionPolicy::default()
            .with_blocked_pattern(r"rm\s+-rf")
            .with_confirmation_pattern("drop database")
    }

    #[test]
    fn test_blocked_pattern_requires_confirmation() {
        let risk = assess_risk("please run rm -rf /", &policy()).unwrap();
        assert!(risk.requires_confirmation);
        assert_eq!(risk.matched_pattern.as_deref(), Some(r"rm\s+-rf"));
        assert_eq!(risk.reason, r"Blocked pattern matched: rm\s+-rf");
    }

    #[test]
    fn test_regular_coding_text_is_low_risk() {
        let risk = assess_risk("implement button component", &policy()).unwrap();
        assert!(!risk.requires_confirmation);
        assert!(risk.matched_pattern.is_none());
        assert_eq!(risk.reason, "No high-risk patterns detected.");
    }

    #[test]
    fn test_confirmation_pattern() {
        let assessor = RiskAssessor::new(&policy()).unwrap();
        let risk = assessor.assess("then DROP DATABASE staging");
        assert!(risk.requires_confirmation);
        assert_eq!(risk.reason, "Confirmation required by policy: drop database");
    }

    #[test]
    fn test_blocked_wins_over_confirmation() {
        let policy = ExecutionPolicy::default()
            .with_confirmation_pattern("rm")
            .with_blocked_pattern(r"rm\s+-rf");
        let risk = RiskAssessor::new(&policy)
            .unwrap()
            .assess("rm -rf node_modules");
        assert_eq!(risk.matched_pattern.as_deref(), Some(r"rm\s+-rf"));
        assert!(risk.reason.starts_with("Blocked"));
    }

    #[test]
    fn test_first_pattern_in_order_wins() {
        let policy = ExecutionPolicy::default()
            .with_blocked_pattern("force push")
            .with_blocked_pattern("push");
        let risk = RiskAssessor::new(&policy)
            .unwrap()
            .assess("force push to main");
        assert_eq!(risk.matched_pattern.as_deref(), Some("force push"));
    }

    #[test]
    fn test_invalid_pattern() {
        let policy = ExecutionPolicy::default().with_blocked_pattern("(unclosed");
        let err = RiskAssessor::new(&policy).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
