//! CLI theme and styling.

use colored::Colorize;
use voxgate_core::RiskLevel;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an info message.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    pub(crate) fn separator() -> String {
        "━".repeat(50).dimmed().to_string()
    }

    /// Format a risk level.
    pub(crate) fn risk_level(level: RiskLevel) -> String {
        match level {
            RiskLevel::Low => "low".green().to_string(),
            RiskLevel::Medium => "medium".yellow().to_string(),
            RiskLevel::High => "high".red().bold().to_string(),
        }
    }

    /// Format a workspace id.
    pub(crate) fn workspace(id: &str) -> String {
        format!("{}", id.cyan())
    }
}
