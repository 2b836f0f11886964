//! Recovery of structured payloads from noisy CLI output.
//!
//! Gateway CLIs print banners, plugin load lines and colour codes around
//! their JSON result. Nothing delimits the payload, so extraction is a
//! sequence of increasingly narrow attempts, each scanning from the end of
//! the text because the structured result is normally printed last:
//!
//! 1. The whole trimmed text.
//! 2. Every greedy `{...}` / `[...]` span, last span first.
//! 3. Every line that starts with `{` or `[`, last line first.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::{OutputError, OutputResult};

static JSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}|\[.*\]").expect("invalid regex"));

// CSI sequences (colours, cursor movement) and OSC sequences (titles, links).
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("invalid regex")
});

/// Extract the JSON payload from mixed CLI output.
///
/// Callers normally pass text through [`sanitize_cli_text`] first.
///
/// # Errors
///
/// Returns [`OutputError::Empty`] for blank input and
/// [`OutputError::NoJsonPayload`] when no candidate parses.
pub fn extract_json(text: &str) -> OutputResult<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(OutputError::Empty);
    }

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    let spans: Vec<&str> = JSON_SPAN.find_iter(trimmed).map(|m| m.as_str()).collect();
    for candidate in spans.iter().rev() {
        if let Ok(value) = serde_json::from_str(candidate) {
            return Ok(value);
        }
    }

    trimmed
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| line.starts_with('{') || line.starts_with('['))
        .find_map(|line| serde_json::from_str(line).ok())
        .ok_or(OutputError::NoJsonPayload)
}

/// Strip ANSI escape sequences and carriage returns, then trim.
#[must_use]
pub fn sanitize_cli_text(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").replace('\r', "").trim().to_string()
}
