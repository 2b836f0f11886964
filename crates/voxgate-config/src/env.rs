//! Environment variable fallbacks.
//!
//! A variable only fills a field the config file leaves unset; explicit file
//! values always win. Empty variables are ignored.

use std::collections::HashMap;
use std::hash::BuildHasher;
use tracing::debug;

/// Variables consulted, with the dotted config key each one fills.
pub const ENV_FALLBACKS: &[(&str, &str)] = &[
    ("OPENCLAW_BINARY", "gateway.binary"),
    ("OPENCLAW_GATEWAY_URL", "gateway.gateway_url"),
    ("OPENCLAW_GATEWAY_TOKEN", "gateway.gateway_token"),
    ("VOXGATE_WORKSPACES", "workspaces_file"),
    ("VOXGATE_LOG_LEVEL", "logging.level"),
];

/// Snapshot the process environment variables that can affect configuration.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with("OPENCLAW_") || key.starts_with("VOXGATE_"))
        .collect()
}

/// Fill unset keys of `root` from `env`.
pub fn apply_env_fallbacks<S: BuildHasher>(
    root: &mut toml::Table,
    env: &HashMap<String, String, S>,
) {
    for (var, key) in ENV_FALLBACKS {
        let Some(value) = env.get(*var).filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        if set_if_missing(root, key, value) {
            debug!(var, key, "applied environment fallback");
        }
    }
}

fn set_if_missing(root: &mut toml::Table, dotted: &str, value: &str) -> bool {
    let mut table = root;
    let mut parts = dotted.split('.').peekable();
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            if table.contains_key(part) {
                return false;
            }
            table.insert(part.to_owned(), toml::Value::String(value.to_owned()));
            return true;
        }
        let child = table
            .entry(part.to_owned())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        let toml::Value::Table(child) = child else {
            return false;
        };
        table = child;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_fills_missing_nested_key() {
        let mut root = toml::Table::new();
        apply_env_fallbacks(&mut root, &env(&[("OPENCLAW_GATEWAY_URL", "ws://gw:9")]));
        assert_eq!(root["gateway"]["gateway_url"].as_str(), Some("ws://gw:9"));
    }

    #[test]
    fn test_file_value_wins() {
        let mut root: toml::Table = toml::from_str("[gateway]\nbinary = \"from-file\"").unwrap();
        apply_env_fallbacks(&mut root, &env(&[("OPENCLAW_BINARY", "from-env")]));
        assert_eq!(root["gateway"]["binary"].as_str(), Some("from-file"));
    }

    #[test]
    fn test_empty_variable_ignored() {
        let mut root = toml::Table::new();
        apply_env_fallbacks(&mut root, &env(&[("OPENCLAW_GATEWAY_TOKEN", "  ")]));
        assert!(root.is_empty());
    }
}
