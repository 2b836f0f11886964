//! Allow-listed workspace registry.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;
use voxgate_core::WorkspaceConfig;

use crate::error::{WorkspaceError, WorkspaceResult};

static WORKSPACE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("invalid regex"));

/// On-disk shape of the workspaces file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspacesFile {
    /// Configured workspaces, in priority order.
    pub workspaces: Vec<WorkspaceConfig>,
}

/// The fixed set of workspaces a session may target.
///
/// The first workspace is the default active one.
#[derive(Debug, Clone)]
pub struct WorkspaceRegistry {
    workspaces: Vec<WorkspaceConfig>,
}

impl WorkspaceRegistry {
    /// Build a registry from validated workspace definitions.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Invalid`] if the list is empty, an id is
    /// malformed or duplicated, or a path or session key is blank.
    pub fn new(workspaces: Vec<WorkspaceConfig>) -> WorkspaceResult<Self> {
        if workspaces.is_empty() {
            return Err(WorkspaceError::Invalid(
                "at least one workspace is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for ws in &workspaces {
            if !WORKSPACE_ID.is_match(&ws.id) {
                return Err(WorkspaceError::Invalid(format!(
                    "workspace id '{}' must contain only letters, digits and dashes",
                    ws.id
                )));
            }
            if !seen.insert(ws.id.as_str()) {
                return Err(WorkspaceError::Invalid(format!(
                    "duplicate workspace id '{}'",
                    ws.id
                )));
            }
            if ws.host_path.as_os_str().is_empty() || ws.guest_path.as_os_str().is_empty() {
                return Err(WorkspaceError::Invalid(format!(
                    "workspace '{}' needs both a host and a guest path",
                    ws.id
                )));
            }
            if ws.default_session_key.trim().is_empty() {
                return Err(WorkspaceError::Invalid(format!(
                    "workspace '{}' needs a default session key",
                    ws.id
                )));
            }
        }

        Ok(Self { workspaces })
    }

    /// Parse a workspaces file from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed JSON, or any error of [`Self::new`].
    pub fn from_json_str(text: &str) -> WorkspaceResult<Self> {
        let file: WorkspacesFile = serde_json::from_str(text)?;
        Self::new(file.workspaces)
    }

    /// Load the workspaces file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or any error of
    /// [`Self::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> WorkspaceResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| WorkspaceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_json_str(&text)?;
        debug!(
            path = %path.display(),
            count = registry.workspaces.len(),
            "Loaded workspaces"
        );
        Ok(registry)
    }

    /// All workspaces in configuration order.
    #[must_use]
    pub fn list(&self) -> &[WorkspaceConfig] {
        &self.workspaces
    }

    /// The default workspace.
    #[must_use]
    pub fn first(&self) -> &WorkspaceConfig {
        // Construction rejects empty lists.
        &self.workspaces[0]
    }

    /// Look up a workspace by id.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotAllowlisted`] for unknown ids.
    pub fn get(&self, workspace_id: &str) -> WorkspaceResult<&WorkspaceConfig> {
        self.workspaces
            .iter()
            .find(|ws| ws.id == workspace_id)
            .ok_or_else(|| WorkspaceError::NotAllowlisted(workspace_id.to_string()))
    }

    /// Whether `workspace_id` is configured.
    #[must_use]
    pub fn contains(&self, workspace_id: &str) -> bool {
        self.workspaces.iter().any(|ws| ws.id == workspace_id)
    }

    /// Whether `path` is a workspace host path or nested under one.
    ///
    /// Comparison is case-insensitive and treats `\` and `/` alike.
    #[must_use]
    pub fn is_path_allowed(&self, path: impl AsRef<Path>) -> bool {
        self.resolve_workspace_for_path(path).is_some()
    }

    /// The first workspace whose host path contains `path`.
    #[must_use]
    pub fn resolve_workspace_for_path(&self, path: impl AsRef<Path>) -> Option<&WorkspaceConfig> {
        let target = normalize_path(path.as_ref());
        self.workspaces
            .iter()
            .find(|ws| is_within(&target, &normalize_path(&ws.host_path)))
    }
}

fn is_within(target: &str, root: &str) -> bool {
    if target == root {
        return true;
    }
    if root.ends_with('/') {
        target.starts_with(root)
    } else {
        target.len() > root.len()
            && target.starts_with(root)
            && target.as_bytes().get(root.len()) == Some(&b'/')
    }
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Lexically normalize a host path for comparison.
///
/// Separators become `/`, relative paths are resolved against the current
/// directory, `.` and `..` segments are collapsed and the result is
/// lowercased. Drive-letter paths (`C:/...`) count as absolute on every
/// platform.
fn normalize_path(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");

    let absolute = if raw.starts_with('/') || has_drive_prefix(&raw) {
        raw
    } else {
        match std::env::current_dir() {
            Ok(cwd) => format!("{}/{raw}", cwd.to_string_lossy().replace('\\', "/")),
            Err(_) => raw,
        }
    };

    let (prefix, rest) = if has_drive_prefix(&absolute) {
        absolute.split_at(2)
    } else {
        ("", absolute.as_str())
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            s => segments.push(s),
        }
    }

    format!("{prefix}/{}", segments.join("/")).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use voxgate_core::IdeProfile;

    const WORKSPACES_JSON: &str = r#"{
        "workspaces": [
            {
                "id": "ice-core-ai",
                "windowsPath": "C:/Users/User/OneDrive/Desktop/indie/ice-core-ai",
                "wslPath": "/home/user/indie/ice-core-ai",
                "defaultSessionKey": "agent:ice-core-ai",
                "ideProfile": "zed"
            },
            {
                "id": "billing",
                "hostPath": "/srv/billing",
                "guestPath": "/mnt/billing",
                "defaultSessionKey": "agent:billing"
            }
        ]
    }"#;

    fn registry() -> WorkspaceRegistry {
        WorkspaceRegistry::from_json_str(WORKSPACES_JSON).unwrap()
    }

    #[test]
    fn test_allows_path_inside_workspace() {
        assert!(
            registry().is_path_allowed("C:/Users/User/OneDrive/Desktop/indie/ice-core-ai/apps/web")
        );
    }

    #[test]
    fn test_rejects_outside_path() {
        assert!(!registry().is_path_allowed("C:/Users/User/Desktop/not-allowlisted"));
    }

    #[test]
    fn test_rejects_sibling_with_shared_prefix() {
        assert!(!registry().is_path_allowed("/srv/billing-archive"));
        assert!(!registry().is_path_allowed("/srv"));
    }

    #[test]
    fn test_containment_is_case_and_separator_insensitive() {
        let registry = registry();
        assert!(registry.is_path_allowed(r"c:\users\user\onedrive\desktop\indie\ICE-CORE-AI"));
        assert!(registry.is_path_allowed("/SRV/Billing/src/../Cargo.toml"));
        assert!(!registry.is_path_allowed("/srv/billing/../payroll"));
    }

    #[test]
    fn test_resolve_workspace_for_path() {
        let registry = registry();
        let ws = registry
            .resolve_workspace_for_path("/srv/billing/invoices/mod.rs")
            .unwrap();
        assert_eq!(ws.id, "billing");
        assert!(registry.resolve_workspace_for_path("/tmp/other").is_none());
    }

    #[test]
    fn test_get_and_list() {
        let registry = registry();
        assert_eq!(registry.list().len(), 2);
        assert_eq!(registry.first().id, "ice-core-ai");
        assert_eq!(registry.first().ide_profile, IdeProfile::Zed);
        assert_eq!(registry.get("billing").unwrap().guest_path, PathBuf::from("/mnt/billing"));
        assert!(registry.contains("billing"));

        let err = registry.get("nope").unwrap_err();
        assert_eq!(err.to_string(), "Workspace not allowlisted: nope");
    }

    #[test]
    fn test_rejects_empty_list() {
        let err = WorkspaceRegistry::from_json_str(r#"{"workspaces": []}"#).unwrap_err();
        assert!(matches!(err, WorkspaceError::Invalid(_)));
    }

    #[test]
    fn test_rejects_duplicate_and_malformed_ids() {
        let dup = vec![
            WorkspaceConfig::new("web", "/a", "/b", "k"),
            WorkspaceConfig::new("web", "/c", "/d", "k"),
        ];
        let err = WorkspaceRegistry::new(dup).unwrap_err();
        assert!(err.to_string().contains("duplicate"));

        let bad = vec![WorkspaceConfig::new("my web", "/a", "/b", "k")];
        assert!(WorkspaceRegistry::new(bad).is_err());
    }

    #[test]
    fn test_rejects_blank_session_key() {
        let ws = vec![WorkspaceConfig::new("web", "/a", "/b", "  ")];
        assert!(WorkspaceRegistry::new(ws).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("workspaces.json");
        std::fs::write(&path, WORKSPACES_JSON).unwrap();

        let registry = WorkspaceRegistry::load(&path).unwrap();
        assert_eq!(registry.list()[1].id, "billing");

        let missing = WorkspaceRegistry::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, WorkspaceError::Io { .. }));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/./b//c/../d")), "/a/b/d");
        assert_eq!(normalize_path(Path::new(r"D:\Work\Repo\")), "d:/work/repo");
        assert_eq!(normalize_path(Path::new("/")), "/");
    }
}
