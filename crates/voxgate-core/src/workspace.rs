//! Workspace definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Editor profile a workspace is normally opened with.
///
/// Only used to pick which ACP snippet to highlight; the core does not
/// talk to editors itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeProfile {
    /// Zed editor.
    Zed,
    /// Cursor editor.
    Cursor,
    /// Visual Studio Code.
    Vscode,
    /// Anything else that can launch an ACP command.
    #[default]
    Generic,
}

impl fmt::Display for IdeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zed => "zed",
            Self::Cursor => "cursor",
            Self::Vscode => "vscode",
            Self::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// An allow-listed workspace the agent may operate in.
///
/// Immutable once loaded. The host path is the path as seen by the machine
/// running voxgate; the guest path is the same tree as seen from the
/// environment the agent runs in (for example a WSL distribution).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Unique identifier (alphanumeric plus dashes).
    pub id: String,
    /// Absolute path on the host.
    #[serde(alias = "windowsPath")]
    pub host_path: PathBuf,
    /// Absolute path inside the guest environment.
    #[serde(alias = "wslPath")]
    pub guest_path: PathBuf,
    /// Session key used for agent turns until overridden.
    pub default_session_key: String,
    /// Preferred editor profile.
    #[serde(default)]
    pub ide_profile: IdeProfile,
}

impl WorkspaceConfig {
    /// Create a workspace with the generic IDE profile.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        host_path: impl Into<PathBuf>,
        guest_path: impl Into<PathBuf>,
        default_session_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            host_path: host_path.into(),
            guest_path: guest_path.into(),
            default_session_key: default_session_key.into(),
            ide_profile: IdeProfile::Generic,
        }
    }

    /// Set the IDE profile.
    #[must_use]
    pub fn with_ide_profile(mut self, profile: IdeProfile) -> Self {
        self.ide_profile = profile;
        self
    }
}
