//! Per-workspace agent session keys.

use std::collections::HashMap;
use tracing::debug;
use voxgate_core::WorkspaceConfig;

use crate::error::{WorkspaceError, WorkspaceResult};

/// Maps each workspace to the agent session key its turns run under.
///
/// Seeded with every workspace's default key. The key set is fixed: only
/// known workspaces can be overridden.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: HashMap<String, String>,
}

impl SessionManager {
    /// Seed the table from workspace defaults.
    #[must_use]
    pub fn new(workspaces: &[WorkspaceConfig]) -> Self {
        let sessions = workspaces
            .iter()
            .map(|ws| (ws.id.clone(), ws.default_session_key.clone()))
            .collect();
        Self { sessions }
    }

    /// Session key for a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NoSession`] for unknown workspaces.
    pub fn session_key(&self, workspace_id: &str) -> WorkspaceResult<&str> {
        self.sessions
            .get(workspace_id)
            .map(String::as_str)
            .ok_or_else(|| WorkspaceError::NoSession(workspace_id.to_string()))
    }

    /// Override the session key of a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NoSession`] for unknown workspaces.
    pub fn set_session_key(
        &mut self,
        workspace_id: &str,
        session_key: impl Into<String>,
    ) -> WorkspaceResult<()> {
        let slot = self
            .sessions
            .get_mut(workspace_id)
            .ok_or_else(|| WorkspaceError::NoSession(workspace_id.to_string()))?;
        *slot = session_key.into();
        debug!(workspace_id, session_key = %slot, "Session key overridden");
        Ok(())
    }
}
