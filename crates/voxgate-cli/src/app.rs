//! Startup wiring: config, workspace registry, bridge and session.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use voxgate_bridge::OpenClawBridge;
use voxgate_config::AppConfig;
use voxgate_orchestrator::VoiceOrchestrator;
use voxgate_workspace::WorkspaceRegistry;

use crate::config_bridge;

/// Loaded configuration plus the pieces built from it.
pub(crate) struct App {
    pub(crate) config: AppConfig,
    pub(crate) bridge: Arc<OpenClawBridge>,
}

impl App {
    /// Load the config at `path`, or the default config path.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => voxgate_config::default_config_path()?,
        };
        let config = AppConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");

        let bridge = OpenClawBridge::new(config_bridge::to_bridge_config(&config))?;
        Ok(Self {
            config,
            bridge: Arc::new(bridge),
        })
    }

    pub(crate) fn workspaces_file(&self) -> &Path {
        &self.config.workspaces_file
    }

    /// Load the allow-listed workspaces.
    pub(crate) fn registry(&self) -> Result<WorkspaceRegistry> {
        let path = self.workspaces_file();
        WorkspaceRegistry::load(path)
            .with_context(|| format!("failed to load workspaces from {}", path.display()))
    }

    /// Build a session on the first workspace, or on `workspace` when given.
    pub(crate) fn session(
        &self,
        workspace: Option<&str>,
    ) -> Result<VoiceOrchestrator<OpenClawBridge>> {
        let gateway = &self.config.gateway;
        let mut session = VoiceOrchestrator::new(
            Arc::clone(&self.bridge),
            self.registry()?,
            &self.config.execution_policy,
        )?
        .with_gateway(&gateway.gateway_url, gateway.gateway_token.clone());

        if let Some(id) = workspace {
            session.switch_workspace(id)?;
        }
        Ok(session)
    }
}
