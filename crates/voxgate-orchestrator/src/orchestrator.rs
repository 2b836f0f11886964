//! The voice session state machine.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use voxgate_approval::RiskAssessor;
use voxgate_bridge::{DEFAULT_ALLOWLIST_AGENT, GatewayBridge};
use voxgate_core::{
    AgentTurnMode, AgentTurnRequest, ControlIntent, ExecutionPolicy, PendingAction,
    WorkspaceConfig,
};
use voxgate_events::{
    ApprovalPayload, EventBus, EventReceiver, StateChange, VoiceEvent, VoiceEventKind,
};
use voxgate_workspace::{SessionManager, WorkspaceRegistry};

use crate::acp::{AcpSnippet, build_acp_snippets};
use crate::error::OrchestratorResult;
use crate::intent::{ParsedIntent, parse_control_intent};

const CONFIRM_PROMPT: &str = "Say confirm to proceed or cancel to discard.";
const STILL_PENDING: &str = "Pending risky action exists. Say confirm or cancel.";

/// One voice session over a fixed set of workspaces.
///
/// Owns the active workspace, the listening flags and the single pending
/// action slot. Every observable effect is published on the event bus;
/// `transcript.final` for an input always precedes the events it causes.
///
/// Mutating operations take `&mut self`, so a host that drives the session
/// from several tasks must wrap it in a mutex.
pub struct VoiceOrchestrator<B> {
    bridge: Arc<B>,
    registry: WorkspaceRegistry,
    sessions: SessionManager,
    assessor: RiskAssessor,
    bus: EventBus,
    current: WorkspaceConfig,
    listening: bool,
    paused: bool,
    pending_action: Option<PendingAction>,
    gateway_url: String,
    gateway_token: Option<String>,
}

impl<B: GatewayBridge> VoiceOrchestrator<B> {
    /// Create a session on the registry's first workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if a policy pattern does not compile.
    pub fn new(
        bridge: Arc<B>,
        registry: WorkspaceRegistry,
        policy: &ExecutionPolicy,
    ) -> OrchestratorResult<Self> {
        let assessor = RiskAssessor::new(policy)?;
        let sessions = SessionManager::new(registry.list());
        let current = registry.first().clone();

        Ok(Self {
            bridge,
            sessions,
            assessor,
            bus: EventBus::new(),
            current,
            registry,
            listening: false,
            paused: false,
            pending_action: None,
            gateway_url: String::new(),
            gateway_token: None,
        })
    }

    /// Publish on an existing bus instead of a private one.
    #[must_use]
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    /// Gateway address used in ACP snippets.
    #[must_use]
    pub fn with_gateway(mut self, url: impl Into<String>, token: Option<String>) -> Self {
        self.gateway_url = url.into();
        self.gateway_token = token;
        self
    }

    /// Subscribe to session events.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        self.bus.subscribe()
    }

    /// The bus events are published on.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    /// The active workspace.
    #[must_use]
    pub fn current_workspace(&self) -> &WorkspaceConfig {
        &self.current
    }

    /// All configured workspaces.
    #[must_use]
    pub fn list_workspaces(&self) -> &[WorkspaceConfig] {
        self.registry.list()
    }

    /// Whether voice input is being captured.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Whether capture is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The request awaiting confirmation, if any.
    #[must_use]
    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.pending_action.as_ref()
    }

    /// Whether `path` lies inside a configured workspace.
    #[must_use]
    pub fn is_path_allowed(&self, path: impl AsRef<Path>) -> bool {
        self.registry.is_path_allowed(path)
    }

    /// ACP snippets for the active workspace.
    #[must_use]
    pub fn acp_snippets(&self) -> Vec<AcpSnippet> {
        build_acp_snippets(
            &self.current,
            &self.gateway_url,
            self.gateway_token.as_deref(),
        )
    }

    /// Begin capturing voice input.
    pub fn start_listening(&mut self) {
        self.listening = true;
        self.paused = false;
        self.emit_listening();
    }

    /// Stop capturing voice input.
    pub fn stop_listening(&mut self) {
        self.listening = false;
        self.paused = false;
        self.emit_listening();
    }

    /// Pause capture. `listening` is left as is.
    pub fn pause(&mut self) {
        self.paused = true;
        self.emit_listening();
    }

    /// Resume capture.
    pub fn resume(&mut self) {
        self.paused = false;
        self.emit_listening();
    }

    /// Make `workspace_id` the active workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the workspace is not configured.
    pub fn switch_workspace(&mut self, workspace_id: &str) -> OrchestratorResult<()> {
        self.current = self.registry.get(workspace_id)?.clone();
        debug!(workspace_id, "Switched workspace");
        self.emit(VoiceEventKind::StateChanged(StateChange::Workspace {
            workspace_id: self.current.id.clone(),
        }));
        Ok(())
    }

    /// Route a workspace's agent turns to a different session key.
    ///
    /// # Errors
    ///
    /// Returns an error if the workspace is not configured.
    pub fn set_session_key(
        &mut self,
        workspace_id: &str,
        session_key: impl Into<String>,
    ) -> OrchestratorResult<()> {
        Ok(self.sessions.set_session_key(workspace_id, session_key)?)
    }

    /// Republish an interim recognition result.
    pub fn handle_partial_transcript(&self, text: &str) {
        self.emit(VoiceEventKind::TranscriptPartial {
            text: text.to_string(),
        });
    }

    /// Interpret a final spoken utterance.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures of a spoken `status` command. Agent turn
    /// failures are published as `error` events.
    pub async fn handle_transcript(&mut self, text: &str) -> OrchestratorResult<()> {
        self.handle_input(text, AgentTurnMode::Voice).await
    }

    /// Interpret an utterance from the given channel.
    ///
    /// Blank input is ignored. Otherwise `transcript.final` is published
    /// first, then the text is handled as a control command, rejected while
    /// an action is pending, held for confirmation, or sent to the agent.
    ///
    /// # Errors
    ///
    /// See [`Self::handle_transcript`].
    pub async fn handle_input(&mut self, text: &str, mode: AgentTurnMode) -> OrchestratorResult<()> {
        let transcript = text.trim();
        if transcript.is_empty() {
            return Ok(());
        }

        self.emit(VoiceEventKind::TranscriptFinal {
            text: transcript.to_string(),
        });

        if let Some(parsed) = parse_control_intent(transcript) {
            return self.handle_control_intent(parsed, mode).await;
        }

        if self.pending_action.is_some() {
            self.emit(VoiceEventKind::ApprovalRequired(
                ApprovalPayload::StillPending {
                    message: STILL_PENDING.to_string(),
                },
            ));
            return Ok(());
        }

        let risk = self.assessor.assess(transcript);
        if risk.requires_confirmation {
            info!(
                workspace_id = %self.current.id,
                pattern = ?risk.matched_pattern,
                "Holding request for confirmation"
            );
            self.pending_action = Some(PendingAction {
                workspace_id: self.current.id.clone(),
                text: transcript.to_string(),
            });
            self.emit(VoiceEventKind::ApprovalRequired(ApprovalPayload::Flagged {
                reason: risk.reason,
                pattern: risk.matched_pattern,
                prompt: CONFIRM_PROMPT.to_string(),
            }));
            return Ok(());
        }

        let workspace_id = self.current.id.clone();
        self.run_agent_turn(&workspace_id, transcript, mode).await;
        Ok(())
    }

    async fn handle_control_intent(
        &mut self,
        parsed: ParsedIntent,
        mode: AgentTurnMode,
    ) -> OrchestratorResult<()> {
        debug!(intent = %parsed.intent, "Control intent");
        match parsed.intent {
            ControlIntent::StartListening => {
                self.start_listening();
                self.emit_message("Listening started.");
            },
            ControlIntent::StopListening => {
                self.stop_listening();
                self.emit_message("Listening stopped.");
            },
            ControlIntent::Pause => {
                self.pause();
                self.emit_message("Listening paused.");
            },
            ControlIntent::Resume => {
                self.resume();
                self.emit_message("Listening resumed.");
            },
            ControlIntent::Status => self.get_gateway_status().await?,
            ControlIntent::SwitchWorkspace => match parsed.workspace_id {
                None => self.emit_error("Workspace id is required."),
                Some(id) => {
                    if let Err(e) = self.switch_workspace(&id) {
                        self.emit_error(e.to_string());
                    }
                },
            },
            ControlIntent::Confirm => match self.pending_action.take() {
                None => self.emit_message("No pending action to confirm."),
                Some(action) => {
                    info!(workspace_id = %action.workspace_id, "Running confirmed action");
                    self.run_agent_turn(&action.workspace_id, &action.text, mode)
                        .await;
                },
            },
            ControlIntent::Cancel => {
                if self.pending_action.take().is_some() {
                    info!("Pending action discarded");
                }
                self.emit_message("Pending action canceled.");
            },
            ControlIntent::CallStatus => {
                self.emit_message("Call status requires a call ID.");
            },
        }
        Ok(())
    }

    async fn run_agent_turn(&self, workspace_id: &str, text: &str, mode: AgentTurnMode) {
        let session_key = match self.sessions.session_key(workspace_id) {
            Ok(key) => key.to_string(),
            Err(e) => {
                self.emit_error(e.to_string());
                return;
            },
        };

        let request = AgentTurnRequest::new(session_key, workspace_id, text, mode);
        match self.bridge.agent_turn(&request).await {
            Ok(response) => self.emit(VoiceEventKind::AgentReply(response)),
            Err(e) => {
                warn!(code = %e.code(), error = %e, "Agent turn failed");
                self.emit_error(e.to_string());
            },
        }
    }

    /// Probe gateway health and publish the result.
    pub async fn get_gateway_health(&self) {
        let health = self.bridge.health().await;
        self.emit(VoiceEventKind::StateChanged(StateChange::Health { health }));
    }

    /// Fetch status, plugins and nodes concurrently and publish them together.
    ///
    /// A nodes failure is folded into the report.
    ///
    /// # Errors
    ///
    /// Returns the status or plugins failure.
    pub async fn get_gateway_status(&self) -> OrchestratorResult<()> {
        let (status, plugins, nodes) = tokio::join!(
            self.bridge.status(),
            self.bridge.list_plugins(),
            self.bridge.list_nodes_status(),
        );
        let nodes = nodes.unwrap_or_else(|e| format!("nodes status unavailable: {e}"));

        self.emit(VoiceEventKind::StateChanged(StateChange::GatewayStatus {
            status: status?,
            plugins: plugins?,
            nodes,
        }));
        Ok(())
    }

    /// Allow a command pattern for every agent.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure.
    pub async fn add_allowlist_command(&self, pattern: &str) -> OrchestratorResult<()> {
        let allowlist = self
            .bridge
            .add_allowlist_entry(pattern, DEFAULT_ALLOWLIST_AGENT)
            .await?;
        self.emit(VoiceEventKind::StateChanged(StateChange::Allowlist { allowlist }));
        Ok(())
    }

    /// Remove a command pattern for every agent.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure.
    pub async fn remove_allowlist_command(&self, pattern: &str) -> OrchestratorResult<()> {
        let allowlist = self
            .bridge
            .remove_allowlist_entry(pattern, DEFAULT_ALLOWLIST_AGENT)
            .await?;
        self.emit(VoiceEventKind::StateChanged(StateChange::Allowlist { allowlist }));
        Ok(())
    }

    /// Publish the gateway's approvals configuration.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure.
    pub async fn fetch_approvals_snapshot(&self) -> OrchestratorResult<()> {
        let approvals = self.bridge.approvals_snapshot().await?;
        self.emit(VoiceEventKind::StateChanged(StateChange::Approvals { approvals }));
        Ok(())
    }

    /// Publish the status of a phone call.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure.
    pub async fn get_call_status(&self, call_id: &str) -> OrchestratorResult<()> {
        let status = self.bridge.call_status(call_id).await?;
        self.emit(VoiceEventKind::CallStatus(status));
        Ok(())
    }

    /// Hang up a phone call.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure.
    pub async fn end_call(&self, call_id: &str) -> OrchestratorResult<()> {
        let call_end = self.bridge.end_call(call_id).await?;
        self.emit(VoiceEventKind::StateChanged(StateChange::CallEnd { call_end }));
        Ok(())
    }

    fn emit_listening(&self) {
        debug!(listening = self.listening, paused = self.paused, "Listening state");
        self.emit(VoiceEventKind::StateChanged(StateChange::Listening {
            listening: self.listening,
            paused: self.paused,
        }));
    }

    fn emit_message(&self, message: &str) {
        self.emit(VoiceEventKind::StateChanged(StateChange::message(message)));
    }

    fn emit_error(&self, message: impl Into<String>) {
        self.emit(VoiceEventKind::Error {
            message: message.into(),
        });
    }

    fn emit(&self, kind: VoiceEventKind) {
        let session_id = match self.sessions.session_key(&self.current.id) {
            Ok(key) => key.to_string(),
            Err(e) => {
                warn!(error = %e, "Emitting event without a session id");
                String::new()
            },
        };
        self.bus
            .publish(VoiceEvent::new(session_id, self.current.id.clone(), kind));
    }
}
