//! The gateway seam the orchestrator talks through.

use async_trait::async_trait;
use voxgate_core::{AgentTurnRequest, AgentTurnResponse, CallStatus, GatewayHealth};

use crate::error::BridgeResult;

/// Agent pattern applying an allowlist entry to every agent.
pub const DEFAULT_ALLOWLIST_AGENT: &str = "*";

/// Operations the voice session needs from the gateway.
///
/// [`OpenClawBridge`](crate::OpenClawBridge) implements this by spawning the
/// CLI. Implementations must be safe to call concurrently; every call is
/// independent.
#[async_trait]
pub trait GatewayBridge: Send + Sync {
    /// Run one agent turn and return its reply.
    async fn agent_turn(&self, request: &AgentTurnRequest) -> BridgeResult<AgentTurnResponse>;

    /// Probe gateway health.
    ///
    /// Never fails: an unreachable gateway is reported with
    /// `reachable: false` and the failure message as detail.
    async fn health(&self) -> GatewayHealth;

    /// Overall gateway status text.
    async fn status(&self) -> BridgeResult<String>;

    /// Installed plugin listing.
    async fn list_plugins(&self) -> BridgeResult<String>;

    /// Paired node status text.
    async fn list_nodes_status(&self) -> BridgeResult<String>;

    /// Status of a phone call.
    async fn call_status(&self, call_id: &str) -> BridgeResult<CallStatus>;

    /// Hang up a phone call.
    async fn end_call(&self, call_id: &str) -> BridgeResult<String>;

    /// Add a command pattern to the gateway's exec allowlist.
    async fn add_allowlist_entry(&self, pattern: &str, agent: &str) -> BridgeResult<String>;

    /// Remove a command pattern from the gateway's exec allowlist.
    async fn remove_allowlist_entry(&self, pattern: &str, agent: &str) -> BridgeResult<String>;

    /// Current approvals configuration.
    async fn approvals_snapshot(&self) -> BridgeResult<String>;
}
