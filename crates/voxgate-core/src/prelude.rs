//! Prelude module - commonly used types for convenient import.
//!
//! Use `use voxgate_core::prelude::*;` to import all essential types.

// Workspaces
pub use crate::{IdeProfile, WorkspaceConfig};

// Policy
pub use crate::{AskMode, ExecutionPolicy, HostMode, SecurityMode};

// Agent turns and guardrails
pub use crate::{
    AgentTurnMode, AgentTurnRequest, AgentTurnResponse, CallStatus, ControlIntent, GatewayHealth,
    PendingAction, RiskAssessment, RiskLevel,
};
