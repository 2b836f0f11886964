//! Voxgate Core - Shared data model for the voxgate voice bridge.
//!
//! This crate provides the plain data types every other voxgate crate
//! speaks in:
//! - Workspace configuration ([`WorkspaceConfig`], [`IdeProfile`])
//! - Execution policy ([`ExecutionPolicy`] and its mode enums)
//! - Agent turn request/response shapes exchanged with the gateway CLI
//! - Guardrail results ([`RiskAssessment`], [`PendingAction`])
//! - The control-intent vocabulary ([`ControlIntent`])
//!
//! Nothing in here performs I/O. Loading and validation live in
//! `voxgate-config` and `voxgate-workspace`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod policy;
pub mod types;
pub mod workspace;

pub use policy::{AskMode, ExecutionPolicy, HostMode, SecurityMode};
pub use types::{
    AgentTurnMode, AgentTurnRequest, AgentTurnResponse, CallStatus, ControlIntent, GatewayHealth,
    PendingAction, RiskAssessment, RiskLevel,
};
pub use workspace::{IdeProfile, WorkspaceConfig};
