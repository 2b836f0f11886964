//! Error types for the orchestrator.

use thiserror::Error;
use voxgate_approval::ApprovalError;
use voxgate_bridge::BridgeError;
use voxgate_workspace::WorkspaceError;

/// Errors that can occur in orchestrator operations.
///
/// Agent turn failures never surface here; they are published as `error`
/// events instead.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A gateway query failed.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// A workspace lookup failed.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// The execution policy could not be compiled.
    #[error(transparent)]
    Approval(#[from] ApprovalError),
}

/// Result type for orchestrator operations.
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
