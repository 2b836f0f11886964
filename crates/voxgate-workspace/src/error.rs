//! Error types for workspace handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying workspaces.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The workspaces file could not be read.
    #[error("failed to read workspaces file {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The workspaces file is not valid JSON for the expected shape.
    #[error("failed to parse workspaces file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The workspace list violates a registry constraint.
    #[error("invalid workspace configuration: {0}")]
    Invalid(String),

    /// The id is not one of the configured workspaces.
    #[error("Workspace not allowlisted: {0}")]
    NotAllowlisted(String),

    /// No session key is registered for the workspace.
    #[error("No session registered for workspace: {0}")]
    NoSession(String),
}

/// Result type for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
