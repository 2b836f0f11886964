//! Prelude module - commonly used types for convenient import.
//!
//! Use `use voxgate_workspace::prelude::*;` to import all essential types.

pub use crate::{SessionManager, WorkspaceError, WorkspaceRegistry, WorkspaceResult};
