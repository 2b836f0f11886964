//! Voxgate Workspace - The fixed set of workspaces a session may target.
//!
//! - [`WorkspaceRegistry`]: the allow-listed workspaces, loaded once at
//!   startup, with path containment queries.
//! - [`SessionManager`]: which agent session key each workspace talks to.
//!
//! # Example
//!
//! ```rust
//! use voxgate_core::WorkspaceConfig;
//! use voxgate_workspace::WorkspaceRegistry;
//!
//! let registry = WorkspaceRegistry::new(vec![WorkspaceConfig::new(
//!     "web",
//!     "/srv/web",
//!     "/mnt/web",
//!     "agent:web",
//! )])
//! .unwrap();
//!
//! assert!(registry.is_path_allowed("/srv/web/src/main.rs"));
//! assert!(!registry.is_path_allowed("/srv/website"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod registry;
mod sessions;

pub use error::{WorkspaceError, WorkspaceResult};
pub use registry::{WorkspaceRegistry, WorkspacesFile};
pub use sessions::SessionManager;
