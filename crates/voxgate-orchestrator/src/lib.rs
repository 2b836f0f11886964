//! Voxgate Orchestrator - The voice session state machine.
//!
//! Ties the pieces of a session together:
//!
//! - [`parse_control_intent`] decides whether an utterance is a command
//!   for the session itself or a request for the agent.
//! - [`VoiceOrchestrator`] holds the session state (active workspace,
//!   listening flags, the one pending risky action) and routes requests
//!   through the risk assessor to the gateway.
//! - [`HealthMonitor`] polls gateway health in the background.
//! - [`build_acp_snippets`] renders editor configuration for a workspace.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use voxgate_bridge::{BridgeConfig, OpenClawBridge};
//! use voxgate_orchestrator::VoiceOrchestrator;
//!
//! let bridge = Arc::new(OpenClawBridge::new(BridgeConfig::new("openclaw", url))?);
//! let mut session = VoiceOrchestrator::new(bridge, registry, &policy)?;
//! let mut events = session.subscribe();
//!
//! session.handle_transcript("switch workspace api").await?;
//! while let Some(event) = events.try_recv() {
//!     println!("{}", event.event_type());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod acp;
mod error;
mod health;
mod intent;
mod orchestrator;

pub use acp::{AcpSnippet, build_acp_snippets};
pub use error::{OrchestratorError, OrchestratorResult};
pub use health::{DEFAULT_HEALTH_INTERVAL, HealthMonitor};
pub use intent::{ParsedIntent, parse_control_intent};
pub use orchestrator::VoiceOrchestrator;
