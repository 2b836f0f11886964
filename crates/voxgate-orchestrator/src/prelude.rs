//! Prelude module - commonly used types for convenient import.
//!
//! Use `use voxgate_orchestrator::prelude::*;` to import all essential types.

// Session
pub use crate::{OrchestratorError, OrchestratorResult, VoiceOrchestrator};

// Classification
pub use crate::{ParsedIntent, parse_control_intent};

// Background health
pub use crate::{DEFAULT_HEALTH_INTERVAL, HealthMonitor};

// Editor snippets
pub use crate::{AcpSnippet, build_acp_snippets};
