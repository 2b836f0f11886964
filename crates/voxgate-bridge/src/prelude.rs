//! Prelude module - commonly used types for convenient import.
//!
//! Use `use voxgate_bridge::prelude::*;` to import all essential types.

// Errors
pub use crate::{BridgeError, BridgeErrorCode, BridgeResult};

// Bridge
pub use crate::{BridgeConfig, GatewayBridge, OpenClawBridge, OperationTimeouts};

// Output parsing
pub use crate::{extract_json, sanitize_cli_text};
