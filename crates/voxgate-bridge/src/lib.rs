//! Voxgate Bridge - Subprocess bridge to the `OpenClaw` gateway CLI.
//!
//! This crate provides:
//! - [`OpenClawBridge`], which runs one CLI subprocess per operation with a
//!   bounded timeout and a bounded number of retries
//! - The mixed-output parser ([`extract_json`], [`sanitize_cli_text`]) that
//!   recovers JSON payloads from banner-laden CLI output
//! - The [`GatewayBridge`] trait, the seam the orchestrator is generic over
//! - The [`BridgeError`] failure taxonomy
//!
//! # Example
//!
//! ```rust,no_run
//! use voxgate_bridge::{BridgeConfig, GatewayBridge, OpenClawBridge};
//!
//! # async fn example() -> voxgate_bridge::BridgeResult<()> {
//! let bridge = OpenClawBridge::new(BridgeConfig::new("openclaw", "ws://127.0.0.1:18789"))?;
//!
//! // Health probes never fail; unreachable gateways are reported in-band.
//! let health = bridge.health().await;
//! println!("reachable: {}", health.reachable);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod bridge;
mod config;
mod error;
mod gateway;
mod output;
mod reply_risk;

pub use bridge::{CommandResult, GATEWAY_TOKEN_ENV, GATEWAY_URL_ENV, OpenClawBridge};
pub use config::{BridgeConfig, DEFAULT_RETRIES, DEFAULT_TIMEOUT, OperationTimeouts};
pub use error::{BridgeError, BridgeErrorCode, BridgeResult, OutputError, OutputResult};
pub use gateway::{DEFAULT_ALLOWLIST_AGENT, GatewayBridge};
pub use output::{extract_json, sanitize_cli_text};
pub use reply_risk::infer_reply_risk;
