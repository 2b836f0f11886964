//! Voxgate Test - Shared test utilities.
//!
//! Add as a dev-dependency and use the scripted [`MockBridge`] wherever a
//! [`GatewayBridge`](voxgate_bridge::GatewayBridge) is needed:
//!
//! ```rust,ignore
//! use voxgate_test::{MockBridge, test_registry};
//!
//! let bridge = Arc::new(MockBridge::new().with_agent_reply("Done"));
//! let orchestrator = VoiceOrchestrator::new(bridge.clone(), test_registry(), &test_policy())?;
//! orchestrator.handle_transcript("add a button").await?;
//! assert_eq!(bridge.agent_requests()[0].text, "add a button");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

/// Install a test-friendly tracing subscriber once per process.
///
/// Honours `RUST_LOG`; output goes through the test harness capture.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
