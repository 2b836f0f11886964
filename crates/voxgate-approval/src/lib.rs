//! Voxgate Approval - Gate risky requests before they reach the agent.
//!
//! The [`RiskAssessor`] holds the execution policy's blocked and
//! confirmation-required patterns, compiled once, and evaluates request
//! text against them in configuration order.
//!
//! # Example
//!
//! ```
//! use voxgate_approval::RiskAssessor;
//! use voxgate_core::ExecutionPolicy;
//!
//! let policy = ExecutionPolicy::default().with_blocked_pattern(r"rm\s+-rf");
//! let assessor = RiskAssessor::new(&policy).unwrap();
//!
//! assert!(assessor.assess("please run rm -rf /").requires_confirmation);
//! assert!(!assessor.assess("implement button component").requires_confirmation);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod assessor;
mod error;

pub use assessor::{RiskAssessor, assess_risk};
pub use error::{ApprovalError, ApprovalResult};
