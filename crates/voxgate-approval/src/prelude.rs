//! Prelude module - commonly used types for convenient import.
//!
//! Use `use voxgate_approval::prelude::*;` to import all essential types.

pub use crate::{ApprovalError, ApprovalResult, RiskAssessor, assess_risk};
