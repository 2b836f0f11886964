//! Prelude module - commonly used test helpers.
//!
//! Use `use voxgate_test::prelude::*;` to import all essential helpers.

pub use crate::fixtures::*;
pub use crate::mocks::{MockBridge, MockOp};
pub use crate::init_test_logging;
