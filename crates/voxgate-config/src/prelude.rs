//! Prelude module - commonly used types for convenient import.
//!
//! Use `use voxgate_config::prelude::*;` to import all essential types.

pub use crate::{
    AppConfig, ConfigError, ConfigResult, GatewaySection, HealthSection, LoggingSection,
    TimeoutsSection, default_config_path,
};
