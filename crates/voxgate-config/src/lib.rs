//! Voxgate Config - Typed application configuration.
//!
//! Configuration is read from a single TOML file (by default
//! `<config_dir>/voxgate/config.toml`). Fields the file leaves unset fall
//! back to environment variables, then to built-in defaults:
//!
//! | key | variable |
//! |---|---|
//! | `gateway.binary` | `OPENCLAW_BINARY` |
//! | `gateway.gateway_url` | `OPENCLAW_GATEWAY_URL` |
//! | `gateway.gateway_token` | `OPENCLAW_GATEWAY_TOKEN` |
//! | `workspaces_file` | `VOXGATE_WORKSPACES` |
//! | `logging.level` | `VOXGATE_LOG_LEVEL` |
//!
//! ```rust
//! use std::collections::HashMap;
//! use voxgate_config::AppConfig;
//!
//! let config = AppConfig::from_toml_str(
//!     "[gateway]\nretries = 2\n",
//!     &HashMap::new(),
//! )
//! .unwrap();
//! assert_eq!(config.gateway.retries, 2);
//! ```
//!
//! Conversion into bridge and telemetry types happens in the binary that
//! consumes the config.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::default_config_path;
pub use types::*;

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::Path;

impl AppConfig {
    /// Load `path` with process environment fallbacks.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is unreadable or malformed, or
    /// the configuration fails validation.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        loader::load(path)
    }

    /// Parse TOML text with an explicit environment map.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text is malformed or the
    /// configuration fails validation.
    pub fn from_toml_str<S: BuildHasher>(
        text: &str,
        env: &HashMap<String, String, S>,
    ) -> ConfigResult<Self> {
        loader::from_toml_str(text, env)
    }
}
