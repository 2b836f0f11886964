//! Config file discovery and loading.
//!
//! 1. Read and parse the TOML file (a missing file means all defaults)
//! 2. Apply env var fallbacks for unset fields
//! 3. Deserialize into [`AppConfig`]
//! 4. Resolve a relative workspaces path against the config directory
//! 5. Validate

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::types::AppConfig;
use crate::validate;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Workspaces file name used when the config does not name one.
pub const DEFAULT_WORKSPACES_FILE: &str = "workspaces.json";

/// Maximum config file size (1 MiB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Default config path: `<config_dir>/voxgate/config.toml`.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] when the platform has no config
/// directory for the current user.
pub fn default_config_path() -> ConfigResult<PathBuf> {
    directories::ProjectDirs::from("", "", "voxgate")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Load configuration from `path` using the process environment.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or the
/// result fails validation.
pub fn load(path: &Path) -> ConfigResult<AppConfig> {
    load_with_env(path, &collect_env_vars())
}

/// Load configuration from `path` with an explicit environment.
///
/// # Errors
///
/// Same as [`load`].
pub fn load_with_env<S: BuildHasher>(
    path: &Path,
    env: &HashMap<String, String, S>,
) -> ConfigResult<AppConfig> {
    let text = if let Some(text) = read_file(path)? {
        info!(path = %path.display(), "loaded config");
        text
    } else {
        debug!(path = %path.display(), "config file not found, using defaults");
        String::new()
    };

    let mut config = parse(&text, &path.display().to_string(), env)?;
    if config.workspaces_file.is_relative()
        && let Some(dir) = path.parent()
    {
        config.workspaces_file = dir.join(&config.workspaces_file);
    }

    validate::validate(&config)?;
    Ok(config)
}

/// Parse config text with an explicit environment.
///
/// A relative workspaces path is returned as written.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the text is not valid config TOML or fails
/// validation.
pub fn from_toml_str<S: BuildHasher>(
    text: &str,
    env: &HashMap<String, String, S>,
) -> ConfigResult<AppConfig> {
    let config = parse(text, "<inline>", env)?;
    validate::validate(&config)?;
    Ok(config)
}

fn parse<S: BuildHasher>(
    text: &str,
    origin: &str,
    env: &HashMap<String, String, S>,
) -> ConfigResult<AppConfig> {
    let parse_error = |source| ConfigError::ParseError {
        path: origin.to_owned(),
        source,
    };

    let mut root: toml::Table = toml::from_str(text).map_err(parse_error)?;
    apply_env_fallbacks(&mut root, env);

    let mut config: AppConfig = toml::Value::Table(root).try_into().map_err(parse_error)?;
    if config.workspaces_file.as_os_str().is_empty() {
        config.workspaces_file = PathBuf::from(DEFAULT_WORKSPACES_FILE);
    }
    Ok(config)
}

fn read_file(path: &Path) -> ConfigResult<Option<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len()
            ),
        });
    }
    Ok(Some(content))
}
