//! Configuration for the lldb-mi adapter
//!
//! Two layers: [`AdapterSettings`] is the adapter-wide TOML file, and
//! [`RequestArguments`] is what a single launch/attach request carries. The
//! [`normalize`] step folds both into a [`RequestConfiguration`].

mod normalize;
mod request;
mod settings;
pub mod serde_utils;

pub use normalize::{
    normalize, parse_arguments, Normalized, ATTACH_TARGET_SELECT, DEFAULT_PRE_RUN,
};
pub use request::{RequestArguments, RequestConfiguration, TunnelArguments, TunnelConfig};
pub use settings::AdapterSettings;

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Get the default configuration directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lldb-mi-adapter")
}

/// Get the default settings file path
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.toml")
}

/// Load configuration from a file
pub fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read config: {}", e)))?;

    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Write settings as TOML, creating missing parent directories
pub fn save_config<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Invalid(format!("Cannot create {}: {}", parent.display(), e))
        })?;
    }

    std::fs::write(path, content)
        .map_err(|e| ConfigError::Invalid(format!("Cannot write {}: {}", path.display(), e)))
}
