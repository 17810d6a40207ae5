//! Settings loading and display

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use lmi_core::config::{self, AdapterSettings};

/// Load adapter settings.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
pub fn load_settings(path: Option<&Path>) -> Result<AdapterSettings> {
    match path {
        Some(path) => config::load_config(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => {
            let default_path = config::default_settings_path();
            if default_path.exists() {
                config::load_config(&default_path).with_context(|| {
                    format!("Failed to load settings from {}", default_path.display())
                })
            } else {
                tracing::debug!("No settings at {:?}, using defaults", default_path);
                Ok(AdapterSettings::default())
            }
        }
    }
}

/// Write the effective settings back to `path` (or the default location).
///
/// A missing file is created with the built-in defaults; an existing one is
/// rewritten with every field explicit.
pub fn write_settings(path: Option<&Path>) -> Result<PathBuf> {
    let target = path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_settings_path);
    let effective = if target.exists() {
        load_settings(Some(&target))?
    } else {
        AdapterSettings::default()
    };
    config::save_config(&target, &effective)
        .with_context(|| format!("Failed to write settings to {}", target.display()))?;
    tracing::info!("Wrote settings to {}", target.display());
    Ok(target)
}

/// Render effective settings as TOML
pub fn settings(settings: &AdapterSettings) -> Result<String> {
    toml::to_string_pretty(settings).context("Failed to encode settings")
}
