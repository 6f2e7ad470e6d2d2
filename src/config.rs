//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeselect/treeselect.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `TREESELECT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("config error: {message}")]
    Config { message: String },
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Marker for selected nodes (default: "[x]")
    pub checked_marker: String,
    /// Marker for unselected nodes (default: "[ ]")
    pub unchecked_marker: String,
    /// Append ` (id)` to every label
    pub show_ids: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            checked_marker: "[x]".into(),
            unchecked_marker: "[ ]".into(),
            show_ids: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub checked_marker: Option<String>,
    pub unchecked_marker: Option<String>,
    pub show_ids: Option<bool>,
}

/// Get the XDG config directory for treeselect.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeselect").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeselect.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ConfigLoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ConfigLoadError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ConfigLoadError {
    ConfigLoadError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            checked_marker: overlay
                .checked_marker
                .clone()
                .unwrap_or_else(|| self.checked_marker.clone()),
            unchecked_marker: overlay
                .unchecked_marker
                .clone()
                .unwrap_or_else(|| self.unchecked_marker.clone()),
            show_ids: overlay.show_ids.unwrap_or(self.show_ids),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file; unlike the global file it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("config: global {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            debug!("config: explicit {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply TREESELECT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ConfigLoadError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TREESELECT").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("checked_marker") {
            settings.checked_marker = val;
        }
        if let Ok(val) = config.get_string("unchecked_marker") {
            settings.unchecked_marker = val;
        }
        if let Ok(val) = config.get_bool("show_ids") {
            settings.show_ids = val;
        }

        Ok(settings)
    }
}
