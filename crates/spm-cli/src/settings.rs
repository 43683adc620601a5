//! Settings file - backend connection defaults stored on disk.
//!
//! Settings live in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/com.smartpaymap.SmartPayMap/
//! - Windows: %APPDATA%/smartpaymap/SmartPayMap/config/
//! - Linux: ~/.config/smartpaymap/

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use spm_client::ClientSettings;
use spm_model::{Result, SpmError};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "smartpaymap";
const APP_NAME: &str = "SmartPayMap";
const CONFIG_FILENAME: &str = "settings.toml";

/// Contents of `settings.toml`.
///
/// ```toml
/// [api]
/// environment = "production"
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ClientSettings,
}

/// Path of the default settings file, if the platform has a config dir.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Loads settings from `path`, or from the default location when `None`.
///
/// A missing file yields defaults. A file that exists but cannot be read or
/// parsed is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                return Ok(Settings::default());
            }
        },
    };

    match fs::read_to_string(&path) {
        Ok(content) => {
            let settings = toml::from_str(&content).map_err(|e| {
                SpmError::Config(format!("invalid settings file {}: {e}", path.display()))
            })?;
            tracing::debug!(path = %path.display(), "loaded settings");
            Ok(settings)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
        Err(source) => Err(SpmError::Io { path, source }),
    }
}
