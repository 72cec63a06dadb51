//! Screen configuration
//!
//! Holds the provisioned map access credential and camera defaults, loaded
//! from a `settings.toml` under the platform configuration directory. The
//! credential is plain configuration here; secret management belongs to the
//! host deployment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::camera::DEFAULT_ZOOM;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "mapscreen";

/// User-facing settings for the map screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Opaque access credential for the external map rendering capability
    #[serde(default)]
    pub api_key: String,
    /// Zoom level used when centering on the device location
    #[serde(default = "default_zoom")]
    pub default_zoom: f32,
}

fn default_zoom() -> f32 {
    DEFAULT_ZOOM
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

/// Configuration load/store failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads settings from the default location, falling back to defaults when no
/// file exists yet
pub fn load() -> Result<Settings, SettingsError> {
    if let Some(path) = default_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Settings::default())
}

pub fn load_from_path(path: &Path) -> Result<Settings, SettingsError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(settings)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip() {
        let settings = Settings {
            api_key: "abc-123".to_string(),
            default_zoom: 15.5,
        };
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join("settings.toml");

        save_to_path(&settings, &path).expect("failed to save settings");
        let loaded = load_from_path(&path).expect("failed to load settings");

        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = toml::from_str("").expect("empty settings should parse");
        assert_eq!(settings.api_key, "");
        assert_eq!(settings.default_zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn load_from_missing_path_is_an_io_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "api_key = [not toml").expect("failed to write file");

        let result = load_from_path(&path);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }
}
