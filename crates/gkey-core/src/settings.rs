// GKey Settings Module
// Loads user-configurable display names and log options from TOML

#![cfg(feature = "settings")]

use std::path::{Path, PathBuf};

use crate::bridge::BridgeConfig;
use crate::identifier::DeviceNames;

/// Settings for the bridge
///
/// Loaded from a TOML file (default: ~/.config/gkey-bridge/settings.toml).
/// Identifier tags are not configurable; only presentation is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    device_names: DeviceNames,
    log_source: String,
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    devices: Option<DeviceSettings>,

    #[serde(default)]
    log: Option<LogSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DeviceSettings {
    #[serde(default)]
    primary_name: Option<String>,
    #[serde(default)]
    secondary_name: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LogSettings {
    #[serde(default)]
    source: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    pub fn new() -> Self {
        let defaults = BridgeConfig::default();
        Self {
            device_names: defaults.device_names,
            log_source: defaults.log_source,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(devices) = toml_settings.devices {
            if let Some(name) = devices.primary_name {
                settings.device_names.primary = non_empty("devices.primary_name", name)?;
            }
            if let Some(name) = devices.secondary_name {
                settings.device_names.secondary = non_empty("devices.secondary_name", name)?;
            }
        }

        if let Some(log) = toml_settings.log {
            if let Some(source) = log.source {
                settings.log_source = non_empty("log.source", source)?;
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gkey-bridge").join("settings.toml"))
    }

    /// Load from default location (~/.config/gkey-bridge/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::new())
    }

    pub fn device_names(&self) -> &DeviceNames {
        &self.device_names
    }

    pub fn log_source(&self) -> &str {
        &self.log_source
    }

    /// File these settings were read from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Build the runtime config for a bridge
    pub fn to_bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            device_names: self.device_names.clone(),
            log_source: self.log_source.clone(),
        }
    }
}

fn non_empty(field: &str, value: String) -> Result<String, SettingsError> {
    if value.trim().is_empty() {
        return Err(SettingsError::InvalidValue(format!("{} cannot be empty", field)));
    }
    Ok(value)
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# G-Key Bridge Settings
# Place this file at: ~/.config/gkey-bridge/settings.toml

[devices]
# Names shown next to hotkeys in the host's hotkey dialog
primary_name = "Logitech Keyboard"
secondary_name = "Logitech Mouse"

[log]
# Source tag for entries written to the host log
source = "GKeyBridge"
"#
}
