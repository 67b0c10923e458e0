//! Configuration module for the logic sniffer core
//!
//! This module handles the persisted settings of the core:
//! - Demo device settings (data function, sample count, channel count)
//! - A settings store keeping namespaced key/value string pairs on disk
//!
//! # App Data Location
//!
//! Settings are stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/nl.lxtreme.logicsniffer/`
//! - **macOS**: `~/Library/Application Support/nl.lxtreme.logicsniffer/`
//! - **Windows**: `%APPDATA%\nl.lxtreme.logicsniffer\`
//!
//! # Example
//!
//! ```ignore
//! use logicsniffer::config::{SettingsStore, DEMO_DEVICE_NAMESPACE};
//!
//! let mut store = SettingsStore::load_or_default();
//! let mut device = store.device_settings(DEMO_DEVICE_NAMESPACE)?;
//! device.channel_count = 16;
//! store.set_device_settings(DEMO_DEVICE_NAMESPACE, &device);
//! store.save()?;
//! ```

pub mod device;

pub use device::{DeviceSettings, DEFAULT_CHANNEL_COUNT, DEFAULT_SAMPLE_COUNT};

use crate::error::{Result, ResultExt, SnifferError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "nl.lxtreme.logicsniffer";

/// Settings filename
pub const SETTINGS_FILE: &str = "device_settings.json";

/// Namespace of the demo device's settings
pub const DEMO_DEVICE_NAMESPACE: &str = "nl.lxtreme.ols.device.demo";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        SnifferError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(SnifferError::from)
            .with_context(|| format!("Creating app data directory {}", dir.display()))?;
    }

    Ok(dir)
}

/// Get the path to the settings file
pub fn settings_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(SETTINGS_FILE))
}

// ==================== Settings Store ====================

/// Namespaced key/value string pairs, persisted as one JSON file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsStore {
    /// Version for future migration support
    #[serde(default = "default_store_version")]
    pub version: u32,

    #[serde(default)]
    properties: BTreeMap<String, String>,
}

fn default_store_version() -> u32 {
    1
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            version: default_store_version(),
            properties: BTreeMap::new(),
        }
    }

    /// Load the store from the default location
    pub fn load() -> Result<Self> {
        let path = settings_path().ok_or_else(|| {
            SnifferError::Config("Could not determine settings path".to_string())
        })?;
        Self::load_from(&path)
    }

    /// Load the store from a file; a missing file yields an empty store
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        Self::read(path).with_context(|| format!("Loading settings from {}", path.display()))
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load the store, returning an empty one on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Self::new()
        })
    }

    /// Save the store to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(SETTINGS_FILE))
    }

    /// Save the store to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.write(path)
            .with_context(|| format!("Saving settings to {}", path.display()))?;
        tracing::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    fn write(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// All pairs whose key lives in `namespace`
    pub fn namespace(&self, namespace: &str) -> BTreeMap<String, String> {
        let prefix = format!("{}.", namespace);
        self.properties
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Device settings stored under `namespace`, defaults for missing keys
    pub fn device_settings(&self, namespace: &str) -> Result<DeviceSettings> {
        DeviceSettings::from_properties(namespace, &self.namespace(namespace))
    }

    /// Store device settings under `namespace`
    pub fn set_device_settings(&mut self, namespace: &str, settings: &DeviceSettings) {
        self.properties.extend(settings.to_properties(namespace));
    }
}
