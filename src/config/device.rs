//! Demo device settings
//!
//! The demo device is configured by three values: which data function to
//! run, how many samples to produce and how many channels to capture.
//! Settings are persisted as flat string pairs under a namespace, e.g.
//!
//! ```text
//! demo.dataFunction = Counter
//! demo.dataLength   = 1024
//! demo.channels     = 8
//! ```

use crate::acquisition::MAX_CHANNEL_COUNT;
use crate::error::{Result, SnifferError};
use crate::generator::DataFunction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of samples produced by the demo device
pub const DEFAULT_SAMPLE_COUNT: usize = 1024;

/// Default number of channels captured by the demo device
pub const DEFAULT_CHANNEL_COUNT: u32 = 8;

/// Property key suffixes
const KEY_DATA_FUNCTION: &str = "dataFunction";
const KEY_DATA_LENGTH: &str = "dataLength";
const KEY_CHANNELS: &str = "channels";

/// Configuration of the demo device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSettings {
    /// Data function to run
    #[serde(default)]
    pub data_function: DataFunction,

    /// Number of samples for the plain patterns
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Number of channels to capture, `1..=32`
    #[serde(default = "default_channel_count")]
    pub channel_count: u32,
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

fn default_channel_count() -> u32 {
    DEFAULT_CHANNEL_COUNT
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            data_function: DataFunction::default(),
            sample_count: DEFAULT_SAMPLE_COUNT,
            channel_count: DEFAULT_CHANNEL_COUNT,
        }
    }
}

impl DeviceSettings {
    /// Check the settings can drive an acquisition
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CHANNEL_COUNT).contains(&self.channel_count) {
            return Err(SnifferError::InvalidArgument(format!(
                "channel count must be between 1 and {}, got {}",
                MAX_CHANNEL_COUNT, self.channel_count
            )));
        }
        let required = self.data_function.required_channels();
        if self.channel_count < required {
            return Err(SnifferError::InvalidArgument(format!(
                "'{}' needs at least {} channels, got {}",
                self.data_function, required, self.channel_count
            )));
        }
        Ok(())
    }

    /// Flatten into namespaced string pairs
    pub fn to_properties(&self, namespace: &str) -> BTreeMap<String, String> {
        let mut properties = BTreeMap::new();
        properties.insert(
            key(namespace, KEY_DATA_FUNCTION),
            self.data_function.name().to_string(),
        );
        properties.insert(key(namespace, KEY_DATA_LENGTH), self.sample_count.to_string());
        properties.insert(key(namespace, KEY_CHANNELS), self.channel_count.to_string());
        properties
    }

    /// Restore from namespaced string pairs.
    ///
    /// Missing keys keep their defaults; present keys must be valid.
    pub fn from_properties(namespace: &str, properties: &BTreeMap<String, String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(name) = properties.get(&key(namespace, KEY_DATA_FUNCTION)) {
            settings.data_function = name.parse()?;
        }
        if let Some(length) = properties.get(&key(namespace, KEY_DATA_LENGTH)) {
            settings.sample_count = parse_sample_count(length)?;
        }
        if let Some(channels) = properties.get(&key(namespace, KEY_CHANNELS)) {
            settings.channel_count = channels.trim().parse().map_err(|_| {
                SnifferError::InvalidArgument(format!("invalid channel count: {}", channels))
            })?;
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn key(namespace: &str, name: &str) -> String {
    format!("{}.{}", namespace, name)
}

fn parse_sample_count(text: &str) -> Result<usize> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| SnifferError::InvalidArgument(format!("invalid sample count: {}", text)))?;
    if value < 0 {
        return Err(SnifferError::InvalidArgument(format!(
            "sample count must not be negative, got {}",
            value
        )));
    }
    usize::try_from(value)
        .map_err(|_| SnifferError::InvalidArgument(format!("sample count too large: {}", value)))
}
