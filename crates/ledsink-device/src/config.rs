//! Typed device configuration.
//!
//! Device configs arrive as JSON objects whose `type` key names the registry
//! entry. Each device deserializes its own keys at `init` time, so a bad
//! value surfaces as [`DeviceError::Config`] from `init`, not from parsing.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::dmx::DMX_BAUD_RATE;
use crate::error::{DeviceError, Result};

/// Configuration of a `dmx` device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmxConfig {
    /// Serial port identifier.
    pub output: String,
    /// Baud rate. DMX512 runs at 250 kbit/s.
    #[serde(default = "default_dmx_rate")]
    pub rate: u32,
    /// Device profile name (`raw`, `extended`).
    #[serde(rename = "dmxdevice", default = "default_dmx_device")]
    pub dmx_device: String,
    /// Requested fixture count.
    #[serde(default)]
    pub led_count: usize,
}

/// Configuration of a `file` device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    #[serde(default = "default_file_output")]
    pub output: PathBuf,
    /// Prefix every frame with a local timestamp and the time since the last frame.
    #[serde(default)]
    pub print_time_stamp: bool,
    #[serde(default)]
    pub led_count: usize,
}

fn default_dmx_rate() -> u32 {
    DMX_BAUD_RATE
}

// A missing profile must fail profile resolution, not silently pick one.
fn default_dmx_device() -> String {
    "invalid".to_string()
}

fn default_file_output() -> PathBuf {
    PathBuf::from("/dev/null")
}

/// Deserialize a device's typed config from its JSON object.
pub(crate) fn parse<T: DeserializeOwned>(device_type: &str, config: &serde_json::Value) -> Result<T> {
    T::deserialize(config).map_err(|err| DeviceError::Config(format!("{device_type}: {err}")))
}

/// Read a device configuration file (one JSON object).
pub fn load_config(path: impl AsRef<Path>) -> Result<serde_json::Value> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DeviceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|err| DeviceError::Config(format!("{}: {err}", path.display())))?;
    if !value.is_object() {
        return Err(DeviceError::Config(format!(
            "{}: expected a JSON object",
            path.display()
        )));
    }
    Ok(value)
}
