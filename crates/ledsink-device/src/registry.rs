use std::collections::BTreeMap;

use tracing::debug;

use crate::device::LedDevice;
use crate::dmx::DmxDevice;
use crate::error::{DeviceError, Result};
use crate::file::FileDevice;

/// Builds a device from its JSON configuration and runs `init` on it.
pub type DeviceConstructor = fn(&serde_json::Value) -> Result<Box<dyn LedDevice>>;

/// Device-type name to constructor map.
///
/// The `type` key of a device configuration selects the entry.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    constructors: BTreeMap<&'static str, DeviceConstructor>,
}

impl DeviceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `dmx` and `file` devices.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("dmx", DmxDevice::construct);
        registry.register("file", FileDevice::construct);
        registry
    }

    /// Register a constructor, returning the one it replaces.
    pub fn register(
        &mut self,
        name: &'static str,
        constructor: DeviceConstructor,
    ) -> Option<DeviceConstructor> {
        self.constructors.insert(name, constructor)
    }

    /// Registered device types, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Build and initialize the device `config["type"]` names.
    pub fn create(&self, config: &serde_json::Value) -> Result<Box<dyn LedDevice>> {
        let name = config
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| DeviceError::Config("missing string key \"type\"".to_string()))?;

        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| DeviceError::UnknownDeviceType(name.to_string()))?;

        debug!(device_type = name, "constructing device");
        constructor(config)
    }
}
