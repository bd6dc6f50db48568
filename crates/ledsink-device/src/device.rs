use std::fmt;

use ledsink_frame::{ColorRgb, UniverseLayout};
use serde::Serialize;

use crate::error::Result;

/// Lifecycle state of an output device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    /// Not opened yet, or closed.
    #[default]
    Uninitialized,
    /// Open and accepting frames.
    Ready,
    /// Configuration or open failed. Cleared only by a successful `init`.
    InError,
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Uninitialized => f.write_str("uninitialized"),
            DeviceState::Ready => f.write_str("ready"),
            DeviceState::InError => f.write_str("in error"),
        }
    }
}

/// An LED output device.
///
/// Calls are synchronous and take `&mut self`; one frame is in flight at a
/// time. Implementations release their sink on `close` and on drop.
pub trait LedDevice: Send {
    /// Registry name of the device type.
    fn device_type(&self) -> &'static str;

    /// Apply a JSON configuration. Does not open the sink.
    fn init(&mut self, config: &serde_json::Value) -> Result<()>;

    /// Re-run `init` with the last configuration and open the sink.
    fn open(&mut self) -> Result<()>;

    /// Close the sink. Idempotent.
    fn close(&mut self) -> Result<()>;

    /// Output one frame. Requires [`DeviceState::Ready`].
    fn write(&mut self, colors: &[ColorRgb]) -> Result<()>;

    /// Current lifecycle state.
    fn state(&self) -> DeviceState;

    /// Fixtures this device drives per frame.
    fn led_count(&self) -> usize;

    /// Universe geometry, for devices that encode into one.
    fn layout(&self) -> Option<UniverseLayout> {
        None
    }

    fn is_ready(&self) -> bool {
        self.state() == DeviceState::Ready
    }
}
