//! Pluggable LED output devices.
//!
//! Every device implements [`LedDevice`]: `init` from a JSON config, `open`,
//! `write` one frame of colors at a time, `close`. Devices are built by name
//! through a [`DeviceRegistry`].
//!
//! Built-in devices:
//! - `dmx` ([`DmxDevice`]): one DMX512 universe over an RS-232/RS-485 adapter
//! - `file` ([`FileDevice`]): a text dump of every frame

pub mod config;
pub mod device;
pub mod dmx;
pub mod error;
pub mod file;
pub mod registry;

pub use config::{load_config, DmxConfig, FileConfig};
pub use device::{DeviceState, LedDevice};
pub use dmx::{DmxDevice, BREAK_TIME, DMX_BAUD_RATE, MARK_AFTER_BREAK};
pub use error::{DeviceError, Result};
pub use file::FileDevice;
pub use registry::{DeviceConstructor, DeviceRegistry};

pub use ledsink_frame::{ColorRgb, DeviceProfile, UniverseLayout};
