//! DMX512 universe layout and color frame encoding.
//!
//! This is the protocol layer of ledsink. A frame of [`ColorRgb`] values is
//! encoded in place into a [`ChannelBuffer`]:
//! - byte 0 is the NULL start code (`0x00`)
//! - fixtures follow back to back, [`DeviceProfile::slots_per_fixture`] bytes each
//! - at most 512 data slots, extra fixtures are dropped
//!
//! Encoding never allocates; the buffer is sized once from a [`UniverseLayout`].

pub mod codec;
pub mod color;
pub mod error;
pub mod profile;

pub use codec::{encode_frame, ChannelBuffer, UniverseLayout, MAX_SLOTS, START_CODE};
pub use color::ColorRgb;
pub use error::{FrameError, Result};
pub use profile::DeviceProfile;
