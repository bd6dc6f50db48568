//! Built-in DMX device profiles.
//!
//! A profile fixes where the first fixture starts, how many slots each
//! fixture consumes and how a color maps onto those slots.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::color::ColorRgb;
use crate::error::FrameError;

/// Value written to the auxiliary (intensity/white) slot of extended fixtures.
pub const AUX_FULL: u8 = 255;

/// Byte layout of one fixture inside the universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceProfile {
    /// 3 slots: red, green, blue.
    Raw,
    /// 4 slots: red, green, blue, then a full auxiliary channel.
    Extended,
}

impl DeviceProfile {
    /// Channel the first fixture starts at (slot 0 is the start code).
    pub const fn start_channel(self) -> usize {
        match self {
            DeviceProfile::Raw | DeviceProfile::Extended => 1,
        }
    }

    /// Slots consumed by one fixture.
    pub const fn slots_per_fixture(self) -> usize {
        match self {
            DeviceProfile::Raw => 3,
            DeviceProfile::Extended => 4,
        }
    }

    /// Canonical configuration name.
    pub const fn name(self) -> &'static str {
        match self {
            DeviceProfile::Raw => "raw",
            DeviceProfile::Extended => "extended",
        }
    }

    /// Write one fixture. `slots` must be exactly `slots_per_fixture` long.
    #[inline]
    pub fn encode_fixture(self, color: ColorRgb, slots: &mut [u8]) {
        match self {
            DeviceProfile::Raw => slots.copy_from_slice(&color.to_array()),
            DeviceProfile::Extended => {
                slots[..3].copy_from_slice(&color.to_array());
                slots[3] = AUX_FULL;
            }
        }
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves a configured device name.
///
/// `McCrypt` is the legacy name of the extended layout and is still accepted.
impl FromStr for DeviceProfile {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(DeviceProfile::Raw),
            "extended" | "McCrypt" => Ok(DeviceProfile::Extended),
            other => Err(FrameError::UnknownProfile(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names() {
        assert_eq!("raw".parse::<DeviceProfile>(), Ok(DeviceProfile::Raw));
        assert_eq!(
            "extended".parse::<DeviceProfile>(),
            Ok(DeviceProfile::Extended)
        );
        assert_eq!(
            "McCrypt".parse::<DeviceProfile>(),
            Ok(DeviceProfile::Extended)
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "dimmer".parse::<DeviceProfile>(),
            Err(FrameError::UnknownProfile("dimmer".to_string()))
        );
        assert!("RAW".parse::<DeviceProfile>().is_err());
    }

    #[test]
    fn geometry_per_profile() {
        assert_eq!(DeviceProfile::Raw.slots_per_fixture(), 3);
        assert_eq!(DeviceProfile::Extended.slots_per_fixture(), 4);
        assert_eq!(DeviceProfile::Raw.start_channel(), 1);
        assert_eq!(DeviceProfile::Extended.start_channel(), 1);
    }

    #[test]
    fn extended_fixture_appends_full_aux() {
        let mut slots = [0u8; 4];
        DeviceProfile::Extended.encode_fixture(ColorRgb::new(10, 20, 30), &mut slots);
        assert_eq!(slots, [10, 20, 30, 255]);
    }
}
