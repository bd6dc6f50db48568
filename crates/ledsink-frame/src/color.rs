use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// One pixel: 8-bit red, green and blue intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct ColorRgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorRgb {
    pub const BLACK: ColorRgb = ColorRgb::new(0, 0, 0);
    pub const WHITE: ColorRgb = ColorRgb::new(255, 255, 255);
    pub const RED: ColorRgb = ColorRgb::new(255, 0, 0);
    pub const GREEN: ColorRgb = ColorRgb::new(0, 255, 0);
    pub const BLUE: ColorRgb = ColorRgb::new(0, 0, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels in wire order.
    pub const fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl fmt::Display for ColorRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{},{}}}", self.red, self.green, self.blue)
    }
}

/// Parses `R,G,B` with decimal components.
impl FromStr for ColorRgb {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FrameError::InvalidColor(s.to_string());
        let parts: Vec<&str> = s.split(',').collect();
        let [red, green, blue] = parts.as_slice() else {
            return Err(invalid());
        };

        let channel = |p: &str| p.trim().parse::<u8>().map_err(|_| invalid());
        Ok(ColorRgb::new(channel(*red)?, channel(*green)?, channel(*blue)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_text_dump_format() {
        assert_eq!(ColorRgb::new(1, 2, 3).to_string(), "{1,2,3}");
    }

    #[test]
    fn parse_components() {
        assert_eq!(
            " 10, 20,30".parse::<ColorRgb>().unwrap(),
            ColorRgb::new(10, 20, 30)
        );
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!("1,2".parse::<ColorRgb>().is_err());
        assert!("1,2,3,4".parse::<ColorRgb>().is_err());
        assert!("1,2,256".parse::<ColorRgb>().is_err());
        assert!("red".parse::<ColorRgb>().is_err());
    }

    #[test]
    fn layout_is_three_packed_bytes() {
        assert_eq!(std::mem::size_of::<ColorRgb>(), 3);
        assert_eq!(ColorRgb::new(7, 8, 9).to_array(), [7, 8, 9]);
    }

    #[test]
    fn serializes_as_named_channels() {
        let json = serde_json::to_string(&ColorRgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, r#"{"red":1,"green":2,"blue":3}"#);
    }
}
