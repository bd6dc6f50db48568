//! Pluggable LED output backends.
//!
//! ledsink turns frames of RGB colors into device byte streams and pushes
//! them to a sink. The main backend drives a DMX512 universe over a serial
//! adapter, including the break / mark-after-break reset sequence.
//!
//! # Crate Structure
//!
//! - [`transport`]: Serial line with break control, precise delays
//! - [`frame`]: DMX universe layout and in-place color encoding
//! - [`device`]: Output devices (`dmx`, `file`) and the device registry

/// Re-export transport types.
pub mod transport {
    pub use ledsink_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use ledsink_frame::*;
}

/// Re-export device types.
pub mod device {
    pub use ledsink_device::*;
}
