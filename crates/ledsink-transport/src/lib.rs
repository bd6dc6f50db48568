//! Serial line transport for LED output devices.
//!
//! Provides the line-level plumbing the device drivers build on:
//! - [`SerialLine`]: open/close, raw byte writes and break-signal control
//! - [`SerialPortLine`]: the `serialport`-backed implementation
//! - [`PreciseDelay`]: sub-millisecond waits for line timing (break, mark)
//!
//! This is the lowest layer of ledsink. Nothing here knows about colors or
//! DMX universes; it only moves bytes and toggles the line.

pub mod delay;
pub mod error;
pub mod serial;
pub mod traits;

pub use delay::{PreciseDelay, SleepDelay, SpinDelay};
pub use error::{Result, TransportError};
pub use serial::SerialPortLine;
pub use traits::{LineSettings, SerialLine, StopBits};
