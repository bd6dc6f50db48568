use std::time::Duration;

use crate::error::Result;

/// Number of stop bits framing each byte on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopBits {
    #[default]
    One,
    Two,
}

impl From<StopBits> for serialport::StopBits {
    fn from(value: StopBits) -> Self {
        match value {
            StopBits::One => serialport::StopBits::One,
            StopBits::Two => serialport::StopBits::Two,
        }
    }
}

/// Line parameters for a serial port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSettings {
    /// Port identifier (`/dev/ttyUSB0`, `COM3`, ...).
    pub port: String,
    /// Baud rate in bits per second.
    pub baud_rate: u32,
    /// Stop bits per byte.
    pub stop_bits: StopBits,
    /// Upper bound for a single blocking write.
    pub write_timeout: Duration,
}

impl LineSettings {
    /// Default write timeout for blocking writes.
    pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_millis(500);

    /// Settings with one stop bit and the default write timeout.
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
            stop_bits: StopBits::One,
            write_timeout: Self::DEFAULT_WRITE_TIMEOUT,
        }
    }

    /// Override the stop bits.
    pub fn with_stop_bits(mut self, stop_bits: StopBits) -> Self {
        self.stop_bits = stop_bits;
        self
    }
}

/// A serial line an output device writes its byte stream to.
///
/// Implementations own the underlying handle. `configure` may be called
/// before or after `open`; settings take effect on the open handle
/// immediately when possible.
pub trait SerialLine: Send {
    /// Store (and apply, if open) the line parameters.
    fn configure(&mut self, settings: LineSettings) -> Result<()>;

    /// Open the port for writing. Opening an already open line is a no-op.
    fn open(&mut self) -> Result<()>;

    /// Close the port. Closing a closed line is a no-op.
    fn close(&mut self) -> Result<()>;

    /// Returns whether the port is open.
    fn is_open(&self) -> bool;

    /// Assert (`true`) or release (`false`) a break condition on the line.
    fn set_break(&mut self, enabled: bool) -> Result<()>;

    /// Write the whole buffer as one contiguous transfer.
    ///
    /// Returns the number of bytes written, which equals `data.len()` on
    /// success.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize>;

    /// The configured port identifier.
    fn port(&self) -> &str;
}
