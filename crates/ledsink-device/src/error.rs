use std::path::PathBuf;

use crate::device::DeviceState;

/// Errors that can occur in device operations.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Serial transport error.
    #[error("transport error: {0}")]
    Transport(#[from] ledsink_transport::TransportError),

    /// Frame encoding error.
    #[error("frame error: {0}")]
    Frame(#[from] ledsink_frame::FrameError),

    /// Invalid or incomplete device configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// No device is registered under this name.
    #[error("unknown device type: {0}")]
    UnknownDeviceType(String),

    /// The device is not open.
    #[error("device not ready ({0})")]
    NotReady(DeviceState),

    /// File sink I/O error.
    #[error("file error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DeviceError>;
