use std::fmt;
use std::io;

use ledsink_device::DeviceError;
use ledsink_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const CONFIG: i32 = 78;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

fn code_for_io_kind(kind: io::ErrorKind, fallback: i32) -> i32 {
    match kind {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        _ => fallback,
    }
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    let code = err
        .io_kind()
        .map_or(TRANSPORT_ERROR, |kind| code_for_io_kind(kind, TRANSPORT_ERROR));
    CliError::new(code, format!("{context}: {err}"))
}

pub fn device_error(context: &str, err: DeviceError) -> CliError {
    match err {
        DeviceError::Transport(err) => transport_error(context, err),
        DeviceError::Io { ref source, .. } => CliError::new(
            code_for_io_kind(source.kind(), FAILURE),
            format!("{context}: {err}"),
        ),
        DeviceError::Config(_) | DeviceError::UnknownDeviceType(_) => {
            CliError::new(CONFIG, format!("{context}: {err}"))
        }
        DeviceError::Frame(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        DeviceError::NotReady(_) => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}
