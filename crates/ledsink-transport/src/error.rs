/// Errors that can occur in serial transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the serial port.
    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        source: serialport::Error,
    },

    /// Failed to change line parameters or the break condition.
    #[error("line control failed on {port}: {source}")]
    Line {
        port: String,
        source: serialport::Error,
    },

    /// An I/O error occurred while writing to the port.
    #[error("write to {port} failed: {source}")]
    Write {
        port: String,
        source: std::io::Error,
    },

    /// The port stopped accepting bytes before the whole buffer was written.
    #[error("short write to {port} ({written} of {expected} bytes)")]
    ShortWrite {
        port: String,
        written: usize,
        expected: usize,
    },

    /// The operation requires an open port.
    #[error("{port} is not open")]
    NotOpen { port: String },
}

impl TransportError {
    /// The port identifier the error refers to.
    pub fn port(&self) -> &str {
        match self {
            TransportError::Open { port, .. }
            | TransportError::Line { port, .. }
            | TransportError::Write { port, .. }
            | TransportError::ShortWrite { port, .. }
            | TransportError::NotOpen { port } => port,
        }
    }

    /// Underlying I/O error kind, when the platform reported one.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            TransportError::Open { source, .. } | TransportError::Line { source, .. } => {
                match source.kind() {
                    serialport::ErrorKind::Io(kind) => Some(kind),
                    _ => None,
                }
            }
            TransportError::Write { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
