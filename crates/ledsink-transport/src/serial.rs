use std::io::{ErrorKind, Write};

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::traits::{LineSettings, SerialLine};

/// Serial line backed by the `serialport` crate.
///
/// Opens the port 8N1/8N2 without flow control. The handle is released on
/// `close` and on drop.
pub struct SerialPortLine {
    settings: LineSettings,
    handle: Option<Box<dyn serialport::SerialPort>>,
}

impl SerialPortLine {
    /// Create a closed line with the given settings.
    pub fn new(settings: LineSettings) -> Self {
        Self {
            settings,
            handle: None,
        }
    }

    /// Current line settings.
    pub fn settings(&self) -> &LineSettings {
        &self.settings
    }

    fn line_error(&self, source: serialport::Error) -> TransportError {
        TransportError::Line {
            port: self.settings.port.clone(),
            source,
        }
    }

    fn not_open(&self) -> TransportError {
        TransportError::NotOpen {
            port: self.settings.port.clone(),
        }
    }
}

impl SerialLine for SerialPortLine {
    fn configure(&mut self, settings: LineSettings) -> Result<()> {
        if settings.port != self.settings.port && self.handle.is_some() {
            debug!(old = %self.settings.port, new = %settings.port, "port changed; closing old handle");
            self.handle = None;
        }

        if let Some(handle) = self.handle.as_mut() {
            if let Err(source) = apply_settings(handle.as_mut(), &settings) {
                return Err(TransportError::Line {
                    port: settings.port,
                    source,
                });
            }
        }

        debug!(
            port = %settings.port,
            baud_rate = settings.baud_rate,
            stop_bits = ?settings.stop_bits,
            "line configured"
        );
        self.settings = settings;
        Ok(())
    }

    fn open(&mut self) -> Result<()> {
        if self.handle.is_some() {
            return Ok(());
        }

        let handle = serialport::new(self.settings.port.as_str(), self.settings.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(self.settings.stop_bits.into())
            .flow_control(serialport::FlowControl::None)
            .timeout(self.settings.write_timeout)
            .open()
            .map_err(|source| TransportError::Open {
                port: self.settings.port.clone(),
                source,
            })?;

        info!(
            port = %self.settings.port,
            baud_rate = self.settings.baud_rate,
            "serial port opened"
        );
        self.handle = Some(handle);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.handle.take().is_some() {
            info!(port = %self.settings.port, "serial port closed");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    fn set_break(&mut self, enabled: bool) -> Result<()> {
        let handle = self.handle.as_ref().ok_or_else(|| self.not_open())?;
        let result = if enabled {
            handle.set_break()
        } else {
            handle.clear_break()
        };
        result.map_err(|source| self.line_error(source))
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<usize> {
        let Some(handle) = self.handle.as_mut() else {
            return Err(TransportError::NotOpen {
                port: self.settings.port.clone(),
            });
        };

        let mut offset = 0usize;
        while offset < data.len() {
            match handle.write(&data[offset..]) {
                Ok(0) => {
                    return Err(TransportError::ShortWrite {
                        port: self.settings.port.clone(),
                        written: offset,
                        expected: data.len(),
                    })
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(TransportError::Write {
                        port: self.settings.port.clone(),
                        source,
                    })
                }
            }
        }

        loop {
            match handle.flush() {
                Ok(()) => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(TransportError::Write {
                        port: self.settings.port.clone(),
                        source,
                    })
                }
            }
        }

        Ok(offset)
    }

    fn port(&self) -> &str {
        &self.settings.port
    }
}

fn apply_settings(
    handle: &mut dyn serialport::SerialPort,
    settings: &LineSettings,
) -> serialport::Result<()> {
    handle.set_baud_rate(settings.baud_rate)?;
    handle.set_stop_bits(settings.stop_bits.into())?;
    handle.set_timeout(settings.write_timeout)
}

impl Drop for SerialPortLine {
    fn drop(&mut self) {
        if self.handle.take().is_some() {
            debug!(port = %self.settings.port, "releasing serial port on drop");
        }
    }
}

impl std::fmt::Debug for SerialPortLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialPortLine")
            .field("settings", &self.settings)
            .field("open", &self.handle.is_some())
            .finish()
    }
}
