use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use ledsink_frame::ColorRgb;
use tracing::{debug, error};

use crate::config::{self, FileConfig};
use crate::device::{DeviceState, LedDevice};
use crate::error::{DeviceError, Result};

const DEVICE_TYPE: &str = "file";

/// Writes every frame as one line of text.
///
/// ```text
/// 2024-05-01T20:15:03.120 | +  25 [{255,0,0}{0,255,0}]
/// ```
///
/// The timestamp prefix is only written with `printTimeStamp`.
pub struct FileDevice {
    config: Option<serde_json::Value>,
    path: PathBuf,
    print_time_stamp: bool,
    led_count: usize,
    file: Option<BufWriter<File>>,
    last_write: DateTime<Local>,
    state: DeviceState,
}

impl FileDevice {
    pub fn new() -> Self {
        Self {
            config: None,
            path: PathBuf::from("/dev/null"),
            print_time_stamp: false,
            led_count: 0,
            file: None,
            last_write: Local::now(),
            state: DeviceState::Uninitialized,
        }
    }

    /// Registry constructor: build and `init` from `config`.
    pub fn construct(config: &serde_json::Value) -> Result<Box<dyn LedDevice>> {
        let mut device = Self::new();
        device.init(config)?;
        Ok(Box::new(device))
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> DeviceError {
        DeviceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn fail(&mut self, err: DeviceError) -> DeviceError {
        error!(path = %self.path.display(), error = %err, "file device in error");
        self.state = DeviceState::InError;
        err
    }

    fn write_line(&mut self, colors: &[ColorRgb]) -> std::io::Result<()> {
        let Some(out) = self.file.as_mut() else {
            return Err(std::io::Error::from(std::io::ErrorKind::NotConnected));
        };

        if self.print_time_stamp {
            let now = Local::now();
            let elapsed_ms = (now - self.last_write).num_milliseconds();
            write!(
                out,
                "{} | +{:>4}",
                now.format("%Y-%m-%dT%H:%M:%S%.3f"),
                elapsed_ms
            )?;
            self.last_write = now;
        }

        out.write_all(b" [")?;
        for color in colors {
            write!(out, "{color}")?;
        }
        out.write_all(b"]\n")?;
        out.flush()
    }
}

impl Default for FileDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl LedDevice for FileDevice {
    fn device_type(&self) -> &'static str {
        DEVICE_TYPE
    }

    fn init(&mut self, config: &serde_json::Value) -> Result<()> {
        self.config = Some(config.clone());
        let cfg: FileConfig = match config::parse(DEVICE_TYPE, config) {
            Ok(cfg) => cfg,
            Err(err) => return Err(self.fail(err)),
        };

        if cfg.output != self.path && self.file.is_some() {
            debug!(old = %self.path.display(), "output path changed; closing old file");
            self.close()?;
        }

        self.path = cfg.output;
        self.print_time_stamp = cfg.print_time_stamp;
        self.led_count = cfg.led_count;
        if self.state == DeviceState::InError {
            self.state = DeviceState::Uninitialized;
        }
        Ok(())
    }

    fn open(&mut self) -> Result<()> {
        let Some(config) = self.config.clone() else {
            let err = DeviceError::Config("file: device has no configuration".to_string());
            return Err(self.fail(err));
        };
        self.init(&config)?;

        if self.file.is_none() {
            debug!(path = %self.path.display(), "opening output file");
            match File::create(&self.path) {
                Ok(file) => self.file = Some(BufWriter::new(file)),
                Err(source) => {
                    let err = self.io_error(source);
                    return Err(self.fail(err));
                }
            }
        }

        self.last_write = Local::now();
        self.state = DeviceState::Ready;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            debug!(path = %self.path.display(), "closing output file");
            file.flush().map_err(|source| self.io_error(source))?;
        }
        if self.state == DeviceState::Ready {
            self.state = DeviceState::Uninitialized;
        }
        Ok(())
    }

    fn write(&mut self, colors: &[ColorRgb]) -> Result<()> {
        if self.state != DeviceState::Ready {
            return Err(DeviceError::NotReady(self.state));
        }
        match self.write_line(colors) {
            Ok(()) => Ok(()),
            Err(source) => {
                let err = self.io_error(source);
                Err(self.fail(err))
            }
        }
    }

    fn state(&self) -> DeviceState {
        self.state
    }

    fn led_count(&self) -> usize {
        self.led_count
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn scratch(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ledsink-file-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir
    }

    #[test]
    fn writes_one_line_per_frame() {
        let dir = scratch("plain");
        let out = dir.join("leds.txt");
        let mut dev = FileDevice::new();
        dev.init(&json!({ "type": "file", "output": out, "ledCount": 2 }))
            .unwrap();
        dev.open().unwrap();

        dev.write(&[ColorRgb::new(1, 2, 3), ColorRgb::new(4, 5, 6)])
            .unwrap();
        dev.write(&[ColorRgb::BLACK]).unwrap();
        dev.close().unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text, " [{1,2,3}{4,5,6}]\n [{0,0,0}]\n");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn timestamp_prefix() {
        let dir = scratch("ts");
        let out = dir.join("leds.txt");
        let mut dev = FileDevice::new();
        dev.init(&json!({ "output": out, "printTimeStamp": true }))
            .unwrap();
        dev.open().unwrap();
        dev.write(&[ColorRgb::WHITE]).unwrap();
        dev.close().unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let (stamp, rest) = text.split_once(" | +").expect("timestamp separator");
        assert_eq!(stamp.len(), "2024-05-01T20:15:03.120".len());
        assert!(stamp.contains('T'));
        assert!(rest.ends_with(" [{255,255,255}]\n"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn open_failure_reports_path() {
        let mut dev = FileDevice::new();
        dev.init(&json!({ "output": "/nonexistent/dir/leds.txt" }))
            .unwrap();

        let err = dev.open().unwrap_err();
        assert!(matches!(err, DeviceError::Io { ref path, .. } if path.ends_with("leds.txt")));
        assert_eq!(dev.state(), DeviceState::InError);
        assert!(dev.write(&[]).is_err());
    }

    #[test]
    fn write_requires_open() {
        let mut dev = FileDevice::new();
        dev.init(&json!({})).unwrap();
        assert!(matches!(
            dev.write(&[ColorRgb::WHITE]),
            Err(DeviceError::NotReady(DeviceState::Uninitialized))
        ));
    }

    #[test]
    fn close_twice_is_noop() {
        let dir = scratch("close");
        let mut dev = FileDevice::new();
        dev.init(&json!({ "output": dir.join("x.txt") })).unwrap();
        dev.open().unwrap();
        dev.close().unwrap();
        dev.close().unwrap();
        assert_eq!(dev.state(), DeviceState::Uninitialized);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
