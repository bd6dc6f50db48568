//! DMX512 over a serial line.
//!
//! One universe per device. Each frame is sent as:
//!
//! ```text
//! ──┐ BREAK  ┌ MAB ┬──────┬──────┬─────┬──────┬──
//!   └────────┘     │ 0x00 │ slot │ ... │ slot │
//!    >=176 us  12us  start   1..=512 data slots
//! ```
//!
//! Break and mark-after-break are timed with a [`PreciseDelay`]; the line
//! itself runs at 250 kbit/s, 8N2.

use std::time::Duration;

use ledsink_frame::{ChannelBuffer, ColorRgb, DeviceProfile, UniverseLayout};
use ledsink_transport::{
    LineSettings, PreciseDelay, SerialLine, SerialPortLine, SpinDelay, StopBits,
};
use tracing::{debug, error, info, trace};

use crate::config::{self, DmxConfig};
use crate::device::{DeviceState, LedDevice};
use crate::error::{DeviceError, Result};

/// DMX512 line rate in bits per second.
pub const DMX_BAUD_RATE: u32 = 250_000;

/// Break duration asserted before every packet.
pub const BREAK_TIME: Duration = Duration::from_micros(176);

/// Mark-after-break guard between releasing the break and the start code.
pub const MARK_AFTER_BREAK: Duration = Duration::from_micros(12);

const DEVICE_TYPE: &str = "dmx";

/// DMX512 output device.
///
/// Generic over the serial line and the delay so tests and unusual hosts can
/// substitute either; the defaults drive a real port with spin-timed breaks.
pub struct DmxDevice<L: SerialLine = SerialPortLine, D: PreciseDelay = SpinDelay> {
    line: L,
    delay: D,
    config: Option<serde_json::Value>,
    buffer: Option<ChannelBuffer>,
    state: DeviceState,
}

impl DmxDevice {
    /// Create an unconfigured device on a real serial port.
    pub fn new() -> Self {
        Self::with_parts(
            SerialPortLine::new(LineSettings::new("", DMX_BAUD_RATE)),
            SpinDelay,
        )
    }

    /// Registry constructor: build and `init` from `config`.
    pub fn construct(config: &serde_json::Value) -> Result<Box<dyn LedDevice>> {
        let mut device = Self::new();
        device.init(config)?;
        Ok(Box::new(device))
    }
}

impl Default for DmxDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: SerialLine, D: PreciseDelay> DmxDevice<L, D> {
    /// Create an unconfigured device on an explicit line and delay.
    pub fn with_parts(line: L, delay: D) -> Self {
        Self {
            line,
            delay,
            config: None,
            buffer: None,
            state: DeviceState::Uninitialized,
        }
    }

    /// The serial line.
    pub fn line(&self) -> &L {
        &self.line
    }

    /// The packet buffer, once `init` has succeeded.
    pub fn buffer(&self) -> Option<&ChannelBuffer> {
        self.buffer.as_ref()
    }

    fn fail(&mut self, err: DeviceError) -> DeviceError {
        error!(port = %self.line.port(), error = %err, "dmx device in error");
        self.state = DeviceState::InError;
        err
    }

    fn configure(&mut self, config: &serde_json::Value) -> Result<()> {
        let cfg: DmxConfig = config::parse(DEVICE_TYPE, config)?;
        let profile: DeviceProfile = cfg
            .dmx_device
            .parse()
            .map_err(|err: ledsink_frame::FrameError| DeviceError::Config(err.to_string()))?;

        let layout = UniverseLayout::new(profile, cfg.led_count);
        debug!(
            profile = %profile,
            start = profile.start_channel(),
            slots_per_fixture = profile.slots_per_fixture(),
            led_count = cfg.led_count,
            fixture_count = layout.fixture_count,
            buffer_len = layout.buffer_len,
            "dmx universe layout"
        );

        self.line.configure(
            LineSettings::new(cfg.output, cfg.rate).with_stop_bits(StopBits::Two),
        )?;

        if self.buffer.as_ref().map(ChannelBuffer::layout) != Some(&layout) {
            self.buffer = Some(ChannelBuffer::new(layout));
        }
        Ok(())
    }
}

/// Break, then mark-after-break. Line control failures only degrade timing.
fn send_reset<L: SerialLine, D: PreciseDelay>(line: &mut L, delay: &mut D) {
    if let Err(err) = line.set_break(true) {
        debug!(error = %err, "break assert failed");
    }
    delay.delay(BREAK_TIME);
    if let Err(err) = line.set_break(false) {
        debug!(error = %err, "break release failed");
    }
    delay.delay(MARK_AFTER_BREAK);
}

impl<L: SerialLine, D: PreciseDelay> LedDevice for DmxDevice<L, D> {
    fn device_type(&self) -> &'static str {
        DEVICE_TYPE
    }

    fn init(&mut self, config: &serde_json::Value) -> Result<()> {
        self.config = Some(config.clone());
        if let Err(err) = self.configure(config) {
            return Err(self.fail(err));
        }

        self.state = if self.state == DeviceState::Ready && self.line.is_open() {
            DeviceState::Ready
        } else {
            DeviceState::Uninitialized
        };
        Ok(())
    }

    fn open(&mut self) -> Result<()> {
        let config = match self.config.clone() {
            Some(config) => config,
            None => {
                let err = DeviceError::Config("dmx: device has no configuration".to_string());
                return Err(self.fail(err));
            }
        };
        self.init(&config)?;

        if !self.line.is_open() {
            if let Err(err) = self.line.open() {
                return Err(self.fail(err.into()));
            }
        }

        self.state = DeviceState::Ready;
        info!(port = %self.line.port(), "dmx device ready");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.line.is_open() {
            debug!(port = %self.line.port(), "closing dmx device");
            self.line.close()?;
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
        let buffer = self
            .buffer
            .as_mut()
            .ok_or(DeviceError::NotReady(self.state))?;

        buffer.encode(colors)?;
        send_reset(&mut self.line, &mut self.delay);

        match self.line.write_bytes(buffer.as_bytes()) {
            Ok(written) => {
                trace!(bytes = written, "dmx packet sent");
                Ok(())
            }
            Err(err) => Err(self.fail(err.into())),
        }
    }

    fn state(&self) -> DeviceState {
        self.state
    }

    fn led_count(&self) -> usize {
        self.buffer
            .as_ref()
            .map_or(0, |buffer| buffer.layout().fixture_count)
    }

    fn layout(&self) -> Option<UniverseLayout> {
        self.buffer.as_ref().map(|buffer| *buffer.layout())
    }
}

impl<L: SerialLine, D: PreciseDelay> Drop for DmxDevice<L, D> {
    fn drop(&mut self) {
        if self.line.is_open() {
            let _ = self.line.close();
        }
    }
}
