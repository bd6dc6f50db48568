//! Chase a single lit fixture across a DMX universe.
//!
//! Usage: `cargo run --example dmx-chase -- /dev/ttyUSB0 [raw|extended] [fixtures]`

use std::time::Duration;

use ledsink::device::{DmxDevice, LedDevice};
use ledsink::frame::ColorRgb;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let port = args.next().unwrap_or_else(|| "/dev/ttyUSB0".to_string());
    let profile = args.next().unwrap_or_else(|| "raw".to_string());
    let fixtures: usize = args.next().map_or(Ok(8), |n| n.parse())?;

    let mut device = DmxDevice::new();
    device.init(&serde_json::json!({
        "output": port,
        "dmxdevice": profile,
        "ledCount": fixtures,
    }))?;
    device.open()?;

    let count = device.led_count();
    let mut frame = vec![ColorRgb::BLACK; count];
    for step in 0..count * 4 {
        frame.fill(ColorRgb::BLACK);
        if count > 0 {
            frame[step % count] = ColorRgb::WHITE;
        }
        device.write(&frame)?;
        std::thread::sleep(Duration::from_millis(25));
    }

    device.write(&vec![ColorRgb::BLACK; count])?;
    device.close()?;
    Ok(())
}
