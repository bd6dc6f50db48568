use serde::Serialize;
use tracing::debug;

use crate::cmd::{create_device, SendArgs};
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct SendOutput {
    device_type: &'static str,
    led_count: usize,
    frames: u64,
}

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let mut device = create_device(&args.device)?;
    device
        .open()
        .map_err(|err| device_error("open failed", err))?;

    let frame = args.frame.frame(device.led_count());
    debug!(colors = frame.len(), "sending frame");
    let written = device.write(&frame);
    let closed = device.close();

    written.map_err(|err| device_error("write failed", err))?;
    closed.map_err(|err| device_error("close failed", err))?;

    let out = SendOutput {
        device_type: device.device_type(),
        led_count: device.led_count(),
        frames: 1,
    };
    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => println!(
            "sent 1 frame to {} device ({} leds)",
            out.device_type, out.led_count
        ),
    }
    Ok(SUCCESS)
}
