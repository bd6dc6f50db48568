use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ledsink_frame::ColorRgb;
use serde::Serialize;
use tracing::{info, warn};

use crate::cmd::{create_device, RunArgs};
use crate::exit::{device_error, CliError, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct RunOutput {
    device_type: &'static str,
    frames: u64,
    elapsed_ms: u128,
    fps: u32,
}

pub fn run(args: RunArgs, format: OutputFormat) -> CliResult<i32> {
    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut device = create_device(&args.device)?;
    device
        .open()
        .map_err(|err| device_error("open failed", err))?;

    let mut frame = args.frame.frame(device.led_count());
    let period = Duration::from_secs(1) / args.fps;
    let started = Instant::now();
    let mut next_deadline = started;
    let mut sent = 0u64;

    info!(fps = args.fps, leds = device.led_count(), "driving frames");

    while running.load(Ordering::SeqCst) {
        if args.frames.is_some_and(|limit| sent >= limit) {
            break;
        }

        if let Err(err) = device.write(&frame) {
            let _ = device.close();
            return Err(device_error("write failed", err));
        }
        sent += 1;

        if args.chase {
            rotate(&mut frame, device.led_count());
        }

        next_deadline += period;
        let now = Instant::now();
        if next_deadline > now {
            std::thread::sleep(next_deadline - now);
        } else if now - next_deadline > period {
            warn!(behind_ms = (now - next_deadline).as_millis() as u64, "frame cadence slipped");
            next_deadline = now;
        }
    }

    device
        .close()
        .map_err(|err| device_error("close failed", err))?;

    let out = RunOutput {
        device_type: device.device_type(),
        frames: sent,
        elapsed_ms: started.elapsed().as_millis(),
        fps: args.fps,
    };
    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => println!(
            "sent {} frames to {} device in {} ms",
            out.frames, out.device_type, out.elapsed_ms
        ),
    }
    Ok(SUCCESS)
}

/// Shift the driven part of the frame one fixture towards the end.
fn rotate(frame: &mut [ColorRgb], led_count: usize) {
    let driven = led_count.min(frame.len());
    if driven > 1 {
        frame[..driven].rotate_right(1);
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
