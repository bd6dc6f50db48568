use ledsink_device::{DeviceState, UniverseLayout};
use serde::Serialize;

use crate::cmd::{create_device, InfoArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Serialize)]
struct InfoOutput {
    device_type: &'static str,
    state: DeviceState,
    led_count: usize,
    layout: Option<LayoutOutput>,
}

#[derive(Serialize)]
struct LayoutOutput {
    profile: String,
    start_channel: usize,
    slots_per_fixture: usize,
    requested: usize,
    fixture_count: usize,
    buffer_len: usize,
    truncated: bool,
}

impl From<UniverseLayout> for LayoutOutput {
    fn from(layout: UniverseLayout) -> Self {
        Self {
            profile: layout.profile.to_string(),
            start_channel: layout.profile.start_channel(),
            slots_per_fixture: layout.slots_per_fixture(),
            requested: layout.requested,
            fixture_count: layout.fixture_count,
            buffer_len: layout.buffer_len,
            truncated: layout.is_truncated(),
        }
    }
}

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let device = create_device(&args.device)?;

    let out = InfoOutput {
        device_type: device.device_type(),
        state: device.state(),
        led_count: device.led_count(),
        layout: device.layout().map(LayoutOutput::from),
    };

    print_info(&out, format);
    Ok(SUCCESS)
}

fn print_info(out: &InfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut rows = vec![
                vec!["device".to_string(), out.device_type.to_string()],
                vec!["state".to_string(), out.state.to_string()],
                vec!["leds".to_string(), out.led_count.to_string()],
            ];
            if let Some(layout) = &out.layout {
                rows.extend([
                    vec!["profile".to_string(), layout.profile.clone()],
                    vec!["start channel".to_string(), layout.start_channel.to_string()],
                    vec![
                        "slots/fixture".to_string(),
                        layout.slots_per_fixture.to_string(),
                    ],
                    vec![
                        "fixtures".to_string(),
                        format!("{} of {}", layout.fixture_count, layout.requested),
                    ],
                    vec!["packet bytes".to_string(), layout.buffer_len.to_string()],
                ]);
            }
            print_table(&["FIELD", "VALUE"], rows);
        }
        OutputFormat::Pretty => {
            println!("Device Info:");
            println!("  Type:             {}", out.device_type);
            println!("  State:            {}", out.state);
            println!("  LEDs:             {}", out.led_count);
            if let Some(layout) = &out.layout {
                println!("  Profile:          {}", layout.profile);
                println!(
                    "  Slots:            {} per fixture from channel {}",
                    layout.slots_per_fixture, layout.start_channel
                );
                println!(
                    "  Fixtures:         {} of {} requested{}",
                    layout.fixture_count,
                    layout.requested,
                    if layout.truncated { " (universe full)" } else { "" }
                );
                println!("  Packet:           {} bytes", layout.buffer_len);
            }
        }
    }
}
