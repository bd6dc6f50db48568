use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use ledsink_device::{load_config, DeviceRegistry, LedDevice};
use ledsink_frame::ColorRgb;

use crate::exit::{device_error, CliResult};
use crate::output::OutputFormat;

pub mod devices;
pub mod info;
pub mod run;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered device types.
    Devices(DevicesArgs),
    /// Initialize a device and print its universe layout.
    Info(InfoArgs),
    /// Open a device, write one frame and close it.
    Send(SendArgs),
    /// Drive frames at a fixed rate until interrupted.
    Run(RunArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Devices(args) => devices::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::Send(args) => send::run(args, format),
        Command::Run(args) => run::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// Device configuration file (JSON object with a "type" key).
    pub config: PathBuf,
    /// Override the configured LED count.
    #[arg(long)]
    pub led_count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Fill every fixture with one color (R,G,B).
    #[arg(long, conflicts_with = "colors")]
    pub color: Option<ColorRgb>,
    /// Per-fixture colors (R,G,B;R,G,B;...). Missing fixtures are black.
    #[arg(long, value_delimiter = ';')]
    pub colors: Option<Vec<ColorRgb>>,
}

impl FrameArgs {
    /// Build a frame covering at least `led_count` fixtures.
    pub fn frame(&self, led_count: usize) -> Vec<ColorRgb> {
        match (&self.color, &self.colors) {
            (Some(color), _) => vec![*color; led_count],
            (None, Some(colors)) => {
                let mut frame = colors.clone();
                if frame.len() < led_count {
                    frame.resize(led_count, ColorRgb::BLACK);
                }
                frame
            }
            (None, None) => vec![ColorRgb::BLACK; led_count],
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct DevicesArgs {}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    #[command(flatten)]
    pub frame: FrameArgs,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    #[command(flatten)]
    pub frame: FrameArgs,
    /// Frames per second.
    #[arg(long, default_value = "40", value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub fps: u32,
    /// Stop after N frames.
    #[arg(long)]
    pub frames: Option<u64>,
    /// Shift the frame by one fixture every frame.
    #[arg(long)]
    pub chase: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Load a device config, apply overrides and build the device through the registry.
pub fn create_device(args: &DeviceArgs) -> CliResult<Box<dyn LedDevice>> {
    let config = device_config(&args.config, args.led_count)?;
    DeviceRegistry::with_builtin()
        .create(&config)
        .map_err(|err| device_error("device init failed", err))
}

fn device_config(path: &Path, led_count: Option<usize>) -> CliResult<serde_json::Value> {
    let mut config = load_config(path).map_err(|err| device_error("config load failed", err))?;
    if let (Some(count), Some(object)) = (led_count, config.as_object_mut()) {
        object.insert("ledCount".to_string(), serde_json::Value::from(count));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_args(color: Option<ColorRgb>, colors: Option<Vec<ColorRgb>>) -> FrameArgs {
        FrameArgs { color, colors }
    }

    #[test]
    fn single_color_fills_every_fixture() {
        let frame = frame_args(Some(ColorRgb::RED), None).frame(3);
        assert_eq!(frame, vec![ColorRgb::RED; 3]);
    }

    #[test]
    fn short_color_list_is_padded_black() {
        let frame = frame_args(None, Some(vec![ColorRgb::GREEN])).frame(3);
        assert_eq!(
            frame,
            vec![ColorRgb::GREEN, ColorRgb::BLACK, ColorRgb::BLACK]
        );
    }

    #[test]
    fn long_color_list_is_kept() {
        let frame = frame_args(None, Some(vec![ColorRgb::BLUE; 4])).frame(2);
        assert_eq!(frame.len(), 4);
    }

    #[test]
    fn no_colors_is_blackout() {
        assert_eq!(frame_args(None, None).frame(2), vec![ColorRgb::BLACK; 2]);
    }

    #[test]
    fn led_count_override_is_applied() {
        let dir = std::env::temp_dir().join(format!("ledsink-cli-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dev.json");
        std::fs::write(&path, r#"{"type":"file","ledCount":1}"#).unwrap();

        let config = device_config(&path, Some(9)).unwrap();
        assert_eq!(config["ledCount"], 9);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
