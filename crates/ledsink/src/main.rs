mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ledsink", version, about = "LED output backends CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true, env = "LEDSINK_LOG")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_send_with_single_color() {
        let cli = Cli::try_parse_from([
            "ledsink",
            "send",
            "/tmp/dmx.json",
            "--color",
            "255,0,0",
        ])
        .expect("send args should parse");

        match cli.command {
            Command::Send(args) => {
                assert_eq!(args.frame.color, Some(ledsink_frame::ColorRgb::RED));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_color_list() {
        let cli = Cli::try_parse_from([
            "ledsink",
            "send",
            "/tmp/dmx.json",
            "--colors",
            "1,2,3;4,5,6",
        ])
        .expect("color list should parse");

        match cli.command {
            Command::Send(args) => assert_eq!(args.frame.colors.map(|c| c.len()), Some(2)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_conflicting_color_args() {
        let err = Cli::try_parse_from([
            "ledsink",
            "send",
            "/tmp/dmx.json",
            "--color",
            "1,2,3",
            "--colors",
            "4,5,6",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn rejects_bad_color() {
        let err = Cli::try_parse_from(["ledsink", "send", "/tmp/dmx.json", "--color", "1,2"])
            .expect_err("bad color should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn parses_run_with_rate_and_count() {
        let cli = Cli::try_parse_from([
            "ledsink",
            "run",
            "/tmp/dmx.json",
            "--fps",
            "30",
            "--frames",
            "5",
            "--chase",
        ])
        .expect("run args should parse");

        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.fps, 30);
                assert_eq!(args.frames, Some(5));
                assert!(args.chase);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_fps() {
        assert!(Cli::try_parse_from(["ledsink", "run", "/tmp/dmx.json", "--fps", "0"]).is_err());
    }
}
