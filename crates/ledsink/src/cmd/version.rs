use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("ledsink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: ledsink");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build_target: {}",
        option_env!("LEDSINK_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "build_profile: {}",
        option_env!("LEDSINK_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "devices: {}",
        ledsink_device::DeviceRegistry::with_builtin()
            .names()
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "dmx: {} baud, break {}us, mark-after-break {}us",
        ledsink_device::DMX_BAUD_RATE,
        ledsink_device::BREAK_TIME.as_micros(),
        ledsink_device::MARK_AFTER_BREAK.as_micros()
    );

    Ok(SUCCESS)
}
