use ledsink_device::DeviceRegistry;
use serde::Serialize;

use crate::cmd::DevicesArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Serialize)]
struct DevicesOutput {
    devices: Vec<&'static str>,
}

pub fn run(_args: DevicesArgs, format: OutputFormat) -> CliResult<i32> {
    let devices: Vec<&'static str> = DeviceRegistry::with_builtin().names().collect();

    match format {
        OutputFormat::Json => print_json(&DevicesOutput { devices }),
        OutputFormat::Table => print_table(&["TYPE"], devices.iter().map(|name| vec![*name])),
        OutputFormat::Pretty => {
            for name in devices {
                println!("{name}");
            }
        }
    }
    Ok(SUCCESS)
}
