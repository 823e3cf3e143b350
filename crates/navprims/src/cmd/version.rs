use navprims_packet::N0_SIZE;
use navprims_stream::{DEFAULT_BAUD_RATE, SERIAL_PREFIX};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("navprims {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: navprims");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("NAVPRIMS_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "profile: {}",
        option_env!("NAVPRIMS_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!("serial_prefix: {SERIAL_PREFIX}");
    println!("default_baud_rate: {DEFAULT_BAUD_RATE}");
    println!("n0_packet_size: {N0_SIZE}");

    Ok(SUCCESS)
}
