//! Resolve an output specifier and write a few N0 packets to it.
//!
//! Run with:
//!   cargo run --example encode-to-file -- /tmp/track.n0
//!
//! Use `-` to write to stdout, or a serial device such as `/dev/ttyUSB0:115200`.

use navprims::packet::{Encoding, NavSnapshot, PacketWriter};
use navprims::stream::{ChannelPool, Resolver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spec = std::env::args().nth(1).unwrap_or_else(|| {
        std::env::temp_dir()
            .join("navprims-example.n0")
            .display()
            .to_string()
    });

    let mut pool = ChannelPool::new();
    let mut resolver = Resolver::new();
    let output = resolver.resolve_output(&mut pool, &spec)?;
    eprintln!("Writing to {}", output.label());

    let mut writer = PacketWriter::new(output, Encoding::NPacket);
    for step in 0..10 {
        let t = 345_600.0 + f64::from(step) * 0.1;
        let state = NavSnapshot::from_degrees(
            139.7 + f64::from(step) * 1e-6,
            35.6,
            40.0,
            [1.0, 0.5, 0.0],
            30.0,
            2.0,
            -1.0,
            30.0,
        );
        writer.write_state(t, &state)?;
    }
    writer.flush()?;
    eprintln!("Wrote {} packets", writer.written());

    drop(writer);
    pool.teardown()?;
    Ok(())
}
