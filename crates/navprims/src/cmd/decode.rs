use navprims_packet::PacketReader;
use navprims_stream::{ChannelPool, Direction, Resolver};
use tracing::info;

use crate::cmd::DecodeArgs;
use crate::exit::{packet_error, stream_error, CliResult, SUCCESS};
use crate::output::{print_packet, print_packet_table, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let mut pool = ChannelPool::new();
    let mut resolver = Resolver::new();
    let input = resolver
        .resolve(&mut pool, &args.input, Direction::Input, args.force_file)
        .map_err(|err| stream_error("cannot open input", err))?;

    let limit = args.count.unwrap_or(usize::MAX);
    let mut table_rows = Vec::new();
    let mut decoded = 0usize;
    for packet in PacketReader::new(input).take(limit) {
        let packet = packet.map_err(|err| packet_error("decode failed", err))?;
        decoded += 1;
        if format == OutputFormat::Table {
            table_rows.push(packet);
        } else {
            print_packet(&packet, format);
        }
    }
    if format == OutputFormat::Table {
        print_packet_table(&table_rows);
    }

    pool.teardown()
        .map_err(|err| stream_error("teardown failed", err))?;
    info!(decoded, "decode finished");
    Ok(SUCCESS)
}
