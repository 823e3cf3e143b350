use std::io::{BufRead, BufReader};

use navprims::records::parse_record;
use navprims::window::TimeWindow;
use navprims_packet::{Encoding, PacketWriter};
use navprims_stream::{ChannelPool, Direction, Resolver};
use tracing::{debug, info};

use crate::cmd::ConvertArgs;
use crate::exit::{io_error, packet_error, stream_error, CliError, CliResult, DATA_INVALID, SUCCESS};

pub fn run(args: ConvertArgs) -> CliResult<i32> {
    let mut pool = ChannelPool::new();
    let mut resolver = Resolver::new();

    let input = resolver
        .resolve(&mut pool, &args.input, Direction::Input, args.force_file)
        .map_err(|err| stream_error("cannot open input", err))?;
    let output = resolver
        .resolve(&mut pool, &args.out, Direction::Output, args.force_file)
        .map_err(|err| stream_error("cannot open output", err))?;
    info!(input = %input.label(), output = %output.label(), "converting");

    let window = TimeWindow::new(args.start_gpst, args.end_gpst);
    let encoding = if args.n_packet {
        Encoding::NPacket
    } else {
        Encoding::Csv
    };
    let mut writer = PacketWriter::new(output, encoding);
    if args.header {
        writer
            .write_header()
            .map_err(|err| packet_error("write failed", err))?;
    }

    let mut skipped = 0u64;
    for (index, line) in BufReader::new(input).lines().enumerate() {
        let line = line.map_err(|err| io_error("read failed", err))?;
        let record = match parse_record(&line) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(err) => {
                return Err(CliError::new(
                    DATA_INVALID,
                    format!("{}:{}: {err}", args.input, index + 1),
                ))
            }
        };
        if !window.contains(record.time_of_week) {
            skipped += 1;
            continue;
        }
        writer
            .write_state(record.time_of_week, &record.state)
            .map_err(|err| packet_error("write failed", err))?;
    }

    writer
        .flush()
        .map_err(|err| packet_error("flush failed", err))?;
    let written = writer.written();
    drop(writer);

    debug!(pooled = pool.len(), "tearing down channel pool");
    pool.teardown()
        .map_err(|err| stream_error("teardown failed", err))?;

    info!(written, skipped, "conversion finished");
    Ok(SUCCESS)
}
