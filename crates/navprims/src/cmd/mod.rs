use clap::{ArgAction, Args, Subcommand, ValueEnum};
use navprims::window::GpsTime;
use navprims_stream::Direction;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod convert;
pub mod decode;
pub mod resolve;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert text navigation records into N0 packets or CSV lines.
    Convert(ConvertArgs),
    /// Decode N0 packets and print them.
    Decode(DecodeArgs),
    /// Resolve specifiers against one channel pool and report the result.
    Resolve(ResolveArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Convert(args) => convert::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::Resolve(args) => resolve::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input specifier: file path, `-` for stdin, or serial device[:baud].
    pub input: String,
    /// Output specifier: file path, `-` for stdout, or serial device[:baud].
    #[arg(long, default_value = "-")]
    pub out: String,
    /// Emit binary N0 packets instead of CSV lines (on/off).
    #[arg(
        long = "out-n-packet",
        value_name = "SWITCH",
        value_parser = parse_switch,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "off",
        default_missing_value = "on"
    )]
    pub n_packet: bool,
    /// Write the CSV column header (on/off). Ignored for N0 output.
    #[arg(
        long,
        value_name = "SWITCH",
        value_parser = parse_switch,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "on",
        default_missing_value = "on"
    )]
    pub header: bool,
    /// Skip records before this GPS time (TOW or WN:TOW).
    #[arg(long, value_name = "GPST")]
    pub start_gpst: Option<GpsTime>,
    /// Skip records after this GPS time (TOW or WN:TOW).
    #[arg(long, value_name = "GPST")]
    pub end_gpst: Option<GpsTime>,
    /// Treat both specifiers as plain file paths.
    #[arg(long)]
    pub force_file: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input specifier: file path, `-` for stdin, or serial device[:baud].
    pub input: String,
    /// Stop after N packets.
    #[arg(long)]
    pub count: Option<usize>,
    /// Treat the specifier as a plain file path.
    #[arg(long)]
    pub force_file: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    In,
    Out,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::In => Direction::Input,
            DirectionArg::Out => Direction::Output,
        }
    }
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Specifiers to resolve, in order.
    #[arg(required = true)]
    pub specs: Vec<String>,
    /// Direction to resolve for. `out` creates (and truncates) files.
    #[arg(long, value_enum, default_value = "in")]
    pub direction: DirectionArg,
    /// Treat every specifier as a plain file path.
    #[arg(long)]
    pub force_file: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// `on`/`true` and `off`/`false`, case-insensitive.
pub fn parse_switch(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        other => Err(format!("expected on/off, got {other:?}")),
    }
}
