//! Specifier classification.
//!
//! A specifier is one of:
//! - `-` for the process's standard input or output,
//! - a serial device name starting with [`SERIAL_PREFIX`], optionally followed by `:<baud>`,
//! - anything else, taken as a file path.

use std::fmt;
use std::path::Path;

use crate::error::{Result, StreamError};

/// Token naming the standard input/output streams.
pub const STANDARD_TOKEN: &str = "-";

/// Device-name prefix that marks a serial port.
#[cfg(windows)]
pub const SERIAL_PREFIX: &str = "COM";
/// Device-name prefix that marks a serial port.
#[cfg(not(windows))]
pub const SERIAL_PREFIX: &str = "/dev/tty";

/// Logical direction a specifier is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => f.write_str("input"),
            Direction::Output => f.write_str("output"),
        }
    }
}

/// A classified specifier, borrowing from the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier<'a> {
    /// Standard input or output.
    Standard,
    /// A serial device with an optional baud rate.
    Serial {
        device: &'a str,
        baud_rate: Option<u32>,
    },
    /// A filesystem path.
    File(&'a str),
}

impl<'a> Specifier<'a> {
    /// Classify `spec` using the platform [`SERIAL_PREFIX`].
    pub fn parse(spec: &'a str, force_file: bool) -> Result<Self> {
        Self::parse_with_prefix(spec, force_file, SERIAL_PREFIX)
    }

    /// Classify `spec` with an explicit serial-device prefix.
    ///
    /// With `force_file` set, the text is always treated as a path.
    pub fn parse_with_prefix(spec: &'a str, force_file: bool, serial_prefix: &str) -> Result<Self> {
        if spec.is_empty() {
            return Err(StreamError::EmptySpecifier);
        }
        if force_file {
            return Ok(Specifier::File(spec));
        }
        if spec == STANDARD_TOKEN {
            return Ok(Specifier::Standard);
        }
        if !serial_prefix.is_empty() && spec.starts_with(serial_prefix) {
            let (device, baud_rate) = match spec.split_once(':') {
                Some((device, baud)) => (device, Some(parse_baud_rate(device, baud)?)),
                None => (spec, None),
            };
            return Ok(Specifier::Serial { device, baud_rate });
        }
        Ok(Specifier::File(spec))
    }

    /// The pool key for this specifier, or `None` for the standard streams.
    pub fn pool_key(&self, direction: Direction) -> Option<PoolKey> {
        match self {
            Specifier::Standard => None,
            Specifier::Serial { device, .. } => Some(PoolKey::Serial(device.to_string())),
            Specifier::File(path) => Some(PoolKey::File {
                direction,
                path: path.to_string(),
            }),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Specifier::Standard => "standard",
            Specifier::Serial { .. } => "serial",
            Specifier::File(_) => "file",
        }
    }
}

fn parse_baud_rate(device: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| StreamError::InvalidBaudRate {
            device: device.to_string(),
            value: value.to_string(),
        })
}

/// Key under which a channel is held in the pool.
///
/// Serial devices are bidirectional and keyed by device name alone, so input and
/// output resolutions of one device share a channel. Files are keyed per direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PoolKey {
    Serial(String),
    File { direction: Direction, path: String },
}

impl PoolKey {
    pub fn name(&self) -> &str {
        match self {
            PoolKey::Serial(device) => device,
            PoolKey::File { path, .. } => path,
        }
    }

    pub fn path(&self) -> &Path {
        Path::new(self.name())
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolKey::Serial(device) => write!(f, "serial:{device}"),
            PoolKey::File { direction, path } => write!(f, "file:{direction}:{path}"),
        }
    }
}
