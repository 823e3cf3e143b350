use std::fmt;
use std::io;

use navprims_packet::PacketError;
use navprims_stream::StreamError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
/// Misconfiguration the operator must fix (bad baud rate, missing input).
pub const CONFIG: i32 = 78;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::BrokenPipe => FAILURE,
        io::ErrorKind::InvalidData => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn stream_error(context: &str, err: StreamError) -> CliError {
    if err.is_configuration() {
        return CliError::new(CONFIG, format!("{context}: {err}"));
    }
    match err {
        StreamError::Io(source) => io_error(context, source),
        other => CliError::new(FAILURE, format!("{context}: {other}")),
    }
}

pub fn packet_error(context: &str, err: PacketError) -> CliError {
    match err {
        PacketError::Io(source) => io_error(context, source),
        PacketError::InvalidMarker { .. } | PacketError::Truncated { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn configuration_errors_map_to_config() {
        let err = stream_error(
            "cannot open input",
            StreamError::UnsupportedBaudRate {
                device: "/dev/ttyUSB0".to_string(),
                requested: 12345,
                actual: None,
            },
        );
        assert_eq!(err.code, CONFIG);
        assert!(err.message.contains("unsupported baud rate 12345"));

        let err = stream_error(
            "cannot open input",
            StreamError::InputNotFound {
                path: PathBuf::from("missing.csv"),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
        );
        assert_eq!(err.code, CONFIG);
    }

    #[test]
    fn channel_permission_problem_maps_to_permission_denied() {
        let err = stream_error(
            "write failed",
            StreamError::Io(io::Error::from(io::ErrorKind::PermissionDenied)),
        );
        assert_eq!(err.code, PERMISSION_DENIED);
    }

    #[test]
    fn malformed_packets_are_data_errors() {
        let err = packet_error(
            "decode failed",
            PacketError::Truncated { len: 3, need: 32 },
        );
        assert_eq!(err.code, DATA_INVALID);
    }
}
