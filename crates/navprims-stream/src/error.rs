use std::path::PathBuf;

/// Errors that can occur while resolving specifiers into channels.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The specifier text was empty.
    #[error("empty stream specifier")]
    EmptySpecifier,

    /// An input file could not be opened.
    #[error("{path}: file not found: {source}")]
    InputNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The serial device could not be opened.
    #[error("{device}: cannot open serial device: {source}")]
    SerialOpen {
        device: String,
        source: serialport::Error,
    },

    /// The baud-rate suffix is not a number.
    #[error("{device}: invalid baud rate {value:?}")]
    InvalidBaudRate { device: String, value: String },

    /// The device rejected the requested baud rate.
    #[error("{device}: unsupported baud rate {requested}")]
    UnsupportedBaudRate {
        device: String,
        requested: u32,
        actual: Option<u32>,
    },

    /// An I/O error occurred on an open channel.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StreamError {
    /// True for misconfigurations the operator has to fix (bad baud rate, missing input).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            StreamError::EmptySpecifier
                | StreamError::InputNotFound { .. }
                | StreamError::InvalidBaudRate { .. }
                | StreamError::UnsupportedBaudRate { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;
