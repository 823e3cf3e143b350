use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::Duration;

use serialport::SerialPort;
use tracing::{debug, warn};

use crate::channel::Channel;
use crate::error::{Result, StreamError};
use crate::specifier::Direction;

/// Baud rate used when a serial specifier carries no `:<baud>` suffix.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Serial read/write timeout. Reads are expected to block until data arrives.
pub const DEFAULT_SERIAL_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Opens the concrete channel behind a serial or file specifier.
///
/// The [`Resolver`](crate::Resolver) calls this only when the pool has no entry yet.
pub trait ChannelOpener {
    /// Open a serial device, applying `baud_rate` when given.
    fn open_serial(&mut self, device: &str, baud_rate: Option<u32>) -> Result<Channel>;

    /// Open a file in binary mode for the given direction.
    ///
    /// A missing input is an error. An output that cannot be created is not: the opener
    /// returns a [`Channel::failed`] channel so the failure surfaces on the first write.
    fn open_file(&mut self, path: &Path, direction: Direction) -> Result<Channel>;
}

/// Opens real files and serial ports.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    pub default_baud_rate: u32,
    pub serial_timeout: Duration,
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self {
            default_baud_rate: DEFAULT_BAUD_RATE,
            serial_timeout: DEFAULT_SERIAL_TIMEOUT,
        }
    }
}

impl ChannelOpener for SystemOpener {
    fn open_serial(&mut self, device: &str, baud_rate: Option<u32>) -> Result<Channel> {
        let mut port = serialport::new(device, self.default_baud_rate)
            .timeout(self.serial_timeout)
            .open()
            .map_err(|source| StreamError::SerialOpen {
                device: device.to_string(),
                source,
            })?;
        if let Some(requested) = baud_rate {
            apply_baud_rate(port.as_mut(), device, requested)?;
        }
        debug!(device, ?baud_rate, "opened serial device");
        Ok(Channel::from_serial(device, port).with_baud_rate(baud_rate))
    }

    fn open_file(&mut self, path: &Path, direction: Direction) -> Result<Channel> {
        let label = path.display().to_string();
        let file = match direction {
            Direction::Input => {
                File::open(path).map_err(|source| StreamError::InputNotFound {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Direction::Output => match OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
            {
                Ok(file) => file,
                Err(err) => {
                    warn!(path = %label, error = %err, "cannot create output file");
                    return Ok(Channel::failed(label, err.kind()));
                }
            },
        };
        debug!(path = %label, %direction, "opened file");
        Ok(Channel::from_file(label, file))
    }
}

/// The part of a serial port that negotiates line speed.
pub trait BaudControl {
    fn set_baud_rate(&mut self, baud_rate: u32) -> serialport::Result<()>;
    fn baud_rate(&self) -> serialport::Result<u32>;
}

impl BaudControl for dyn SerialPort {
    fn set_baud_rate(&mut self, baud_rate: u32) -> serialport::Result<()> {
        SerialPort::set_baud_rate(self, baud_rate)
    }

    fn baud_rate(&self) -> serialport::Result<u32> {
        SerialPort::baud_rate(self)
    }
}

/// Set `requested` and read it back; the device must report exactly that rate.
pub fn apply_baud_rate<P: BaudControl + ?Sized>(
    port: &mut P,
    device: &str,
    requested: u32,
) -> Result<()> {
    let unsupported = |actual| StreamError::UnsupportedBaudRate {
        device: device.to_string(),
        requested,
        actual,
    };
    port.set_baud_rate(requested).map_err(|_| unsupported(None))?;
    match port.baud_rate() {
        Ok(actual) if actual == requested => Ok(()),
        Ok(actual) => Err(unsupported(Some(actual))),
        Err(_) => Err(unsupported(None)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;

    struct FakePort {
        supported: &'static [u32],
        current: u32,
        /// Rate the hardware snaps to when asked for an unsupported one.
        snap_to: Option<u32>,
    }

    impl BaudControl for FakePort {
        fn set_baud_rate(&mut self, baud_rate: u32) -> serialport::Result<()> {
            if self.supported.contains(&baud_rate) {
                self.current = baud_rate;
                Ok(())
            } else if let Some(snap) = self.snap_to {
                self.current = snap;
                Ok(())
            } else {
                Err(serialport::Error::new(
                    serialport::ErrorKind::InvalidInput,
                    "unsupported",
                ))
            }
        }

        fn baud_rate(&self) -> serialport::Result<u32> {
            Ok(self.current)
        }
    }

    #[test]
    fn supported_rate_is_applied() {
        let mut port = FakePort {
            supported: &[9600, 115200],
            current: 9600,
            snap_to: None,
        };
        apply_baud_rate(&mut port, "/dev/ttyS0", 115200).unwrap();
        assert_eq!(port.current, 115200);
    }

    #[test]
    fn rejected_rate_is_unsupported() {
        let mut port = FakePort {
            supported: &[9600],
            current: 9600,
            snap_to: None,
        };
        let err = apply_baud_rate(&mut port, "/dev/ttyS0", 12345).unwrap_err();
        assert!(matches!(
            err,
            StreamError::UnsupportedBaudRate {
                requested: 12345,
                actual: None,
                ..
            }
        ));
        assert!(err.is_configuration());
    }

    #[test]
    fn silently_adjusted_rate_is_unsupported() {
        let mut port = FakePort {
            supported: &[9600],
            current: 9600,
            snap_to: Some(9600),
        };
        let err = apply_baud_rate(&mut port, "/dev/ttyS0", 14000).unwrap_err();
        assert!(matches!(
            err,
            StreamError::UnsupportedBaudRate {
                actual: Some(9600),
                ..
            }
        ));
    }

    #[test]
    fn output_file_is_created_and_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"stale contents").unwrap();

        let mut channel = SystemOpener::default()
            .open_file(&path, Direction::Output)
            .unwrap();
        channel.write_all(b"N").unwrap();
        channel.flush().unwrap();
        drop(channel);

        assert_eq!(std::fs::read(&path).unwrap(), b"N");
    }

    #[test]
    fn uncreatable_output_file_yields_a_failed_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.bin");

        let mut channel = SystemOpener::default()
            .open_file(&path, Direction::Output)
            .unwrap();
        assert_eq!(channel.open_error(), Some(std::io::ErrorKind::NotFound));
        assert!(channel.write_all(b"N").is_err());
        channel.flush().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn missing_input_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemOpener::default()
            .open_file(&dir.path().join("missing.csv"), Direction::Input)
            .unwrap_err();
        assert!(matches!(err, StreamError::InputNotFound { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn input_file_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.bin");
        std::fs::write(&path, b"abc").unwrap();

        let mut channel = SystemOpener::default()
            .open_file(&path, Direction::Input)
            .unwrap();
        let mut text = String::new();
        channel.read_to_string(&mut text).unwrap();
        assert_eq!(text, "abc");
    }
}
