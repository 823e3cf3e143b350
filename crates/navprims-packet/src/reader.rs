use std::io::{ErrorKind, Read};

use crate::error::{PacketError, Result};
use crate::n0::{N0Packet, N0_SIZE};

/// Reads consecutive N0 packets from any `Read` stream.
///
/// Handles partial reads internally; callers always get complete packets.
pub struct PacketReader<T> {
    inner: T,
}

impl<T: Read> PacketReader<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Read the next packet (blocking).
    ///
    /// Returns `Ok(None)` at a clean end of stream and `PacketError::Truncated` when the
    /// stream ends inside a packet.
    pub fn read_packet(&mut self) -> Result<Option<N0Packet>> {
        let mut buf = [0u8; N0_SIZE];
        let mut filled = 0usize;
        while filled < N0_SIZE {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(PacketError::Truncated {
                        len: filled,
                        need: N0_SIZE,
                    })
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(PacketError::Io(err)),
            }
        }
        N0Packet::decode(&buf).map(Some)
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read> Iterator for PacketReader<T> {
    type Item = Result<N0Packet>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_packet().transpose()
    }
}
