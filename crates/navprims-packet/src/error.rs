/// Errors that can occur while decoding or reading packets.
///
/// Encoding never fails.
#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    /// The first byte is not the packet marker.
    #[error("invalid packet marker 0x{found:02x} (expected 0x{expected:02x})")]
    InvalidMarker { found: u8, expected: u8 },

    /// Fewer bytes than one full packet were available.
    #[error("truncated packet ({len} bytes, need {need})")]
    Truncated { len: usize, need: usize },

    /// An I/O error occurred while reading or writing packets.
    #[error("packet I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PacketError>;
