//! Navigation stream endpoints and N0 telemetry packets.
//!
//! # Crate Structure
//!
//! - [`stream`] — Specifier resolution and the deduplicating channel pool
//! - [`packet`] — Navigation state trait, N0 packet encoder/decoder, CSV dumps
//! - [`records`] — Text navigation records accepted by the converter
//! - [`window`] — GPS time window used to select records

pub mod records;
pub mod window;

/// Re-export stream types.
pub mod stream {
    pub use navprims_stream::*;
}

/// Re-export packet types.
pub mod packet {
    pub use navprims_packet::*;
}
