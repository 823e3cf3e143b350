//! Fixed-layout navigation packets.
//!
//! A navigation solution is read through the [`NavigationState`] trait and written as
//! either a 32-byte binary N0 packet or a comma-separated text line:
//! - 1-byte `'N'` marker and 3 reserved zero bytes
//! - time of week, position, height as 4-byte little-endian fixed-point values
//! - velocity and attitude as 2-byte little-endian fixed-point values
//!
//! Encoding is pure and infallible; fixed-point fields truncate and wrap.

pub mod dump;
pub mod error;
pub mod fixed;
pub mod n0;
pub mod nav;
pub mod reader;
pub mod writer;

pub use error::{PacketError, Result};
pub use fixed::{deg2rad, rad2deg};
pub use n0::{encode_n0, N0Packet, N0_MARKER, N0_SIZE};
pub use nav::{NavSnapshot, NavigationState};
pub use reader::PacketReader;
pub use writer::{Encoding, PacketWriter};
