use bytes::{Buf, BufMut};

use crate::error::{PacketError, Result};
use crate::fixed::{fixed_i16, fixed_i32, fixed_u32, rad2deg};
use crate::nav::NavigationState;

/// Size of an N0 packet on the wire.
pub const N0_SIZE: usize = 32;

/// First byte of every N0 packet.
pub const N0_MARKER: u8 = b'N';

/// Milliseconds per second for the time-of-week field.
pub const TIME_SCALE: f64 = 1e3;
/// Latitude/longitude scale (degrees).
pub const POSITION_SCALE: f64 = 1e7;
/// Height scale (meters).
pub const HEIGHT_SCALE: f64 = 1e4;
/// Velocity scale (m/s).
pub const VELOCITY_SCALE: f64 = 1e2;
/// Attitude scale (degrees).
pub const ATTITUDE_SCALE: f64 = 1e2;

/// The N0 navigation packet in its fixed-point form.
///
/// Wire format (32 bytes, all fields little-endian):
/// ```text
/// ┌─────┬──────────┬──────────┬─────────┬─────────┬─────────┬──────────┬──────────────────┐
/// │ 'N' │ 0 0 0    │ ToW u32  │ lat i32 │ lng i32 │ h i32   │ vN vE vD │ yaw pitch roll   │
/// │ 1B  │ 3B       │ ms       │ 1e-7deg │ 1e-7deg │ 1e-4 m  │ i16 cm/s │ i16 1e-2 deg     │
/// └─────┴──────────┴──────────┴─────────┴─────────┴─────────┴──────────┴──────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct N0Packet {
    pub time_of_week_ms: u32,
    pub latitude: i32,
    pub longitude: i32,
    pub height: i32,
    pub v_north: i16,
    pub v_east: i16,
    pub v_down: i16,
    pub heading: i16,
    pub pitch: i16,
    pub roll: i16,
}

impl N0Packet {
    /// Sample `nav` into fixed-point fields; angles are converted to degrees first.
    pub fn from_state(time_of_week: f64, nav: &impl NavigationState) -> Self {
        Self {
            time_of_week_ms: fixed_u32(time_of_week, TIME_SCALE),
            latitude: fixed_i32(rad2deg(nav.latitude()), POSITION_SCALE),
            longitude: fixed_i32(rad2deg(nav.longitude()), POSITION_SCALE),
            height: fixed_i32(nav.height(), HEIGHT_SCALE),
            v_north: fixed_i16(nav.v_north(), VELOCITY_SCALE),
            v_east: fixed_i16(nav.v_east(), VELOCITY_SCALE),
            v_down: fixed_i16(nav.v_down(), VELOCITY_SCALE),
            heading: fixed_i16(rad2deg(nav.heading()), ATTITUDE_SCALE),
            pitch: fixed_i16(rad2deg(nav.pitch()), ATTITUDE_SCALE),
            roll: fixed_i16(rad2deg(nav.roll()), ATTITUDE_SCALE),
        }
    }

    /// Serialize into the 32-byte wire form.
    pub fn to_bytes(&self) -> [u8; N0_SIZE] {
        let mut buf = [0u8; N0_SIZE];
        let mut dst = &mut buf[..];
        dst.put_u8(N0_MARKER);
        dst.put_bytes(0, 3);
        dst.put_u32_le(self.time_of_week_ms);
        dst.put_i32_le(self.latitude);
        dst.put_i32_le(self.longitude);
        dst.put_i32_le(self.height);
        dst.put_i16_le(self.v_north);
        dst.put_i16_le(self.v_east);
        dst.put_i16_le(self.v_down);
        dst.put_i16_le(self.heading);
        dst.put_i16_le(self.pitch);
        dst.put_i16_le(self.roll);
        buf
    }

    /// Parse one packet from the start of `src`.
    ///
    /// The reserved bytes are not checked.
    pub fn decode(src: &[u8]) -> Result<Self> {
        if src.len() < N0_SIZE {
            return Err(PacketError::Truncated {
                len: src.len(),
                need: N0_SIZE,
            });
        }
        let mut src = &src[..N0_SIZE];
        let marker = src.get_u8();
        if marker != N0_MARKER {
            return Err(PacketError::InvalidMarker {
                found: marker,
                expected: N0_MARKER,
            });
        }
        src.advance(3);
        Ok(Self {
            time_of_week_ms: src.get_u32_le(),
            latitude: src.get_i32_le(),
            longitude: src.get_i32_le(),
            height: src.get_i32_le(),
            v_north: src.get_i16_le(),
            v_east: src.get_i16_le(),
            v_down: src.get_i16_le(),
            heading: src.get_i16_le(),
            pitch: src.get_i16_le(),
            roll: src.get_i16_le(),
        })
    }

    pub fn time_of_week(&self) -> f64 {
        f64::from(self.time_of_week_ms) / TIME_SCALE
    }

    pub fn latitude_deg(&self) -> f64 {
        f64::from(self.latitude) / POSITION_SCALE
    }

    pub fn longitude_deg(&self) -> f64 {
        f64::from(self.longitude) / POSITION_SCALE
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / HEIGHT_SCALE
    }

    /// North, east, down velocity in m/s.
    pub fn velocity_ned(&self) -> [f64; 3] {
        [self.v_north, self.v_east, self.v_down].map(|v| f64::from(v) / VELOCITY_SCALE)
    }

    pub fn heading_deg(&self) -> f64 {
        f64::from(self.heading) / ATTITUDE_SCALE
    }

    pub fn pitch_deg(&self) -> f64 {
        f64::from(self.pitch) / ATTITUDE_SCALE
    }

    pub fn roll_deg(&self) -> f64 {
        f64::from(self.roll) / ATTITUDE_SCALE
    }
}

/// Encode `nav` at `time_of_week` seconds into an N0 packet.
pub fn encode_n0(time_of_week: f64, nav: &impl NavigationState) -> [u8; N0_SIZE] {
    N0Packet::from_state(time_of_week, nav).to_bytes()
}
