//! Angle conversion and fixed-point narrowing.
//!
//! Fixed-point fields are produced by multiplying by a scale, truncating toward zero and
//! narrowing with two's-complement wrap-around. Nothing is rounded or range-checked;
//! out-of-range values wrap, which is part of the wire format.
//!
//! Non-finite input is deterministic: the float is first cast to `i64` with Rust's
//! saturating semantics (NaN becomes 0, +inf becomes `i64::MAX`, -inf becomes `i64::MIN`)
//! and then narrowed. So NaN encodes as 0, +inf as all-ones (-1 / `u32::MAX`) and -inf as 0.

use std::f64::consts::PI;

/// Degrees to radians.
pub fn deg2rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Radians to degrees.
pub fn rad2deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}

fn scaled(value: f64, scale: f64) -> i64 {
    (value * scale) as i64
}

/// `value * scale`, truncated and wrapped to 32 unsigned bits.
pub fn fixed_u32(value: f64, scale: f64) -> u32 {
    scaled(value, scale) as u32
}

/// `value * scale`, truncated and wrapped to 32 signed bits.
pub fn fixed_i32(value: f64, scale: f64) -> i32 {
    scaled(value, scale) as i32
}

/// `value * scale`, truncated and wrapped to 16 signed bits.
pub fn fixed_i16(value: f64, scale: f64) -> i16 {
    scaled(value, scale) as i16
}
