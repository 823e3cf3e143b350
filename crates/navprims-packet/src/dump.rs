//! Comma-separated text form of a navigation state.
//!
//! Every column is followed by `", "`, including the last one, so a caller can prefix
//! or append its own columns on the same line.

use std::io::{self, Write};

use crate::fixed::rad2deg;
use crate::nav::NavigationState;

/// Column names, in output order.
pub const LABELS: [&str; 10] = [
    "longitude",
    "latitude",
    "height",
    "v_north",
    "v_east",
    "v_down",
    "Yaw(psi)",
    "Pitch(theta)",
    "Roll(phi)",
    "Azimuth(alpha)",
];

/// Write the column header.
pub fn write_label<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    for label in LABELS {
        write!(out, "{label}, ")?;
    }
    Ok(())
}

/// Write one state; angles in degrees, everything else in SI units.
pub fn write_state<W: Write + ?Sized>(out: &mut W, nav: &impl NavigationState) -> io::Result<()> {
    let values = [
        rad2deg(nav.longitude()),
        rad2deg(nav.latitude()),
        nav.height(),
        nav.v_north(),
        nav.v_east(),
        nav.v_down(),
        rad2deg(nav.heading()),
        rad2deg(nav.pitch()),
        rad2deg(nav.roll()),
        rad2deg(nav.azimuth()),
    ];
    for value in values {
        write!(out, "{value}, ")?;
    }
    Ok(())
}
