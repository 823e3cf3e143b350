//! GPS time bounds for selecting which states are emitted.

use std::fmt;
use std::str::FromStr;

/// A GPS time given as `TOW` or `WN:TOW` (seconds of week, optional week number).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsTime {
    pub week: Option<u32>,
    pub time_of_week: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid GPS time {0:?} (expected TOW or WN:TOW)")]
pub struct GpsTimeParseError(String);

impl FromStr for GpsTime {
    type Err = GpsTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || GpsTimeParseError(s.to_string());
        let s = s.trim();
        let (week, tow) = match s.split_once(':') {
            Some((week, tow)) => (Some(week.trim().parse::<u32>().map_err(|_| err())?), tow),
            None => (None, s),
        };
        let time_of_week = tow.trim().parse::<f64>().map_err(|_| err())?;
        if !time_of_week.is_finite() {
            return Err(err());
        }
        Ok(Self { week, time_of_week })
    }
}

impl fmt::Display for GpsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.week {
            Some(week) => write!(f, "{week}:{}", self.time_of_week),
            None => write!(f, "{}", self.time_of_week),
        }
    }
}

/// Inclusive time-of-week window. Week numbers are carried but not compared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: GpsTime,
    pub end: GpsTime,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: GpsTime {
                week: None,
                time_of_week: 0.0,
            },
            end: GpsTime {
                week: None,
                time_of_week: f64::MAX,
            },
        }
    }
}

impl TimeWindow {
    /// Window with optional bounds; missing bounds stay open.
    pub fn new(start: Option<GpsTime>, end: Option<GpsTime>) -> Self {
        let default = Self::default();
        Self {
            start: start.unwrap_or(default.start),
            end: end.unwrap_or(default.end),
        }
    }

    pub fn contains(&self, time_of_week: f64) -> bool {
        time_of_week >= self.start.time_of_week && time_of_week <= self.end.time_of_week
    }
}
