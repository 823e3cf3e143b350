//! Text navigation records.
//!
//! One record per line, comma separated:
//! `itow, longitude, latitude, height, v_north, v_east, v_down, yaw, pitch, roll[, azimuth]`
//! with angles in degrees. This is the same column order the CSV writer produces, so a
//! dump can be fed back in. Blank lines, `#` comments and the `itow, ...` header line are
//! skipped.

use navprims_packet::NavSnapshot;

/// Minimum number of numeric columns (azimuth may be omitted).
pub const MIN_COLUMNS: usize = 10;

/// Maximum number of numeric columns.
pub const MAX_COLUMNS: usize = MIN_COLUMNS + 1;

/// First field of the header line the CSV writer emits.
const HEADER_FIELD: &str = "itow";

/// A time-stamped navigation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavRecord {
    pub time_of_week: f64,
    pub state: NavSnapshot,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("expected at least {MIN_COLUMNS} columns, found {0}")]
    TooFewColumns(usize),

    #[error("expected at most {MAX_COLUMNS} columns, found {0}")]
    TooManyColumns(usize),

    #[error("column {column}: {value:?} is not a number")]
    NotANumber { column: usize, value: String },
}

/// Parse one line. `Ok(None)` means the line carries no record.
pub fn parse_record(line: &str) -> Result<Option<NavRecord>, RecordError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields: Vec<&str> = line.split(',').map(str::trim).collect();
    // Writers leave a trailing separator after the last column.
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    if fields
        .first()
        .is_some_and(|f| f.eq_ignore_ascii_case(HEADER_FIELD))
    {
        return Ok(None);
    }
    if fields.len() < MIN_COLUMNS {
        return Err(RecordError::TooFewColumns(fields.len()));
    }
    if fields.len() > MAX_COLUMNS {
        return Err(RecordError::TooManyColumns(fields.len()));
    }

    let mut values = [0.0f64; MAX_COLUMNS];
    for (column, (slot, field)) in values.iter_mut().zip(&fields).enumerate() {
        *slot = field.parse().map_err(|_| RecordError::NotANumber {
            column: column + 1,
            value: field.to_string(),
        })?;
    }

    let [itow, lng, lat, h, vn, ve, vd, yaw, pitch, roll, azimuth] = values;
    Ok(Some(NavRecord {
        time_of_week: itow,
        state: NavSnapshot::from_degrees(lng, lat, h, [vn, ve, vd], yaw, pitch, roll, azimuth),
    }))
}

#[cfg(test)]
mod tests {
    use navprims_packet::rad2deg;

    use super::*;

    #[test]
    fn parses_full_record() {
        let rec = parse_record("12.345, -20, 10, 100, 1.23, 0, 0, 45, 0, 0, 90")
            .unwrap()
            .unwrap();
        assert_eq!(rec.time_of_week, 12.345);
        assert_eq!(rad2deg(rec.state.longitude), -20.0);
        assert_eq!(rad2deg(rec.state.latitude), 10.0);
        assert_eq!(rec.state.height, 100.0);
        assert_eq!(rec.state.v_north, 1.23);
        assert_eq!(rad2deg(rec.state.heading), 45.0);
        assert_eq!(rad2deg(rec.state.azimuth), 90.0);
    }

    #[test]
    fn azimuth_is_optional_and_trailing_separator_ignored() {
        let rec = parse_record("1, 0, 0, 0, 0, 0, 0, 0, 0, 0, ")
            .unwrap()
            .unwrap();
        assert_eq!(rec.state.azimuth, 0.0);
    }

    #[test]
    fn skips_blank_comment_and_header_lines() {
        assert_eq!(parse_record("   ").unwrap(), None);
        assert_eq!(parse_record("# recorded 2024").unwrap(), None);
        assert_eq!(
            parse_record("itow, longitude, latitude, height, v_north, v_east, v_down, ").unwrap(),
            None
        );
    }

    #[test]
    fn reports_bad_columns() {
        assert_eq!(
            parse_record("1, 2, 3").unwrap_err(),
            RecordError::TooFewColumns(3)
        );
        assert_eq!(
            parse_record("1, 0, 0, 0, 0, x, 0, 0, 0, 0").unwrap_err(),
            RecordError::NotANumber {
                column: 6,
                value: "x".to_string()
            }
        );
        assert_eq!(
            parse_record("1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7").unwrap_err(),
            RecordError::TooManyColumns(12)
        );
    }

    #[test]
    fn only_the_itow_header_is_skipped() {
        let rec = parse_record("nan, 0, 0, 0, 0, 0, 0, 0, 0, 0").unwrap().unwrap();
        assert!(rec.time_of_week.is_nan());

        let rec = parse_record("inf, 0, 0, 0, 0, 0, 0, 0, 0, 0").unwrap().unwrap();
        assert_eq!(rec.time_of_week, f64::INFINITY);

        assert_eq!(
            parse_record("time, 0, 0, 0, 0, 0, 0, 0, 0, 0").unwrap_err(),
            RecordError::NotANumber {
                column: 1,
                value: "time".to_string()
            }
        );
    }
}
