//! # GPS text reader
//!
//! Reads comma-separated GPS logs into a [`Trajectory`]. Three row layouts are
//! recognised, chosen **per row** from the number of fields:
//!
//! | fields | layout | example |
//! |---|---|---|
//! | 3 | `datetime, lon, lat` | `2018-09-30 15:54:03.0,104.09571,30.66221` |
//! | 4–6 | T-Drive: `id, datetime, lon, lat` | `1,2008-02-02 15:36:08,116.51172,39.92123` |
//! | ≥ 7 | Geolife `.plt`: `lat, lon, _, alt, days, date, time` | `40.013867,116.306473,0,226,39744.98,2008-10-23,23:41:04` |
//!
//! Rows with any other field count are skipped. Datetimes are `YYYY-MM-DD HH:MM:SS[.fff]`,
//! read as **UTC** and stored as Unix milliseconds.
//!
//! ## Error Handling
//! -----------------
//! A row with a recognised layout that fails to parse is a data-format error:
//! [`SquishError::GpsRow`] carrying the 1-based line number and a [`ParseRowError`].
//! With [`GpsReaderOptions::lenient`] the row is logged and dropped instead.
//! Geolife files start with six header rows; skip them with [`GpsReaderOptions::skip_rows`].
use std::io;
use std::str::FromStr;

use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord, Trim};
use hifitime::Epoch;
use log::{debug, warn};
use thiserror::Error;

use crate::{
    constants::{Degree, Millis},
    squish_errors::SquishError,
    trajectories::Trajectory,
};

/// Row-level parsing errors.
///
/// Variants
/// -----------------
/// * `InvalidDateTime` – The datetime field(s) do not match `YYYY-MM-DD HH:MM:SS[.fff]`.
/// * `InvalidCoordinate` – A latitude/longitude field is not a finite number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseRowError {
    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Options controlling how a GPS file is read.
#[derive(Debug, Clone, Default)]
pub struct GpsReaderOptions {
    /// Number of leading rows to drop before parsing.
    pub skip_rows: usize,
    /// Skip malformed rows with a warning instead of failing.
    pub lenient: bool,
}

impl GpsReaderOptions {
    /// Options suited to Geolife `.plt` files (six header rows, strict parsing).
    pub fn geolife() -> Self {
        GpsReaderOptions {
            skip_rows: crate::constants::GEOLIFE_HEADER_ROWS,
            lenient: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowLayout {
    DateLonLat,
    TDrive,
    Geolife,
}

impl RowLayout {
    fn classify(field_count: usize) -> Option<RowLayout> {
        match field_count {
            3 => Some(RowLayout::DateLonLat),
            4..=6 => Some(RowLayout::TDrive),
            n if n >= 7 => Some(RowLayout::Geolife),
            _ => None,
        }
    }
}

/// Read a GPS log from disk.
///
/// Arguments
/// -----------------
/// * `path` – File to read.
/// * `options` – Header skipping and error policy.
///
/// Return
/// ----------
/// * The parsed [`Trajectory`], with `original_index` numbering the accepted rows.
///
/// See also
/// ------------
/// * [`parse_gps_str`] – Same parser over an in-memory string.
pub fn read_gps_file(
    path: &Utf8Path,
    options: &GpsReaderOptions,
) -> Result<Trajectory, SquishError> {
    let file = std::fs::File::open(path)?;
    let trajectory = read_gps(file, options)?;
    debug!("Read {} GPS points from {path}", trajectory.len());
    Ok(trajectory)
}

/// Parse a GPS log held in memory. See [`read_gps_file`].
pub fn parse_gps_str(content: &str, options: &GpsReaderOptions) -> Result<Trajectory, SquishError> {
    read_gps(content.as_bytes(), options)
}

fn read_gps<R: io::Read>(source: R, options: &GpsReaderOptions) -> Result<Trajectory, SquishError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut samples: Vec<(Degree, Degree, Millis)> = Vec::new();

    for record in reader.records().skip(options.skip_rows) {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let Some(layout) = RowLayout::classify(record.len()) else {
            continue;
        };

        match parse_row(&record, layout) {
            Ok(sample) => samples.push(sample),
            Err(source) => {
                let line = record.position().map_or(0, |p| p.line());
                if options.lenient {
                    warn!("Skipping malformed GPS row at line {line}: {source}");
                    continue;
                }
                return Err(SquishError::GpsRow { line, source });
            }
        }
    }

    Ok(Trajectory::from_points(samples))
}

fn parse_row(
    record: &StringRecord,
    layout: RowLayout,
) -> Result<(Degree, Degree, Millis), ParseRowError> {
    // Field indices for (datetime, lon, lat); Geolife splits the datetime in two.
    match layout {
        RowLayout::DateLonLat => {
            let time = parse_datetime(&record[0])?;
            let lon = parse_coordinate(&record[1])?;
            let lat = parse_coordinate(&record[2])?;
            Ok((lat, lon, time))
        }
        RowLayout::TDrive => {
            let time = parse_datetime(&record[1])?;
            let lon = parse_coordinate(&record[2])?;
            let lat = parse_coordinate(&record[3])?;
            Ok((lat, lon, time))
        }
        RowLayout::Geolife => {
            let lat = parse_coordinate(&record[0])?;
            let lon = parse_coordinate(&record[1])?;
            let time = parse_datetime(&format!("{} {}", &record[5], &record[6]))?;
            Ok((lat, lon, time))
        }
    }
}

fn parse_coordinate(field: &str) -> Result<Degree, ParseRowError> {
    f64::from_str(field)
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseRowError::InvalidCoordinate(field.to_string()))
}

/// Parse `YYYY-MM-DD HH:MM:SS[.fff]` (UTC) into Unix milliseconds.
fn parse_datetime(field: &str) -> Result<Millis, ParseRowError> {
    let invalid = || ParseRowError::InvalidDateTime(field.to_string());

    let (date, time) = field.trim().split_once(' ').ok_or_else(invalid)?;
    let date: Vec<&str> = date.split('-').collect();
    let time: Vec<&str> = time.trim().split(':').collect();
    if date.len() != 3 || time.len() != 3 {
        return Err(invalid());
    }

    let year = i32::from_str(date[0]).map_err(|_| invalid())?;
    let month = u8::from_str(date[1]).map_err(|_| invalid())?;
    let day = u8::from_str(date[2]).map_err(|_| invalid())?;
    let hour = u8::from_str(time[0]).map_err(|_| invalid())?;
    let minute = u8::from_str(time[1]).map_err(|_| invalid())?;
    let seconds = f64::from_str(time[2]).map_err(|_| invalid())?;
    if !(0.0..60.0).contains(&seconds) {
        return Err(invalid());
    }

    // Separation of whole seconds and fraction
    let second = seconds.trunc() as u8;
    let nanos = (((seconds - seconds.trunc()) * 1e9).round() as u32).min(999_999_999);

    let epoch = Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, nanos)
        .map_err(|_| invalid())?;

    Ok(epoch.to_unix_milliseconds())
}

#[cfg(test)]
mod gps_reader_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_classify_layouts() {
        assert_eq!(RowLayout::classify(2), None);
        assert_eq!(RowLayout::classify(3), Some(RowLayout::DateLonLat));
        assert_eq!(RowLayout::classify(4), Some(RowLayout::TDrive));
        assert_eq!(RowLayout::classify(6), Some(RowLayout::TDrive));
        assert_eq!(RowLayout::classify(7), Some(RowLayout::Geolife));
        assert_eq!(RowLayout::classify(9), Some(RowLayout::Geolife));
    }

    #[test]
    fn test_parse_datetime() {
        let whole = parse_datetime("2018-09-30 15:54:03").unwrap();
        let next_day = parse_datetime("2018-10-01 15:54:03").unwrap();
        assert_relative_eq!(next_day - whole, 86_400_000.0, epsilon = 1e-2);

        let frac = parse_datetime("2018-09-30 15:54:03.5").unwrap();
        assert_relative_eq!(frac - whole, 500.0, epsilon = 1e-2);

        let next_minute = parse_datetime("2018-09-30 15:55:03").unwrap();
        assert_relative_eq!(next_minute - whole, 60_000.0, epsilon = 1e-2);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        for bad in ["", "2018-09-30", "2018/09/30 15:54:03", "2018-09-30 15:54", "x-y-z a:b:c"] {
            assert_eq!(
                parse_datetime(bad),
                Err(ParseRowError::InvalidDateTime(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("104.09571"), Ok(104.09571));
        assert_eq!(
            parse_coordinate("NaN"),
            Err(ParseRowError::InvalidCoordinate("NaN".into()))
        );
        assert_eq!(
            parse_coordinate("abc"),
            Err(ParseRowError::InvalidCoordinate("abc".into()))
        );
    }

    #[test]
    fn test_mixed_layouts_and_skipped_rows() {
        let content = "\
2018-09-30 15:54:03.0,104.09571,30.66221
not,a,gps,row,with,too,many,fields,here
1,2008-02-02 15:36:08,116.51172,39.92123
only,two
40.013867,116.306473,0,226,39744.9868518518,2008-10-23,23:41:04
";
        let err = parse_gps_str(content, &GpsReaderOptions::default()).unwrap_err();
        assert!(matches!(err, SquishError::GpsRow { line: 2, .. }));

        let lenient = GpsReaderOptions {
            skip_rows: 0,
            lenient: true,
        };
        let traj = parse_gps_str(content, &lenient).unwrap();
        assert_eq!(traj.len(), 3);

        let p = traj.points();
        assert_eq!((p[0].lat, p[0].lon), (30.66221, 104.09571));
        assert_eq!((p[1].lat, p[1].lon), (39.92123, 116.51172));
        assert_eq!((p[2].lat, p[2].lon), (40.013867, 116.306473));
        assert_eq!(p[2].original_index, 2);
    }
}
