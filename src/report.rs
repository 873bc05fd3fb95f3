//! Plain-text report of a simplification run.
//!
//! Layout: one retained point per line (`lat lon time`), followed by three summary lines
//! (compression ratio, timing, SED error in meters).
use std::{fmt, fs, io::Write, time::Duration};

use camino::Utf8Path;

use crate::{
    constants::MILLIS_PER_SECOND,
    metrics::{compression_ratio, ErrorStats},
    squish_errors::SquishError,
    trajectories::TrajectoryPoint,
};

#[derive(Debug, Clone)]
pub struct SimplificationReport {
    pub retained: Vec<TrajectoryPoint>,
    pub original_count: usize,
    pub elapsed: Duration,
    pub errors: ErrorStats,
}

impl SimplificationReport {
    pub fn compression_ratio(&self) -> f64 {
        compression_ratio(self.retained.len(), self.original_count)
    }

    pub fn total_time_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * MILLIS_PER_SECOND
    }

    pub fn time_per_point_ms(&self) -> f64 {
        if self.original_count == 0 {
            0.0
        } else {
            self.total_time_ms() / self.original_count as f64
        }
    }

    /// Summary lines only, without the point listing.
    pub fn summary(&self) -> String {
        format!(
            "Average Compression Ratio (points): {:.6}\n\
             Total Compression Time (ms): {:.6}, Average Time per Point (ms): {:.6}\n\
             Average Error (m): {:.6}, Maximum Error (m): {:.6}",
            self.compression_ratio(),
            self.total_time_ms(),
            self.time_per_point_ms(),
            self.errors.average,
            self.errors.maximum
        )
    }

    /// Write the full report to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Utf8Path) -> Result<(), SquishError> {
        let mut file = fs::File::create(path)?;
        write!(file, "{self}")?;
        file.flush()?;
        Ok(())
    }
}

impl fmt::Display for SimplificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for point in &self.retained {
            writeln!(f, "{point}")?;
        }
        writeln!(f, "{}", self.summary())
    }
}
