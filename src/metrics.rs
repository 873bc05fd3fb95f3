//! # Simplification quality metrics
//!
//! Reporting-side measures comparing a simplified trajectory with its source:
//! compression ratio and the SED error (in meters) of every original point against the
//! retained segment that replaces it.
//!
//! ## Units
//! -----------------
//! The reduction works in degrees. Errors are converted to meters with a single scalar
//! factor averaging the latitude and longitude scales at the trajectory's mean latitude:
//!
//! ```text
//! factor = (111320 + 111320 · cos(mean_lat)) / 2      [m / deg]
//! ```
use itertools::Itertools;
use log::warn;

use crate::{
    constants::{Degree, Meter, METERS_PER_DEGREE},
    sed::sed,
    trajectories::TrajectoryPoint,
};

/// Meters per degree at latitude `mean_lat` (degrees).
pub fn meters_per_degree(mean_lat: Degree) -> f64 {
    let per_deg_lat = METERS_PER_DEGREE;
    let per_deg_lon = METERS_PER_DEGREE * mean_lat.to_radians().cos();
    (per_deg_lat + per_deg_lon) / 2.0
}

/// Ratio of retained to original points, `0` for an empty source.
pub fn compression_ratio(retained: usize, original: usize) -> f64 {
    if original == 0 {
        0.0
    } else {
        retained as f64 / original as f64
    }
}

/// Average and maximum SED error of a simplification, in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorStats {
    pub average: Meter,
    pub maximum: Meter,
    /// Number of original points measured (segment endpoints are counted on each side).
    pub samples: usize,
}

/// SED error of every original point against the retained segment that spans it.
///
/// Arguments
/// -----------------
/// * `original` – The full source trajectory; `original[i].original_index == i` must hold,
///   as for [`Trajectory::points`](crate::trajectories::Trajectory::points).
/// * `retained` – The simplified trajectory (any order; sorted by index internally).
/// * `factor` – Meters per degree, see [`meters_per_degree`].
///
/// Return
/// ----------
/// * [`ErrorStats`] over all `j ∈ [a, b]` for each consecutive retained pair `(a, b)`;
///   zeroed when fewer than two points are retained. Pairs whose indices fall outside
///   `original` are skipped with a warning.
pub fn sed_error_stats(
    original: &[TrajectoryPoint],
    retained: &[TrajectoryPoint],
    factor: f64,
) -> ErrorStats {
    let mut total = 0.0;
    let mut maximum: f64 = 0.0;
    let mut samples = 0usize;

    let indices = retained.iter().map(|p| p.original_index).sorted_unstable();
    for (start, end) in indices.tuple_windows() {
        let Some(span) = original.get(start..=end) else {
            warn!("Retained segment {start}..={end} is outside the source trajectory, skipped");
            continue;
        };
        let (s, e) = (&span[0], &span[span.len() - 1]);
        for m in span {
            let err = sed(s, m, e) * factor;
            total += err;
            maximum = maximum.max(err);
            samples += 1;
        }
    }

    let average = if samples > 0 {
        total / samples as f64
    } else {
        0.0
    };
    ErrorStats {
        average,
        maximum,
        samples,
    }
}

#[cfg(test)]
mod metrics_test {
    use super::*;
    use approx::assert_relative_eq;

    use crate::trajectories::Trajectory;

    #[test]
    fn test_meters_per_degree() {
        assert_relative_eq!(meters_per_degree(0.0), 111_320.0, epsilon = 1e-9);
        assert_relative_eq!(meters_per_degree(60.0), 83_490.0, epsilon = 1e-6);
    }

    #[test]
    fn test_compression_ratio() {
        assert_eq!(compression_ratio(0, 0), 0.0);
        assert_eq!(compression_ratio(25, 100), 0.25);
    }

    #[test]
    fn test_lossless_simplification_has_no_error() {
        let traj = Trajectory::from_points([(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (0.0, 2.0, 2.0)]);
        let stats = sed_error_stats(traj.points(), traj.points(), 1.0);
        assert_eq!(stats.samples, 4);
        assert_eq!(stats.maximum, 0.0);
        assert_eq!(stats.average, 0.0);
    }

    #[test]
    fn test_dropped_point_error() {
        let traj = Trajectory::from_points([(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (0.0, 2.0, 2.0)]);
        let pts = traj.points();
        // Retained out of order on purpose: indices are sorted internally.
        let retained = [pts[2], pts[0]];

        let stats = sed_error_stats(pts, &retained, 10.0);
        assert_eq!(stats.samples, 3);
        assert_relative_eq!(stats.maximum, 10.0, epsilon = 1e-9);
        assert_relative_eq!(stats.average, 10.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_segments_outside_source_are_skipped() {
        let traj = Trajectory::from_points([(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (0.0, 2.0, 2.0)]);
        let pts = traj.points();
        let foreign = TrajectoryPoint::new(7, 0.0, 7.0, 7.0);

        let stats = sed_error_stats(pts, &[pts[0], pts[2], foreign], 10.0);
        assert_eq!(stats.samples, 3);
        assert_relative_eq!(stats.maximum, 10.0, epsilon = 1e-9);

        assert_eq!(
            sed_error_stats(&pts[..2], &[pts[0], pts[2]], 1.0),
            ErrorStats::default()
        );
    }

    #[test]
    fn test_degenerate_results() {
        let traj = Trajectory::from_points([(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)]);
        assert_eq!(
            sed_error_stats(traj.points(), &traj.points()[..1], 1.0),
            ErrorStats::default()
        );
        assert_eq!(sed_error_stats(&[], &[], 1.0), ErrorStats::default());
    }
}
