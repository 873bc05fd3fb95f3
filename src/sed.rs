//! # Synchronized Euclidean Distance (SED)
//!
//! Error model shared by the reduction engine and the reporting metrics.
//!
//! Given three fixes ordered in time `s ≤ m ≤ e`, the expected position of `m` is
//! linearly interpolated along the segment `s → e` with the time fraction
//!
//! ```text
//! t = (m.time − s.time) / (e.time − s.time)      (t = 1 when e.time == s.time)
//! ```
//!
//! and the SED is the Euclidean distance between that synchronized position and the
//! actual position of `m`. Distances are in the coordinate units of the input (degrees);
//! callers convert to meters with [`metrics::meters_per_degree`](crate::metrics::meters_per_degree).
use crate::trajectories::TrajectoryPoint;

/// Time fraction of `m` between `s` and `e`; `1.0` on a zero time span.
#[inline]
fn time_ratio(s: &TrajectoryPoint, m: &TrajectoryPoint, e: &TrajectoryPoint) -> f64 {
    let span = e.time - s.time;
    if span == 0.0 {
        1.0
    } else {
        (m.time - s.time) / span
    }
}

/// Synchronized Euclidean distance of `m` from the segment `s → e`.
///
/// Arguments
/// -----------------
/// * `s` – Segment start.
/// * `m` – Point whose deviation is measured.
/// * `e` – Segment end.
///
/// Return
/// ----------
/// * The distance (≥ 0) between `m` and its time-interpolated position, in input units.
///
/// Note
/// ----------
/// A zero time span between `s` and `e` is not an error: `m` is compared with `e`.
pub fn sed(s: &TrajectoryPoint, m: &TrajectoryPoint, e: &TrajectoryPoint) -> f64 {
    let t = time_ratio(s, m, e);
    let start = s.position();
    let expected = start + (e.position() - start) * t;
    (expected - m.position()).norm()
}

#[cfg(test)]
mod sed_test {
    use super::*;
    use approx::assert_relative_eq;

    fn pt(lat: f64, lon: f64, time: f64) -> TrajectoryPoint {
        TrajectoryPoint::new(0, lat, lon, time)
    }

    #[test]
    fn test_on_segment_is_zero() {
        let s = pt(0.0, 0.0, 0.0);
        let m = pt(1.0, 2.0, 5.0);
        let e = pt(2.0, 4.0, 10.0);
        assert_relative_eq!(sed(&s, &m, &e), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_synchronized_not_perpendicular() {
        // m lies on the segment geometrically but is late in time.
        let s = pt(0.0, 0.0, 0.0);
        let m = pt(1.0, 0.0, 5.0);
        let e = pt(4.0, 0.0, 10.0);
        assert_relative_eq!(sed(&s, &m, &e), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_point() {
        let s = pt(0.0, 0.0, 0.0);
        let m = pt(3.0, 4.0, 0.0);
        let e = pt(0.0, 10.0, 10.0);
        // t = 0, expected position is s
        assert_relative_eq!(sed(&s, &m, &e), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_time_span_compares_with_end() {
        let s = pt(0.0, 0.0, 7.0);
        let m = pt(1.0, 1.0, 7.0);
        let e = pt(1.0, 4.0, 7.0);
        assert_relative_eq!(sed(&s, &m, &e), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_endpoints_have_no_deviation() {
        let s = pt(0.3, -1.2, 0.0);
        let e = pt(2.5, 0.7, 30.0);
        assert_relative_eq!(sed(&s, &s, &e), 0.0, epsilon = 1e-12);
        assert_relative_eq!(sed(&s, &e, &e), 0.0, epsilon = 1e-12);
    }
}
