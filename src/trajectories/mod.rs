//! # Trajectories: point store and ingestion
//!
//! The immutable input side of a reduction run. A [`Trajectory`] is an ordered
//! sequence of [`TrajectoryPoint`]s, each tagged with its position in the original
//! sequence so that a simplified result can always be related back to the input.
//!
//! Modules
//! -----------------
//! * [`gps_reader`](crate::trajectories::gps_reader) – Text/CSV reader for the supported
//!   GPS row layouts (plain `datetime,lon,lat`, Geolife `.plt`, T-Drive).
//!
//! Data Model
//! -----------------
//! * **Coordinates:** `lat`/`lon` in **degrees**. The reduction works in these units
//!   directly (local planar approximation); conversion to meters is a reporting concern,
//!   see [`metrics`](crate::metrics).
//! * **Time:** Unix **milliseconds** (UTC), expected non-decreasing along the sequence.
//!   The ordering is not enforced here; [`Trajectory::is_time_ordered`] lets callers check it.
//! * **Index:** `original_index` is the position of the point in the source sequence.
//!
//! Quick-Start
//! -----------------
//! ```rust
//! use trajsquish::trajectories::Trajectory;
//!
//! let traj = Trajectory::from_points([
//!     (30.66221, 104.09571, 0.0),
//!     (30.66230, 104.09580, 1_000.0),
//! ]);
//! assert_eq!(traj.len(), 2);
//! assert_eq!(traj.points()[1].original_index, 1);
//! ```
use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Millis};

pub mod gps_reader;

/// A single timestamped GPS fix.
///
/// # Fields
///
/// * `original_index` - Position of the fix in the input sequence
/// * `lat` - Latitude in degrees
/// * `lon` - Longitude in degrees
/// * `time` - Unix time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub original_index: usize,
    pub lat: Degree,
    pub lon: Degree,
    pub time: Millis,
}

impl TrajectoryPoint {
    pub fn new(original_index: usize, lat: Degree, lon: Degree, time: Millis) -> Self {
        TrajectoryPoint {
            original_index,
            lat,
            lon,
            time,
        }
    }

    /// Planar position `(lat, lon)` used by the distance computations.
    #[inline]
    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.lat, self.lon)
    }
}

impl fmt::Display for TrajectoryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} {:.6} {:.0}", self.lat, self.lon, self.time)
    }
}

/// Immutable, index-tagged sequence of GPS fixes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Build a trajectory from `(lat, lon, time)` triples.
    ///
    /// Arguments
    /// -----------------
    /// * `samples` – Fixes in input order; `original_index` is assigned from the position.
    ///
    /// Return
    /// ----------
    /// * A [`Trajectory`] whose `i`-th point has `original_index == i`.
    pub fn from_points<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (Degree, Degree, Millis)>,
    {
        let points = samples
            .into_iter()
            .enumerate()
            .map(|(index, (lat, lon, time))| TrajectoryPoint::new(index, lat, lon, time))
            .collect();
        Trajectory { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&TrajectoryPoint> {
        self.points.get(index)
    }

    /// Mean latitude of the trajectory, `None` when empty.
    pub fn mean_latitude(&self) -> Option<Degree> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(|p| p.lat).sum();
        Some(sum / self.points.len() as f64)
    }

    /// Whether timestamps are non-decreasing along the sequence.
    pub fn is_time_ordered(&self) -> bool {
        self.points.windows(2).all(|w| w[0].time <= w[1].time)
    }
}

#[cfg(test)]
mod trajectories_test {
    use super::*;

    #[test]
    fn test_indices_follow_input_order() {
        let traj = Trajectory::from_points([(1.0, 2.0, 0.0), (1.5, 2.5, 10.0), (2.0, 3.0, 20.0)]);

        let indices: Vec<usize> = traj.points().iter().map(|p| p.original_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(traj.get(1).map(|p| p.lat), Some(1.5));
        assert!(traj.get(3).is_none());
    }

    #[test]
    fn test_mean_latitude() {
        assert_eq!(Trajectory::default().mean_latitude(), None);

        let traj = Trajectory::from_points([(10.0, 0.0, 0.0), (20.0, 0.0, 1.0)]);
        assert_eq!(traj.mean_latitude(), Some(15.0));
    }

    #[test]
    fn test_time_ordering() {
        let ordered = Trajectory::from_points([(0.0, 0.0, 0.0), (0.0, 0.0, 0.0), (0.0, 0.0, 5.0)]);
        assert!(ordered.is_time_ordered());

        let unordered = Trajectory::from_points([(0.0, 0.0, 5.0), (0.0, 0.0, 1.0)]);
        assert!(!unordered.is_time_ordered());
    }

    #[test]
    fn test_point_display() {
        let p = TrajectoryPoint::new(0, 30.66221, 104.09571, 1538322843000.0);
        assert_eq!(p.to_string(), "30.662210 104.095710 1538322843000");
    }
}
