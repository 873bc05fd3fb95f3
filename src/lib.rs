//! # trajsquish
//!
//! Online simplification of GPS trajectories with the SQUISH-E algorithm.
//!
//! A trajectory (time-ordered `lat, lon, time` fixes) is reduced to a subset of its
//! points while bounding the synchronized Euclidean error of every removal. The
//! reduction runs in bounded memory: points are streamed into a working set whose
//! capacity grows with the amount of input consumed.
//!
//! ## Crate map
//! -----------------
//! * [`trajectories`] – point store and the GPS text reader.
//! * [`sed`] – synchronized Euclidean distance.
//! * [`squish_e`] – the reduction engine and its parameters.
//! * [`metrics`] / [`report`] – quality measures and the text report of a run.
//!
//! ```rust
//! use trajsquish::{reduce, SquishParams, Trajectory};
//!
//! let traj = Trajectory::from_points([
//!     (30.0, 104.0, 0.0),
//!     (30.5, 104.5, 1_000.0),
//!     (31.0, 105.0, 2_000.0),
//! ]);
//! // The middle fix is exactly where uniform motion puts it: no error to keep it for.
//! let kept = reduce(traj.points(), &SquishParams::default());
//! assert_eq!(kept.len(), 2);
//! ```
pub mod constants;
pub mod metrics;
pub mod report;
pub mod sed;
pub mod squish_e;
pub mod squish_errors;
pub mod trajectories;

pub use squish_e::{reduce, reduce_with_cancel, ReductionEngine, SquishParams};
pub use squish_errors::SquishError;
pub use trajectories::{Trajectory, TrajectoryPoint};
