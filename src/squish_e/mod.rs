//! # SQUISH-E: bounded-memory online trajectory reduction
//!
//! Simplifies a time-ordered GPS trajectory into a subset of its points while bounding
//! the synchronized error ([`sed`](crate::sed::sed)) introduced by every removal.
//!
//! ## Overview
//! -----------------
//! Points are consumed one at a time into a capacity-limited working set. Each retained
//! interior point carries a **priority**: the error its removal would introduce, plus the
//! largest error already charged to it by evicted neighbours. Whenever the working set
//! reaches its capacity, the lowest-priority interior point is evicted. The capacity grows
//! by one every `ratio` ingested points. Once the input is exhausted, a post-pass keeps
//! evicting while the lowest priority stays within the `epsilon` error budget.
//!
//! The first and last points (anchors) are never removed.
//!
//! Modules
//! -----------------
//! * `params` – [`SquishParams`] and its validating [`SquishParamsBuilder`].
//! * `engine` – [`ReductionEngine`], the `Ingesting → PostPassCompacting → Done` state machine.
//! * *(crate-private)* `working_set` – ordered buffer with anchor-protected removal.
//! * *(crate-private)* `ledger` – per-point `pi`/priority bookkeeping.
//!
//! Entry points
//! -----------------
//! * [`reduce`] – one full run over a slice of points.
//! * [`reduce_with_cancel`] – same, polling a cancellation flag between ingestion steps.
//!
//! ```rust
//! use trajsquish::squish_e::{reduce, SquishParams};
//! use trajsquish::trajectories::Trajectory;
//!
//! let traj = Trajectory::from_points((0..100).map(|i| {
//!     let t = i as f64;
//!     (0.01 * (t / 7.0).sin(), 0.001 * t, t * 1_000.0)
//! }));
//! let params = SquishParams::builder().ratio(10.0).epsilon(1e-4).build().unwrap();
//!
//! let kept = reduce(traj.points(), &params);
//! assert!(kept.len() < traj.len());
//! assert_eq!(kept[0].original_index, 0);
//! assert_eq!(kept[kept.len() - 1].original_index, 99);
//! ```
use log::debug;

use crate::{squish_errors::SquishError, trajectories::TrajectoryPoint};

mod engine;
mod ledger;
mod params;
mod working_set;

pub use engine::{EvictionCounts, Phase, ReductionEngine};
pub use params::{SquishParams, SquishParamsBuilder};

/// Reduce a trajectory with SQUISH-E.
///
/// Arguments
/// -----------------
/// * `points` – Time-ordered input fixes (ordering is the caller's responsibility).
/// * `params` – Validated reduction parameters.
///
/// Return
/// ----------
/// * The retained points, in input order. Inputs of 0, 1 or 2 points come back unchanged.
pub fn reduce(points: &[TrajectoryPoint], params: &SquishParams) -> Vec<TrajectoryPoint> {
    let mut engine = ReductionEngine::new(params.clone());
    for point in points {
        engine.ingest(*point);
    }
    finish_logged(engine)
}

/// Reduce a trajectory, checking `should_cancel()` before each ingestion step.
///
/// Return
/// ----------
/// * `Ok(points)` as for [`reduce`].
/// * `Err(SquishError::Cancelled { ingested })` as soon as `should_cancel()` returns `true`.
pub fn reduce_with_cancel<F>(
    points: &[TrajectoryPoint],
    params: &SquishParams,
    mut should_cancel: F,
) -> Result<Vec<TrajectoryPoint>, SquishError>
where
    F: FnMut() -> bool,
{
    let mut engine = ReductionEngine::new(params.clone());
    for point in points {
        if should_cancel() {
            debug!("Reduction cancelled after {} points", engine.ingested());
            return Err(SquishError::Cancelled {
                ingested: engine.ingested(),
            });
        }
        engine.ingest(*point);
    }
    Ok(finish_logged(engine))
}

fn finish_logged(mut engine: ReductionEngine) -> Vec<TrajectoryPoint> {
    while engine.compact_step().is_some() {}
    let evictions = engine.evictions();
    debug!(
        "SQUISH-E kept {} of {} points ({} evictions: {} online + {} post-pass, final capacity {})",
        engine.len(),
        engine.ingested(),
        evictions.total(),
        evictions.online,
        evictions.post_pass,
        engine.capacity()
    );
    engine.finish()
}
