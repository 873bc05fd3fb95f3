//! SQUISH-E reduction state machine.
//!
//! ```text
//!   Ingesting ──(input exhausted)──▶ PostPassCompacting ──(min priority > ε or size < 3)──▶ Done
//! ```
//!
//! **Ingesting**: for every input point, in order:
//! 1. raise the capacity to `initial_capacity + ⌊ingested / ratio⌋` (never lowered),
//! 2. append the point at the tail,
//! 3. rank the previous tail, which just became interior,
//! 4. if the working set reached the capacity, evict the lowest-priority interior entry.
//!
//! **PostPassCompacting**: keep evicting the lowest-priority interior entry while its
//! priority is within `epsilon` and at least one interior entry remains.
//!
//! An eviction charges the evicted priority to both neighbours (`pi = max(pi, p)`), removes
//! the entry, then re-ranks the two entries whose neighbourhood changed.
use log::{debug, trace};

use crate::{
    squish_e::{params::SquishParams, working_set::WorkingSet},
    trajectories::TrajectoryPoint,
};

/// Current stage of a [`ReductionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ingesting,
    PostPassCompacting,
    Done,
}

/// Number of entries evicted in each phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvictionCounts {
    pub online: usize,
    pub post_pass: usize,
}

impl EvictionCounts {
    pub fn total(&self) -> usize {
        self.online + self.post_pass
    }
}

/// Bounded-memory online reducer for a single trajectory.
///
/// One engine processes one trajectory: feed points with [`ingest`](Self::ingest) in time
/// order, then call [`finish`](Self::finish). The engine owns its working set and shares
/// no state, so independent trajectories can be reduced by independent engines.
///
/// ```rust
/// use trajsquish::squish_e::{ReductionEngine, SquishParams};
/// use trajsquish::trajectories::Trajectory;
///
/// let traj = Trajectory::from_points((0..10).map(|i| (0.0, i as f64, i as f64)));
/// let mut engine = ReductionEngine::new(SquishParams::default());
/// for point in traj.points() {
///     engine.ingest(*point);
/// }
/// let kept = engine.finish();
/// assert_eq!(kept.first(), traj.points().first());
/// assert_eq!(kept.last(), traj.points().last());
/// ```
#[derive(Debug)]
pub struct ReductionEngine {
    params: SquishParams,
    working_set: WorkingSet,
    capacity: usize,
    ingested: usize,
    phase: Phase,
    evictions: EvictionCounts,
}

impl ReductionEngine {
    /// Start a run.
    ///
    /// Panics
    /// ----------
    /// * If `params` fails [`SquishParams::validate`] (fields set without the builder).
    pub fn new(params: SquishParams) -> Self {
        if let Err(err) = params.validate() {
            panic!("invalid reduction parameters: {err}");
        }
        ReductionEngine {
            working_set: WorkingSet::with_capacity(params.initial_capacity),
            capacity: params.initial_capacity,
            ingested: 0,
            phase: Phase::Ingesting,
            evictions: EvictionCounts::default(),
            params,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current working-set size.
    #[inline]
    pub fn len(&self) -> usize {
        self.working_set.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.working_set.len() == 0
    }

    #[inline]
    pub fn ingested(&self) -> usize {
        self.ingested
    }

    #[inline]
    pub fn evictions(&self) -> EvictionCounts {
        self.evictions
    }

    /// Feed the next point of the trajectory.
    ///
    /// Panics
    /// ----------
    /// * If the post-pass has already started.
    pub fn ingest(&mut self, point: TrajectoryPoint) {
        assert_eq!(
            self.phase,
            Phase::Ingesting,
            "cannot ingest once the post-pass has started"
        );

        self.capacity = self
            .capacity
            .max(self.params.capacity_after(self.ingested));
        self.working_set.append(point);
        self.ingested += 1;

        let len = self.working_set.len();
        if len >= 3 {
            self.working_set.refresh_priority(len - 2);
        }

        if len == self.capacity {
            if let Some((index, _)) = self.working_set.argmin_interior() {
                self.evict(index);
                self.evictions.online += 1;
            }
        }
    }

    /// Run one post-pass iteration.
    ///
    /// Return
    /// ----------
    /// * `Some(priority)` of the evicted entry, or `None` once the run is [`Phase::Done`].
    pub fn compact_step(&mut self) -> Option<f64> {
        match self.phase {
            Phase::Done => return None,
            Phase::Ingesting => {
                debug!(
                    "Ingestion finished: {} points in, {} retained, capacity {}, {} evictions",
                    self.ingested,
                    self.working_set.len(),
                    self.capacity,
                    self.evictions.online
                );
                self.phase = Phase::PostPassCompacting;
            }
            Phase::PostPassCompacting => {}
        }

        let candidate = self
            .working_set
            .argmin_interior()
            .filter(|&(_, priority)| priority <= self.params.epsilon);

        match candidate {
            Some((index, priority)) => {
                self.evict(index);
                self.evictions.post_pass += 1;
                Some(priority)
            }
            None => {
                debug!(
                    "Post-pass finished: {} retained after {} further evictions",
                    self.working_set.len(),
                    self.evictions.post_pass
                );
                self.phase = Phase::Done;
                None
            }
        }
    }

    /// Run the post-pass to completion and return the retained points in input order.
    pub fn finish(mut self) -> Vec<TrajectoryPoint> {
        while self.compact_step().is_some() {}
        self.working_set.into_points()
    }

    fn evict(&mut self, index: usize) -> f64 {
        let evicted = self.working_set.remove_interior(index);
        let priority = evicted.priority();

        // Former neighbours now sit at `index - 1` and `index`.
        self.working_set.absorb(index - 1, priority);
        self.working_set.absorb(index, priority);
        self.working_set.refresh_priority(index - 1);
        self.working_set.refresh_priority(index);

        trace!(
            "Evicted point #{} with priority {priority:e}",
            evicted.point.original_index
        );
        priority
    }
}
