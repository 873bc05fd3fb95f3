//! Per-point error bookkeeping of the working set.
//!
//! Each retained point carries two numbers:
//!
//! * `pi` – the largest priority of any neighbour that was evicted next to it, i.e. the
//!   worst error this point now has to vouch for. Absorption is **max-based**, not a sum.
//! * `priority` – `pi + sed(prev, point, next)`, the error estimate if the point itself
//!   were removed next. Anchors (no `prev` or no `next`) keep `+∞`.
use crate::{sed::sed, trajectories::TrajectoryPoint};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    pub(crate) point: TrajectoryPoint,
    pi: f64,
    priority: f64,
}

impl Entry {
    pub(crate) fn new(point: TrajectoryPoint) -> Self {
        Entry {
            point,
            pi: 0.0,
            priority: f64::INFINITY,
        }
    }

    #[cfg(test)]
    pub(crate) fn pi(&self) -> f64 {
        self.pi
    }

    #[inline]
    pub(crate) fn priority(&self) -> f64 {
        self.priority
    }

    /// Recompute the priority from the current 3-point neighbourhood.
    ///
    /// No-op when either neighbour is missing (the entry is an anchor).
    pub(crate) fn recompute_priority(
        &mut self,
        prev: Option<&TrajectoryPoint>,
        next: Option<&TrajectoryPoint>,
    ) {
        if let (Some(prev), Some(next)) = (prev, next) {
            self.priority = self.pi + sed(prev, &self.point, next);
        }
    }

    /// Charge the error of an evicted neighbour to this entry.
    #[inline]
    pub(crate) fn absorb(&mut self, incoming_pi: f64) {
        self.pi = self.pi.max(incoming_pi);
    }
}

#[cfg(test)]
mod ledger_test {
    use super::*;
    use approx::assert_relative_eq;

    fn pt(lat: f64, lon: f64, time: f64) -> TrajectoryPoint {
        TrajectoryPoint::new(0, lat, lon, time)
    }

    #[test]
    fn test_new_entry_is_unranked() {
        let entry = Entry::new(pt(0.0, 0.0, 0.0));
        assert_eq!(entry.pi(), 0.0);
        assert_eq!(entry.priority(), f64::INFINITY);
    }

    #[test]
    fn test_anchor_recompute_is_noop() {
        let mut entry = Entry::new(pt(1.0, 1.0, 1.0));
        let other = pt(0.0, 0.0, 0.0);

        entry.recompute_priority(None, Some(&other));
        assert_eq!(entry.priority(), f64::INFINITY);
        entry.recompute_priority(Some(&other), None);
        assert_eq!(entry.priority(), f64::INFINITY);
    }

    #[test]
    fn test_priority_adds_pi_to_sed() {
        let prev = pt(0.0, 0.0, 0.0);
        let next = pt(0.0, 2.0, 2.0);
        let mut entry = Entry::new(pt(1.0, 1.0, 1.0));

        entry.recompute_priority(Some(&prev), Some(&next));
        assert_relative_eq!(entry.priority(), 1.0, epsilon = 1e-12);

        entry.absorb(0.5);
        entry.recompute_priority(Some(&prev), Some(&next));
        assert_relative_eq!(entry.priority(), 1.5, epsilon = 1e-12);
        assert!(entry.priority() >= entry.pi());
    }

    #[test]
    fn test_absorb_keeps_the_maximum() {
        let mut entry = Entry::new(pt(0.0, 0.0, 0.0));
        entry.absorb(0.3);
        entry.absorb(0.1);
        assert_eq!(entry.pi(), 0.3);
        entry.absorb(0.3);
        assert_eq!(entry.pi(), 0.3);
        entry.absorb(0.7);
        assert_eq!(entry.pi(), 0.7);
    }
}
