//! Ordered, capacity-bounded buffer of retained points.
//!
//! Entries stay in input (time) order; they are only ever appended at the tail or
//! removed from the interior. Index `0` and `len - 1` are the anchors.
use itertools::Itertools;

use crate::{squish_e::ledger::Entry, trajectories::TrajectoryPoint};

#[derive(Debug, Default)]
pub(crate) struct WorkingSet {
    entries: Vec<Entry>,
}

impl WorkingSet {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        WorkingSet {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Push a new unranked entry at the tail.
    pub(crate) fn append(&mut self, point: TrajectoryPoint) {
        self.entries.push(Entry::new(point));
    }

    /// Entries immediately before and after `index`, `None` past either end.
    pub(crate) fn neighbors(&self, index: usize) -> (Option<&Entry>, Option<&Entry>) {
        let prev = index.checked_sub(1).and_then(|i| self.entries.get(i));
        let next = self.entries.get(index + 1);
        (prev, next)
    }

    /// Remove an interior entry.
    ///
    /// Panics
    /// ----------
    /// * If `index` is an anchor or out of range (`0 < index < len - 1` must hold).
    pub(crate) fn remove_interior(&mut self, index: usize) -> Entry {
        assert!(
            index > 0 && index + 1 < self.entries.len(),
            "cannot remove entry {index} from a working set of size {}: not an interior entry",
            self.entries.len()
        );
        self.entries.remove(index)
    }

    /// Recompute the priority of `index` from its current neighbours (no-op on anchors).
    pub(crate) fn refresh_priority(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        let (prev, next) = self.neighbors(index);
        let (prev, next) = (prev.map(|e| e.point), next.map(|e| e.point));
        self.entries[index].recompute_priority(prev.as_ref(), next.as_ref());
    }

    pub(crate) fn absorb(&mut self, index: usize, incoming_pi: f64) {
        self.entries[index].absorb(incoming_pi);
    }

    /// Interior entry with the lowest priority, earliest index on ties.
    pub(crate) fn argmin_interior(&self) -> Option<(usize, f64)> {
        if self.entries.len() < 3 {
            return None;
        }
        let interior = &self.entries[1..self.entries.len() - 1];
        interior
            .iter()
            .position_min_by(|a, b| a.priority().total_cmp(&b.priority()))
            .map(|offset| {
                let index = offset + 1;
                (index, self.entries[index].priority())
            })
    }

    pub(crate) fn into_points(self) -> Vec<TrajectoryPoint> {
        self.entries.into_iter().map(|e| e.point).collect()
    }
}
