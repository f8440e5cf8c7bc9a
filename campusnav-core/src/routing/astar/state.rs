use std::cmp::Ordering;

use crate::{NodeId, Seconds};

/// Open-set entry ordered by estimated total cost
#[derive(Copy, Clone, Debug)]
pub(super) struct State {
    /// Tentative cost plus heuristic
    pub(super) estimate: Seconds,
    /// Insertion order, earlier entries win ties
    pub(super) sequence: u64,
    pub(super) node: NodeId,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by estimate, then by sequence (reversed from standard Rust BinaryHeap)
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
