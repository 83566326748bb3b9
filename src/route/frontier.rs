use crate::network::EdgeId;

use std::cmp::Ordering;

/// An open entry of a best-first search.
///
/// Orders so that a [`BinaryHeap`](std::collections::BinaryHeap) pops the
/// cheapest entry first, and among equal costs the smallest edge identifier.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frontier {
    pub cost: f64,
    pub edge: EdgeId,
}

impl Frontier {
    #[inline]
    pub fn new(cost: f64, edge: EdgeId) -> Self {
        Frontier { cost, edge }
    }
}

impl PartialEq for Frontier {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.edge.cmp(&self.edge))
    }
}
