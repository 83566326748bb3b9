use crate::candidate::{CandidateSkeleton, ReconciledPath};
use crate::network::{EdgeId, Network, VehicleClass};
use crate::route::{Objective, PathQuery, PathResult, RouteError, find_optimal_path};

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Splices the optimal path between every consecutive pair of skeleton
/// waypoints into one contiguous route.
///
/// Pairs without a path are skipped. Repeated edges at the splice
/// boundaries are collapsed. Unknown waypoints are an error.
pub fn reconcile<N: Network>(
    network: &N,
    skeleton: &CandidateSkeleton,
    objective: Objective,
    vehicle_class: Option<VehicleClass>,
) -> Result<ReconciledPath, RouteError> {
    let mut edges = Vec::with_capacity(skeleton.edges.len() * 2);

    for (from, to) in skeleton.edges.iter().copied().tuple_windows() {
        let query = PathQuery::new(from, to)
            .objective(objective)
            .vehicle_class(vehicle_class);

        match find_optimal_path(network, &query)? {
            PathResult::Found { edges: path, .. } => edges.extend(path),
            PathResult::NotFound { .. } => {
                debug!(
                    "No path between waypoints {from} and {to} at max distance {}, skipping",
                    skeleton.max_distance
                );
            }
        }
    }

    edges.dedup();

    Ok(ReconciledPath {
        max_distance: skeleton.max_distance,
        edges,
    })
}

/// Cuts the detour between the first and last occurrence of every repeated
/// edge, leaving one occurrence.
///
/// Repeated edges are handled once each, in order of first appearance, on
/// the path as left by the previous cut. The result holds no repeated edge.
///
/// ### Example
/// ```rust
/// use waymatch::candidate::remove_loops;
/// use waymatch::network::EdgeId;
///
/// let path = [1, 2, 3, 4, 2, 5].map(EdgeId);
/// assert_eq!(remove_loops(&path), [1, 2, 5].map(EdgeId).to_vec());
/// ```
pub fn remove_loops(edges: &[EdgeId]) -> Vec<EdgeId> {
    let mut occurrences = FxIndexMap::<EdgeId, usize>::default();
    for edge in edges {
        *occurrences.entry(*edge).or_default() += 1;
    }

    let mut path = edges.to_vec();
    for (edge, _) in occurrences.into_iter().filter(|(_, count)| *count > 1) {
        let first = path.iter().position(|candidate| *candidate == edge);
        let last = path.iter().rposition(|candidate| *candidate == edge);

        if let (Some(first), Some(last)) = (first, last) {
            path.drain(first..last);
        }
    }

    path
}

impl ReconciledPath {
    pub fn remove_loops(self) -> Self {
        ReconciledPath {
            edges: remove_loops(&self.edges),
            ..self
        }
    }
}
