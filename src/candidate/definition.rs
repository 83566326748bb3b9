use crate::network::EdgeId;
use crate::snap::Snap;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Skeletons with fewer waypoints than this collapse to `[start, end]`.
const MIN_WAYPOINTS: usize = 3;

/// The edges a trajectory lingers on, in order of appearance.
///
/// Unsnappable points are dropped, then consecutive snaps to the same edge
/// are grouped into runs. Only runs strictly longer than `threshold` are
/// kept. Each kept edge carries the distance of its first snap.
///
/// An edge may appear more than once if the trajectory returns to it.
pub fn persistent_edges(snaps: &[Snap], threshold: usize) -> Vec<(EdgeId, f64)> {
    let snapped = snaps
        .iter()
        .filter_map(|snap| snap.edge.map(|edge| (edge, snap.distance)))
        .collect_vec();

    let mut first_distance = FxHashMap::default();
    for (edge, distance) in &snapped {
        first_distance.entry(*edge).or_insert(*distance);
    }

    snapped
        .iter()
        .map(|(edge, _)| *edge)
        .dedup_with_count()
        .filter(|(count, _)| *count > threshold)
        .filter_map(|(_, edge)| first_distance.get(&edge).map(|distance| (edge, *distance)))
        .collect()
}

/// Ordered waypoints selected for one maximum snap distance. Consecutive
/// waypoints need not be adjacent in the network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateSkeleton {
    pub max_distance: f64,
    pub edges: Vec<EdgeId>,
    /// Too few waypoints survived, the skeleton is a direct `[start, end]` attempt.
    pub degenerate: bool,
}

impl CandidateSkeleton {
    /// Selects the persistent edges whose first snap lies within
    /// `max_distance`, each edge once, and frames them with `start` and `end`.
    ///
    /// ### Example
    /// ```rust
    /// use waymatch::candidate::CandidateSkeleton;
    /// use waymatch::network::EdgeId;
    ///
    /// let persistent = [(EdgeId(2), 0.0), (EdgeId(3), 0.5), (EdgeId(4), 0.0), (EdgeId(5), 0.0)];
    /// let skeleton = CandidateSkeleton::select(&persistent, EdgeId(1), EdgeId(5), 0.1);
    ///
    /// assert_eq!(skeleton.edges, vec![EdgeId(1), EdgeId(2), EdgeId(4), EdgeId(5)]);
    /// ```
    pub fn select(
        persistent: &[(EdgeId, f64)],
        start: EdgeId,
        end: EdgeId,
        max_distance: f64,
    ) -> Self {
        let mut edges = persistent
            .iter()
            .filter(|(_, distance)| *distance <= max_distance)
            .map(|(edge, _)| *edge)
            .unique()
            .collect_vec();

        if edges.len() < MIN_WAYPOINTS {
            return CandidateSkeleton {
                max_distance,
                edges: vec![start, end],
                degenerate: true,
            };
        }

        if edges.first() != Some(&start) {
            edges.insert(0, start);
        }

        if edges.last() != Some(&end) {
            edges.push(end);
        }

        CandidateSkeleton {
            max_distance,
            edges,
            degenerate: false,
        }
    }
}

/// A contiguous route built from a [`CandidateSkeleton`]. Consecutive edges
/// are adjacent in the network, possibly through folded internal edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconciledPath {
    pub max_distance: f64,
    pub edges: Vec<EdgeId>,
}
