use crate::candidate::{CandidateSkeleton, ReconciledPath, persistent_edges, reconcile};
use crate::network::{EdgeId, Network, VehicleClass};
use crate::route::{Objective, RouteError};
use crate::snap::{SnapConfig, Snapper};

use geo::LineString;
use log::{debug, trace};
#[cfg(feature = "tracing")]
use tracing::Level;

/// Builds candidate routes for a trajectory between fixed endpoint edges.
#[derive(Debug)]
pub struct CandidateBuilder<'a, N> {
    network: &'a N,
    snapper: Snapper<'a, N>,

    objective: Objective,
    vehicle_class: Option<VehicleClass>,
}

impl<'a, N: Network> CandidateBuilder<'a, N> {
    pub fn new(network: &'a N) -> Self {
        CandidateBuilder {
            network,
            snapper: Snapper::new(network),
            objective: Objective::Fastest,
            vehicle_class: None,
        }
    }

    pub fn with_snap_config(self, config: SnapConfig) -> Self {
        CandidateBuilder {
            snapper: self.snapper.with_config(config),
            ..self
        }
    }

    /// The objective waypoints are joined under.
    pub fn with_objective(self, objective: Objective) -> Self {
        CandidateBuilder { objective, ..self }
    }

    pub fn with_vehicle_class(self, vehicle_class: Option<VehicleClass>) -> Self {
        CandidateBuilder {
            vehicle_class,
            ..self
        }
    }

    /// Produces one loop-free [`ReconciledPath`] per entry of
    /// `max_distances`, in the same order.
    ///
    /// Every point of `trajectory` (lon, lat) is snapped once. Edges the
    /// trajectory stays on for more than `threshold` consecutive points are
    /// waypoint candidates, filtered per maximum snap distance.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = Level::DEBUG, skip(self, trajectory))
    )]
    pub fn build(
        &self,
        trajectory: &LineString,
        start: EdgeId,
        end: EdgeId,
        max_distances: &[f64],
        threshold: usize,
    ) -> Result<Vec<ReconciledPath>, RouteError> {
        if max_distances.is_empty() {
            return Ok(vec![]);
        }

        let snaps = self.snapper.snap_all(trajectory);
        let unsnapped = snaps.iter().filter(|snap| !snap.is_snapped()).count();
        if unsnapped > 0 {
            debug!("Skipping {unsnapped} of {} unsnappable points", snaps.len());
        }

        let persistent = persistent_edges(&snaps, threshold);
        trace!("Persistent edges: {persistent:?}");

        max_distances
            .iter()
            .map(|max_distance| {
                let skeleton = CandidateSkeleton::select(&persistent, start, end, *max_distance);
                if skeleton.degenerate {
                    trace!("Skeleton at max distance {max_distance} is degenerate");
                }

                reconcile(self.network, &skeleton, self.objective, self.vehicle_class)
                    .map(ReconciledPath::remove_loops)
            })
            .collect()
    }
}

/// Builds candidate routes with the default snapping and a fastest
/// reconciliation, see [`CandidateBuilder::build`].
///
/// ### Example
/// ```rust
/// use geo::wkt;
/// use waymatch::candidate::build_candidates;
/// use waymatch::fixtures::square::{self, A, C};
///
/// let network = square::network().unwrap();
/// let trajectory = wkt! { LINESTRING(2.0 0.0,8.0 0.0,10.0 2.0,10.0 8.0,8.0 10.0,2.0 10.0) };
///
/// let candidates = build_candidates(&network, &trajectory, A, C, &[0.0], 1).unwrap();
/// assert_eq!(candidates[0].edges, vec![square::A, square::B, square::C]);
/// ```
pub fn build_candidates<N: Network>(
    network: &N,
    trajectory: &LineString,
    start: EdgeId,
    end: EdgeId,
    max_distances: &[f64],
    threshold: usize,
) -> Result<Vec<ReconciledPath>, RouteError> {
    CandidateBuilder::new(network).build(trajectory, start, end, max_distances, threshold)
}
