use crate::candidate::CandidateBuilder;
use crate::matcher::{MatchError, MatchResult, Matcher, Strategy};
use crate::network::{EdgeId, Network};

use geo::LineString;
use log::debug;

impl<N: Network> Matcher<'_, N> {
    /// Searches the grid of consecutive-run thresholds (outer) and maximum
    /// snap distances (inner) for the best-scoring candidate route.
    ///
    /// With early stopping, the first candidate within the acceptance
    /// threshold is returned. Equal scores keep the earlier grid cell.
    /// Yields `None` for an empty grid.
    pub fn match_adaptive(
        &self,
        trajectory: &LineString,
        start: EdgeId,
        end: EdgeId,
    ) -> Result<Option<MatchResult>, MatchError> {
        if trajectory.0.is_empty() {
            return Err(MatchError::NoPointsProvided);
        }

        let builder = CandidateBuilder::new(self.network)
            .with_snap_config(self.config.snap)
            .with_objective(self.config.reconcile_objective)
            .with_vehicle_class(self.config.vehicle_class);

        let mut best: Option<MatchResult> = None;

        for threshold in &self.config.thresholds {
            let candidates =
                builder.build(trajectory, start, end, &self.config.max_distances, *threshold)?;

            for candidate in candidates {
                let strategy = Strategy::Adaptive {
                    max_distance: candidate.max_distance,
                    threshold: *threshold,
                };

                let result = self.score(trajectory, candidate.edges, strategy)?;
                debug!("Grid cell {strategy} scored {}", result.score);

                if self.config.early_stop && self.config.accepts(result.score) {
                    debug!("Stopping the grid early at {strategy}");
                    return Ok(Some(result));
                }

                if best.as_ref().is_none_or(|best| result.score < best.score) {
                    best = Some(result);
                }
            }
        }

        Ok(best)
    }
}
