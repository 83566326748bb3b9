use crate::matcher::{MatchConfig, MatchError, MatchRequest, MatchResult, Strategy};
use crate::metric::sspd;
use crate::network::{EdgeId, Network};
use crate::route::{Objective, PathQuery, PathResult, RouteError, find_optimal_path};
use crate::trip::Trip;

use geo::LineString;
use log::{debug, info, warn};
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::Level;

/// A fallible strategy yielding at most one scored route.
type Attempt<'s> = &'s dyn Fn() -> Result<Option<MatchResult>, MatchError>;

/// Matches trajectories onto a [`Network`].
///
/// Strategies are tried in order: the fastest route, the shortest route,
/// then the adaptive candidate search. The first result scoring within the
/// acceptance threshold is returned, otherwise the best scoring one. Equal
/// scores keep the earlier strategy.
///
/// ### Example
/// ```rust
/// use geo::wkt;
/// use waymatch::fixtures::square::{self, A};
/// use waymatch::matcher::{Matcher, Strategy};
///
/// let network = square::network().unwrap();
/// let trajectory = wkt! { LINESTRING(0.0 0.0,2.5 0.0,5.0 0.0,7.5 0.0,10.0 0.0) };
///
/// let result = Matcher::new(&network).match_trajectory(&trajectory, A, A).unwrap();
///
/// assert_eq!(result.edges, vec![A]);
/// assert_eq!(result.strategy, Strategy::Fastest);
/// assert!(result.score < 1e-9);
/// ```
#[derive(Debug)]
pub struct Matcher<'a, N> {
    pub(crate) network: &'a N,
    pub(crate) config: MatchConfig,
}

impl<'a, N: Network> Matcher<'a, N> {
    pub fn new(network: &'a N) -> Self {
        Matcher {
            network,
            config: MatchConfig::default(),
        }
    }

    pub fn with_config(self, config: MatchConfig) -> Self {
        Matcher { config, ..self }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Matches the (lon, lat) `trajectory` between the `start` and `end` edges.
    ///
    /// Always yields a route unless the trajectory is empty or an endpoint
    /// is unknown. At worst the route is the direct `[start, end]`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = Level::INFO, skip(self, trajectory), err(level = Level::ERROR))
    )]
    pub fn match_trajectory(
        &self,
        trajectory: &LineString,
        start: EdgeId,
        end: EdgeId,
    ) -> Result<MatchResult, MatchError> {
        let mut best = self.match_fastest(trajectory, start, end)?;
        if self.config.accepts(best.score) {
            info!("Accepted {} match with score {}", best.strategy, best.score);
            return Ok(best);
        }

        let alternatives: [Attempt; 2] = [
            &|| self.match_shortest(trajectory, start, end).map(Some),
            &|| self.match_adaptive(trajectory, start, end),
        ];

        for attempt in alternatives {
            let Some(candidate) = attempt()? else {
                continue;
            };

            debug!("Strategy {} scored {}", candidate.strategy, candidate.score);
            if self.config.accepts(candidate.score) {
                info!(
                    "Accepted {} match with score {}",
                    candidate.strategy, candidate.score
                );
                return Ok(candidate);
            }

            if candidate.score < best.score {
                best = candidate;
            }
        }

        info!("Best match is {} with score {}", best.strategy, best.score);
        Ok(best)
    }

    /// Scores the fastest route between the endpoint edges.
    pub fn match_fastest(
        &self,
        trajectory: &LineString,
        start: EdgeId,
        end: EdgeId,
    ) -> Result<MatchResult, MatchError> {
        self.match_direct(trajectory, start, end, Objective::Fastest)
    }

    /// Scores the shortest route between the endpoint edges.
    pub fn match_shortest(
        &self,
        trajectory: &LineString,
        start: EdgeId,
        end: EdgeId,
    ) -> Result<MatchResult, MatchError> {
        self.match_direct(trajectory, start, end, Objective::Shortest)
    }

    /// Matches every request in parallel. Results keep the request order.
    pub fn match_batch(&self, requests: &[MatchRequest]) -> Vec<Result<MatchResult, MatchError>>
    where
        N: Sync,
    {
        requests
            .par_iter()
            .map(|request| self.match_trajectory(&request.trajectory, request.start, request.end))
            .collect()
    }

    fn match_direct(
        &self,
        trajectory: &LineString,
        start: EdgeId,
        end: EdgeId,
        objective: Objective,
    ) -> Result<MatchResult, MatchError> {
        if trajectory.0.is_empty() {
            return Err(MatchError::NoPointsProvided);
        }

        let query = PathQuery::new(start, end)
            .objective(objective)
            .vehicle_class(self.config.vehicle_class);

        let edges = match find_optimal_path(self.network, &query)? {
            PathResult::Found { edges, .. } => edges,
            PathResult::NotFound { cost } => {
                warn!("No {objective} route from {start} to {end} (stopped at {cost}), using the direct pair");

                let mut direct = vec![start, end];
                direct.dedup();
                direct
            }
        };

        let strategy = match objective {
            Objective::Fastest => Strategy::Fastest,
            Objective::Shortest => Strategy::Shortest,
        };

        self.score(trajectory, edges, strategy)
    }

    /// Materialises `edges` and scores them against the trajectory.
    pub(crate) fn score(
        &self,
        trajectory: &LineString,
        edges: Vec<EdgeId>,
        strategy: Strategy,
    ) -> Result<MatchResult, MatchError> {
        let trip = Trip::new_with_network(self.network, &edges).map_err(RouteError::from)?;
        let score = sspd(trip.linestring(), trajectory);
        let length = trip.length(self.network)?;

        Ok(MatchResult {
            edges: trip.into_parts().0,
            score,
            length,
            strategy,
        })
    }
}
