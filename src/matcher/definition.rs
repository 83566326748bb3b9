use crate::network::EdgeId;

use geo::LineString;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The strategy that produced a [`MatchResult`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    /// The fastest route between the endpoint edges.
    Fastest,
    /// The shortest route between the endpoint edges.
    Shortest,
    /// A candidate route from the adaptive grid search.
    Adaptive { max_distance: f64, threshold: usize },
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Fastest => write!(f, "fastest"),
            Strategy::Shortest => write!(f, "shortest"),
            Strategy::Adaptive {
                max_distance,
                threshold,
            } => write!(f, "adaptive(max_distance={max_distance}, threshold={threshold})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The matched route, from the start edge to the end edge.
    pub edges: Vec<EdgeId>,
    /// SSPD between the route and the trajectory. Lower is better.
    pub score: f64,
    /// Physical length of the route, junction interiors included.
    pub length: f64,
    pub strategy: Strategy,
}

/// One trajectory to match, for [`Matcher::match_batch`](crate::matcher::Matcher::match_batch).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Observed (lon, lat) positions, in order.
    pub trajectory: LineString,
    pub start: EdgeId,
    pub end: EdgeId,
}

impl MatchRequest {
    pub fn new(trajectory: LineString, start: EdgeId, end: EdgeId) -> Self {
        MatchRequest {
            trajectory,
            start,
            end,
        }
    }
}
