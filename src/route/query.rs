use crate::network::{Edge, EdgeId, VehicleClass};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What a path search minimises.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum Objective {
    /// Total length travelled.
    Shortest,
    /// Total free-flow travel time, `length / speed` per edge.
    #[default]
    Fastest,
}

impl Objective {
    /// The cost of traversing the whole of `edge`.
    #[inline]
    pub fn cost(&self, edge: &Edge) -> f64 {
        edge.length / self.speed(edge)
    }

    /// The divisor applied to lengths under this objective.
    #[inline]
    pub fn speed(&self, edge: &Edge) -> f64 {
        match self {
            Objective::Shortest => 1.0,
            Objective::Fastest => edge.speed,
        }
    }
}

/// A single-pair path search request.
///
/// ### Example
/// ```rust
/// use waymatch::network::EdgeId;
/// use waymatch::route::{Objective, PathQuery};
///
/// let query = PathQuery::new(EdgeId(1), EdgeId(7))
///     .objective(Objective::Shortest)
///     .reversal_penalty(30.0)
///     .max_cost(1_000.0);
///
/// assert_eq!(query.objective, Objective::Shortest);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathQuery {
    pub from: EdgeId,
    pub to: EdgeId,

    /// Offset along `from` at which travel starts.
    pub from_position: f64,
    /// Offset along `to` at which travel ends. Zero stands for the end of the edge.
    pub to_position: f64,

    pub objective: Objective,
    /// Restricts transitions to edges this class may use. `None` permits all.
    pub vehicle_class: Option<VehicleClass>,

    /// Extra cost for moving onto the bidirectional counterpart of the current edge.
    pub reversal_penalty: f64,
    /// Also expand through incoming edges, travelling against their direction.
    pub ignore_direction: bool,
    /// The search gives up once the cheapest open edge costs more than this.
    pub max_cost: f64,

    /// Report the internal edges crossed between normal edges.
    pub with_internal: bool,
    /// Whether the costs of the endpoint edges count towards the total.
    pub include_from_to_cost: bool,
}

impl PathQuery {
    pub fn new(from: EdgeId, to: EdgeId) -> Self {
        PathQuery {
            from,
            to,
            from_position: 0.0,
            to_position: 0.0,
            objective: Objective::default(),
            vehicle_class: None,
            reversal_penalty: 0.0,
            ignore_direction: false,
            max_cost: f64::INFINITY,
            with_internal: false,
            include_from_to_cost: true,
        }
    }

    pub fn objective(self, objective: Objective) -> Self {
        PathQuery { objective, ..self }
    }

    pub fn positions(self, from_position: f64, to_position: f64) -> Self {
        PathQuery {
            from_position,
            to_position,
            ..self
        }
    }

    pub fn vehicle_class(self, vehicle_class: Option<VehicleClass>) -> Self {
        PathQuery {
            vehicle_class,
            ..self
        }
    }

    pub fn reversal_penalty(self, reversal_penalty: f64) -> Self {
        PathQuery {
            reversal_penalty,
            ..self
        }
    }

    pub fn ignore_direction(self, ignore_direction: bool) -> Self {
        PathQuery {
            ignore_direction,
            ..self
        }
    }

    pub fn max_cost(self, max_cost: f64) -> Self {
        PathQuery { max_cost, ..self }
    }

    pub fn with_internal(self, with_internal: bool) -> Self {
        PathQuery {
            with_internal,
            ..self
        }
    }

    pub fn include_from_to_cost(self, include_from_to_cost: bool) -> Self {
        PathQuery {
            include_from_to_cost,
            ..self
        }
    }

    /// Whether the search must leave `from` and loop back onto it, because
    /// the requested end position lies behind the start position.
    #[inline]
    pub(crate) fn loops_back(&self) -> bool {
        self.from == self.to && self.from_position > self.to_position && !self.ignore_direction
    }
}

/// The outcome of a path search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathResult {
    /// The cheapest path, ordered from origin to destination.
    Found { edges: Vec<EdgeId>, cost: f64 },

    /// The destination was not reached. Carries the cost at which the
    /// search stopped, infinite when it ran out of edges to explore.
    NotFound { cost: f64 },
}

impl PathResult {
    pub fn edges(&self) -> Option<&[EdgeId]> {
        match self {
            PathResult::Found { edges, .. } => Some(edges),
            PathResult::NotFound { .. } => None,
        }
    }

    pub fn cost(&self) -> f64 {
        match self {
            PathResult::Found { cost, .. } | PathResult::NotFound { cost } => *cost,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found { .. })
    }

    pub fn into_edges(self) -> Option<Vec<EdgeId>> {
        match self {
            PathResult::Found { edges, .. } => Some(edges),
            PathResult::NotFound { .. } => None,
        }
    }
}
