use crate::network::error::NetworkError;

use geo::Coord;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Stable identifier of a directed road segment.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EdgeId(pub u64);

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(value: u64) -> Self {
        EdgeId(value)
    }
}

/// Identifier of a junction between edges.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// The role an edge plays in the network.
///
/// Internal edges live inside intersections. Their cost is folded into the
/// transition between the two normal edges they join.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, StrumDisplay, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum EdgeFunction {
    #[default]
    Normal,
    Internal,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    StrumDisplay,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum VehicleClass {
    Passenger,
    Bus,
    Truck,
    Delivery,
    Emergency,
    Bicycle,
    Pedestrian,
}

/// A directed road segment, as exposed by a [`Network`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,

    /// Length in projected units, never negative.
    pub length: f64,
    /// Free-flow speed, strictly positive.
    pub speed: f64,

    /// Projected coordinate of the from-node.
    pub from: Coord,
    /// Projected coordinate of the to-node.
    pub to: Coord,

    pub function: EdgeFunction,
    /// The edge running the opposite way over the same geometry, if any.
    pub bidi: Option<EdgeId>,

    /// The vehicle classes permitted on this edge. Empty permits every class.
    pub allowed: SmallVec<[VehicleClass; 4]>,
}

impl Edge {
    #[inline]
    pub fn is_internal(&self) -> bool {
        self.function == EdgeFunction::Internal
    }

    /// Whether `class` may travel this edge. `None` matches any edge.
    #[inline]
    pub fn permits(&self, class: Option<VehicleClass>) -> bool {
        match class {
            Some(class) => self.allowed.is_empty() || self.allowed.contains(&class),
            None => true,
        }
    }
}

/// Metadata on an edge-to-edge transition.
///
/// Each entry of `via` is the first internal edge of one lane-level
/// connection realising the transition. A connector without vias is a
/// direct transition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub via: SmallVec<[EdgeId; 2]>,
}

impl Connector {
    pub fn direct() -> Self {
        Self::default()
    }

    pub fn via(edges: impl IntoIterator<Item = EdgeId>) -> Self {
        Connector {
            via: edges.into_iter().collect(),
        }
    }

    #[inline]
    pub fn is_direct(&self) -> bool {
        self.via.is_empty()
    }
}

/// The query capability the matching core needs from a road network.
///
/// The network is read-only for the duration of every call made against it.
/// Implementations which can be reloaded must hand out a frozen snapshot.
pub trait Network {
    /// Resolves an edge, failing with [`NetworkError::UnknownEdge`] when absent.
    fn edge(&self, id: EdgeId) -> Result<&Edge, NetworkError>;

    /// Successors of `edge` which `class` may enter, with the connector used
    /// to cross into each. From a normal edge only normal successors are
    /// yielded; from an internal edge every successor is, so internal chains
    /// can be walked.
    fn allowed_outgoing<'a>(
        &'a self,
        edge: EdgeId,
        class: Option<VehicleClass>,
    ) -> impl Iterator<Item = (EdgeId, &'a Connector)> + 'a;

    /// Predecessors of `edge`, with the connector used to cross out of each.
    /// Follows the same internal visibility rule as [`Network::allowed_outgoing`].
    fn incoming<'a>(&'a self, edge: EdgeId) -> impl Iterator<Item = (EdgeId, &'a Connector)> + 'a;

    /// Edges within search ring `ring` of the projected position `(x, y)`,
    /// paired with their distance to the position. Rings grow with the index,
    /// they are not a physical unit.
    fn nearest_edges(&self, x: f64, y: f64, ring: u32) -> Vec<(EdgeId, f64)>;

    fn to_projected(&self, lon: f64, lat: f64) -> (f64, f64);

    fn to_geographic(&self, x: f64, y: f64) -> (f64, f64);

    /// Whether any internal edge exists. Searches skip connector folding otherwise.
    fn has_internal(&self) -> bool;

    fn is_internal(&self, id: EdgeId) -> Result<bool, NetworkError> {
        self.edge(id).map(Edge::is_internal)
    }

    fn length(&self, id: EdgeId) -> Result<f64, NetworkError> {
        self.edge(id).map(|edge| edge.length)
    }

    fn speed(&self, id: EdgeId) -> Result<f64, NetworkError> {
        self.edge(id).map(|edge| edge.speed)
    }

    fn from_coord(&self, id: EdgeId) -> Result<Coord, NetworkError> {
        self.edge(id).map(|edge| edge.from)
    }

    fn to_coord(&self, id: EdgeId) -> Result<Coord, NetworkError> {
        self.edge(id).map(|edge| edge.to)
    }

    fn bidi(&self, id: EdgeId) -> Option<EdgeId> {
        self.edge(id).ok().and_then(|edge| edge.bidi)
    }

    /// The connector joining `from` to `to`, if `to` directly follows `from`.
    fn connector(&self, from: EdgeId, to: EdgeId) -> Option<&Connector> {
        self.allowed_outgoing(from, None)
            .find(|(next, _)| *next == to)
            .map(|(_, connector)| connector)
    }
}
