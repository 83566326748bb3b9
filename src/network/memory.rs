use crate::network::project::Projection;
use crate::network::{Connector, Edge, EdgeFunction, EdgeId, Network, NetworkError, NodeId, VehicleClass};

use geo::{Coord, Distance, Euclidean, Point, coord};
use itertools::Itertools;
use log::{debug, info};
use petgraph::Direction;
use petgraph::prelude::DiGraphMap;
use rstar::primitives::{GeomWithData, Line};
use rstar::{PointDistance, RTree};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::{Debug, Formatter};

pub type GraphStructure = DiGraphMap<EdgeId, Connector>;

/// An edge segment as stored in the spatial index.
pub type IndexedEdge = GeomWithData<Line<[f64; 2]>, EdgeId>;

const DEFAULT_RING_WIDTH: f64 = 1.0;

/// An immutable, in-memory road network.
///
/// Search nodes are edges: the adjacency graph links each edge to the edges
/// which may follow it, weighted by the [`Connector`] realising the turn.
/// Normal edges are indexed in an R-Tree for proximity queries.
pub struct MemoryNetwork {
    pub(crate) graph: GraphStructure,
    pub(crate) edges: FxHashMap<EdgeId, Edge>,
    pub(crate) index: RTree<IndexedEdge>,

    projection: Projection,
    ring_width: f64,
    has_internal: bool,
}

impl Debug for MemoryNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MemoryNetwork with Edges: {}, Transitions: {}",
            self.edges.len(),
            self.graph.edge_count()
        )
    }
}

impl MemoryNetwork {
    pub fn builder(projection: Projection) -> NetworkBuilder {
        NetworkBuilder::new(projection)
    }

    pub fn index(&self) -> &RTree<IndexedEdge> {
        &self.index
    }

    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// All edges of the network, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }
}

impl Network for MemoryNetwork {
    #[inline]
    fn edge(&self, id: EdgeId) -> Result<&Edge, NetworkError> {
        self.edges.get(&id).ok_or(NetworkError::UnknownEdge(id))
    }

    fn allowed_outgoing<'a>(
        &'a self,
        edge: EdgeId,
        class: Option<VehicleClass>,
    ) -> impl Iterator<Item = (EdgeId, &'a Connector)> + 'a {
        let source_internal = self.edges.get(&edge).is_some_and(Edge::is_internal);

        self.graph.edges(edge).filter_map(move |(_, next, connector)| {
            let target = self.edges.get(&next)?;
            let visible = source_internal || !target.is_internal();

            (visible && target.permits(class)).then_some((next, connector))
        })
    }

    fn incoming<'a>(&'a self, edge: EdgeId) -> impl Iterator<Item = (EdgeId, &'a Connector)> + 'a {
        let target_internal = self.edges.get(&edge).is_some_and(Edge::is_internal);

        self.graph
            .neighbors_directed(edge, Direction::Incoming)
            .filter_map(move |prev| {
                let source = self.edges.get(&prev)?;
                if !target_internal && source.is_internal() {
                    return None;
                }

                self.graph
                    .edge_weight(prev, edge)
                    .map(|connector| (prev, connector))
            })
    }

    fn nearest_edges(&self, x: f64, y: f64, ring: u32) -> Vec<(EdgeId, f64)> {
        let radius = (ring as f64 + 1.0) * self.ring_width;
        let origin = [x, y];

        self.index
            .locate_within_distance(origin, radius * radius)
            .map(|indexed| (indexed.data, indexed.distance_2(&origin).sqrt()))
            .collect()
    }

    #[inline]
    fn to_projected(&self, lon: f64, lat: f64) -> (f64, f64) {
        self.projection.project(lon, lat)
    }

    #[inline]
    fn to_geographic(&self, x: f64, y: f64) -> (f64, f64) {
        self.projection.unproject(x, y)
    }

    #[inline]
    fn has_internal(&self) -> bool {
        self.has_internal
    }
}

/// Declaration of an edge before the network is assembled.
#[derive(Clone, Debug)]
pub struct EdgeSpec {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,

    /// Falls back to the euclidean distance between the nodes.
    pub length: Option<f64>,
    pub speed: f64,
    pub function: EdgeFunction,
    pub allowed: SmallVec<[VehicleClass; 4]>,
}

impl EdgeSpec {
    pub fn new(id: u64, from: u64, to: u64, speed: f64) -> Self {
        EdgeSpec {
            id: EdgeId(id),
            from: NodeId(from),
            to: NodeId(to),
            length: None,
            speed,
            function: EdgeFunction::Normal,
            allowed: SmallVec::new(),
        }
    }

    pub fn length(self, length: f64) -> Self {
        EdgeSpec {
            length: Some(length),
            ..self
        }
    }

    pub fn internal(self) -> Self {
        EdgeSpec {
            function: EdgeFunction::Internal,
            ..self
        }
    }

    pub fn allow(self, classes: impl IntoIterator<Item = VehicleClass>) -> Self {
        EdgeSpec {
            allowed: classes.into_iter().collect(),
            ..self
        }
    }
}

/// Assembles a [`MemoryNetwork`].
///
/// ### Example
/// ```rust
/// use waymatch::network::{EdgeSpec, MemoryNetwork, Network, Projection, EdgeId};
///
/// let network = MemoryNetwork::builder(Projection::Identity)
///     .node(1, 0.0, 0.0)
///     .node(2, 10.0, 0.0)
///     .node(3, 20.0, 0.0)
///     .edge(EdgeSpec::new(1, 1, 2, 5.0))
///     .edge(EdgeSpec::new(2, 2, 3, 5.0))
///     .connect_all()
///     .build()
///     .expect("network is consistent");
///
/// assert_eq!(network.length(EdgeId(1)), Ok(10.0));
/// assert!(network.connector(EdgeId(1), EdgeId(2)).is_some());
/// ```
#[derive(Debug)]
pub struct NetworkBuilder {
    projection: Projection,
    ring_width: f64,

    nodes: FxHashMap<NodeId, Coord>,
    edges: Vec<EdgeSpec>,
    transitions: Vec<(EdgeId, EdgeId, Connector)>,
    connect_all: bool,
}

impl NetworkBuilder {
    pub fn new(projection: Projection) -> Self {
        NetworkBuilder {
            projection,
            ring_width: DEFAULT_RING_WIDTH,
            nodes: FxHashMap::default(),
            edges: vec![],
            transitions: vec![],
            connect_all: false,
        }
    }

    /// The physical width (in projected units) of one proximity search ring.
    pub fn ring_width(self, ring_width: f64) -> Self {
        NetworkBuilder { ring_width, ..self }
    }

    /// Declares a node at projected coordinates `(x, y)`.
    pub fn node(mut self, id: u64, x: f64, y: f64) -> Self {
        self.nodes.insert(NodeId(id), coord! { x: x, y: y });
        self
    }

    pub fn edge(mut self, spec: EdgeSpec) -> Self {
        self.edges.push(spec);
        self
    }

    /// Permits travel from `from` directly onto `to`.
    pub fn connect(mut self, from: u64, to: u64) -> Self {
        self.transitions
            .push((EdgeId(from), EdgeId(to), Connector::direct()));
        self
    }

    /// Permits travel from `from` onto `to` through the internal edges
    /// `chain`, in order. An empty chain is a direct connection. Declaring
    /// several junctions between the same edges models parallel lanes.
    pub fn junction(mut self, from: u64, to: u64, chain: &[u64]) -> Self {
        let Some(first) = chain.first() else {
            return self.connect(from, to);
        };

        self.transitions.push((
            EdgeId(from),
            EdgeId(to),
            Connector::via([EdgeId(*first)]),
        ));

        // Links the chain itself so it can be walked in both directions.
        let links = std::iter::once(from)
            .chain(chain.iter().copied())
            .chain([to])
            .map(EdgeId)
            .tuple_windows::<(_, _)>()
            .map(|(a, b)| (a, b, Connector::direct()))
            .collect::<Vec<_>>();

        self.transitions.extend(links);
        self
    }

    /// Connects every normal edge to every normal edge leaving its to-node,
    /// in addition to any explicit transitions.
    pub fn connect_all(self) -> Self {
        NetworkBuilder {
            connect_all: true,
            ..self
        }
    }

    pub fn build(mut self) -> Result<MemoryNetwork, NetworkError> {
        self.edges.sort_by_key(|spec| spec.id);

        let mut edges = FxHashMap::default();

        for spec in &self.edges {
            let from = *self
                .nodes
                .get(&spec.from)
                .ok_or(NetworkError::UnknownNode(spec.from))?;
            let to = *self
                .nodes
                .get(&spec.to)
                .ok_or(NetworkError::UnknownNode(spec.to))?;

            let length = spec
                .length
                .unwrap_or_else(|| Euclidean.distance(Point(from), Point(to)));

            if length.is_nan() || length < 0.0 {
                return Err(NetworkError::InvalidAttribute(spec.id, "length must be a non-negative number"));
            }
            if spec.speed.is_nan() || spec.speed <= 0.0 {
                return Err(NetworkError::InvalidAttribute(spec.id, "speed must be a positive number"));
            }

            let edge = Edge {
                id: spec.id,
                length,
                speed: spec.speed,
                from,
                to,
                function: spec.function,
                bidi: None,
                allowed: spec.allowed.clone(),
            };

            if edges.insert(spec.id, edge).is_some() {
                return Err(NetworkError::DuplicateEdge(spec.id));
            }
        }

        // Normal edges over the same nodes in opposite directions are counterparts.
        let mut by_nodes = FxHashMap::<(NodeId, NodeId), EdgeId>::default();
        for spec in self.edges.iter().filter(|spec| spec.function == EdgeFunction::Normal) {
            by_nodes.entry((spec.from, spec.to)).or_insert(spec.id);
        }

        for spec in self.edges.iter().filter(|spec| spec.function == EdgeFunction::Normal) {
            let counterpart = by_nodes
                .get(&(spec.to, spec.from))
                .copied()
                .filter(|other| *other != spec.id);

            if let Some(edge) = edges.get_mut(&spec.id) {
                edge.bidi = counterpart;
            }
        }

        let mut graph = GraphStructure::new();
        for spec in &self.edges {
            graph.add_node(spec.id);
        }

        for (from, to, connector) in self.transitions {
            for id in [from, to] {
                if !edges.contains_key(&id) {
                    return Err(NetworkError::UnknownEdge(id));
                }
            }

            match graph.edge_weight_mut(from, to) {
                Some(existing) => {
                    for via in connector.via {
                        if !existing.via.contains(&via) {
                            existing.via.push(via);
                        }
                    }
                }
                None => {
                    graph.add_edge(from, to, connector);
                }
            }
        }

        if self.connect_all {
            let mut leaving = FxHashMap::<NodeId, Vec<EdgeId>>::default();
            for spec in self.edges.iter().filter(|spec| spec.function == EdgeFunction::Normal) {
                leaving.entry(spec.from).or_default().push(spec.id);
            }

            for spec in self.edges.iter().filter(|spec| spec.function == EdgeFunction::Normal) {
                for next in leaving.get(&spec.to).into_iter().flatten() {
                    if !graph.contains_edge(spec.id, *next) {
                        graph.add_edge(spec.id, *next, Connector::direct());
                    }
                }
            }
        }

        let indexed = edges
            .values()
            .filter(|edge| !edge.is_internal())
            .map(|edge| {
                GeomWithData::new(
                    Line::new([edge.from.x, edge.from.y], [edge.to.x, edge.to.y]),
                    edge.id,
                )
            })
            .collect::<Vec<_>>();

        let has_internal = edges.values().any(Edge::is_internal);
        let index = RTree::bulk_load(indexed);

        debug!("Indexed {} normal edges", index.size());
        info!(
            "Built network with {} edges, {} transitions (internal: {})",
            edges.len(),
            graph.edge_count(),
            has_internal
        );

        Ok(MemoryNetwork {
            graph,
            edges,
            index,
            projection: self.projection,
            ring_width: self.ring_width,
            has_internal,
        })
    }
}
