use crate::network::{EdgeId, Network, NetworkError};
use crate::route::{RouteError, route_length};

use geo::{Coord, LineString, coord};

/// `Trip`
///
/// A route through the network alongside the positions it passes through.
/// Every edge contributes its from-node and to-node, in geographic
/// coordinates, so consecutive edges sharing a node repeat that position.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    edges: Vec<EdgeId>,
    positions: LineString,
}

impl Trip {
    /// Resolves the positions of `edges` against the network.
    ///
    /// ### Example
    /// ```rust
    /// use waymatch::fixtures::square::{self, A, B};
    /// use waymatch::trip::Trip;
    /// use geo::wkt;
    ///
    /// let network = square::network().unwrap();
    /// let trip = Trip::new_with_network(&network, &[A, B]).unwrap();
    ///
    /// assert_eq!(
    ///     trip.linestring(),
    ///     &wkt! { LINESTRING(0.0 0.0,10.0 0.0,10.0 0.0,10.0 10.0) }
    /// );
    /// ```
    pub fn new_with_network<N: Network>(
        network: &N,
        edges: &[EdgeId],
    ) -> Result<Self, NetworkError> {
        let geographic = |position: Coord| {
            let (lon, lat) = network.to_geographic(position.x, position.y);
            coord! { x: lon, y: lat }
        };

        let mut positions = Vec::with_capacity(edges.len() * 2);
        for id in edges {
            let edge = network.edge(*id)?;
            positions.push(geographic(edge.from));
            positions.push(geographic(edge.to));
        }

        Ok(Trip {
            edges: edges.to_vec(),
            positions: LineString::new(positions),
        })
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn linestring(&self) -> &LineString {
        &self.positions
    }

    pub fn into_parts(self) -> (Vec<EdgeId>, LineString) {
        (self.edges, self.positions)
    }

    /// The physical length of the trip, see [`route_length`].
    pub fn length<N: Network>(&self, network: &N) -> Result<f64, RouteError> {
        route_length(network, &self.edges)
    }
}
