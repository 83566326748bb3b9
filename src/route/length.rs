use crate::network::{EdgeId, Network};
use crate::route::internal::cheapest_internal_path;
use crate::route::{Objective, RouteError};

use itertools::Itertools;

/// The physical length of a route: the sum of its edge lengths plus, when the
/// network models junction interiors, the shortest internal chain realising
/// each consecutive transition.
///
/// ### Example
/// ```rust
/// use waymatch::fixtures::square::{self, A, B, C};
/// use waymatch::route::route_length;
///
/// let network = square::network().unwrap();
/// assert_eq!(route_length(&network, &[A, B, C]), Ok(30.0));
/// ```
pub fn route_length<N: Network>(network: &N, edges: &[EdgeId]) -> Result<f64, RouteError> {
    let mut length = edges
        .iter()
        .map(|edge| network.length(*edge))
        .sum::<Result<f64, _>>()?;

    if network.has_internal() {
        for (from, to) in edges.iter().copied().tuple_windows() {
            let Some(connector) = network.connector(from, to) else {
                continue;
            };

            if let Some(internal) =
                cheapest_internal_path(network, connector, to, Objective::Shortest, None)
            {
                length += internal.cost;
            }
        }
    }

    Ok(length)
}
