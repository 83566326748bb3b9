use crate::network::{Connector, EdgeId, Network, VehicleClass};
use crate::route::Objective;
use crate::route::frontier::Frontier;

use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BinaryHeap;

/// Upper bound on the internal edges settled while resolving one transition.
const MAX_SETTLED: usize = 64;

/// The cheapest chain of internal edges realising a transition between two
/// normal edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InternalPath {
    pub edges: SmallVec<[EdgeId; 4]>,
    pub cost: f64,
}

/// Finds the cheapest internal chain which starts at one of the connector's
/// `via` edges and ends on an internal edge that may be followed by `target`.
///
/// Returns `None` for direct connectors, or when no chain reaches `target`.
pub(crate) fn cheapest_internal_path<N: Network>(
    network: &N,
    connector: &Connector,
    target: EdgeId,
    objective: Objective,
    class: Option<VehicleClass>,
) -> Option<InternalPath> {
    if connector.is_direct() {
        return None;
    }

    let mut heap = BinaryHeap::new();
    let mut parents = FxHashMap::<EdgeId, (Option<EdgeId>, f64)>::default();

    for via in &connector.via {
        let Ok(edge) = network.edge(*via) else {
            trace!("Connector references missing internal edge {via}");
            continue;
        };

        let cost = objective.cost(edge);
        if parents.get(via).is_none_or(|(_, known)| cost < *known) {
            parents.insert(*via, (None, cost));
            heap.push(Frontier::new(cost, *via));
        }
    }

    let mut settled = FxHashSet::default();
    while let Some(Frontier { cost, edge }) = heap.pop() {
        if !settled.insert(edge) {
            continue;
        }

        if settled.len() > MAX_SETTLED {
            trace!("Internal search towards {target} exceeded {MAX_SETTLED} edges");
            break;
        }

        let successors = network
            .allowed_outgoing(edge, class)
            .map(|(next, _)| next)
            .collect::<SmallVec<[EdgeId; 4]>>();

        if successors.contains(&target) {
            return Some(InternalPath {
                edges: backtrack(&parents, edge),
                cost,
            });
        }

        for next in successors {
            if settled.contains(&next) {
                continue;
            }

            let Ok(next_edge) = network.edge(next) else {
                continue;
            };

            if !next_edge.is_internal() {
                continue;
            }

            let next_cost = cost + objective.cost(next_edge);
            if parents.get(&next).is_none_or(|(_, known)| next_cost < *known) {
                parents.insert(next, (Some(edge), next_cost));
                heap.push(Frontier::new(next_cost, next));
            }
        }
    }

    None
}

fn backtrack(
    parents: &FxHashMap<EdgeId, (Option<EdgeId>, f64)>,
    last: EdgeId,
) -> SmallVec<[EdgeId; 4]> {
    let mut chain = SmallVec::new();
    let mut cursor = Some(last);

    while let Some(edge) = cursor {
        chain.push(edge);
        cursor = parents.get(&edge).and_then(|(parent, _)| *parent);
    }

    chain.reverse();
    chain
}
