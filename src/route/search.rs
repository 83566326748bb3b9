use crate::network::{Connector, Edge, EdgeId, Network};
use crate::route::cache::InternalPathCache;
use crate::route::frontier::Frontier;
use crate::route::internal::cheapest_internal_path;
use crate::route::{PathQuery, PathResult, RouteError};

use indexmap::IndexMap;
use indexmap::map::Entry;
use itertools::Itertools;
use log::{debug, trace};
use rustc_hash::{FxHashSet, FxHasher};
use smallvec::SmallVec;
use std::collections::BinaryHeap;
use std::hash::BuildHasherDefault;
#[cfg(feature = "tracing")]
use tracing::Level;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// How an edge was reached.
#[derive(Debug)]
struct Step {
    cost: f64,
    parent: Option<EdgeId>,
    /// Edges crossed between `parent` and this edge. Holds internal edges,
    /// and the origin itself for seeds of a looping search.
    leading: SmallVec<[EdgeId; 4]>,
}

/// A transition considered while expanding an edge.
struct Successor<'a> {
    edge: EdgeId,
    connector: &'a Connector,
    /// The directed (from, to) pair the connector belongs to.
    transition: (EdgeId, EdgeId),
}

/// The internal edges hanging off the destination, when the destination
/// itself is internal. The search targets the normal edge they follow.
#[derive(Debug, Default)]
struct Appendix {
    edges: Vec<EdgeId>,
    cost: f64,
}

/// Finds the cheapest path between two edges, as configured by the [`PathQuery`].
///
/// Search nodes are edges. The returned path starts with `query.from` and
/// ends with `query.to`. A destination that cannot be reached, or only at a
/// cost beyond `query.max_cost`, is reported as [`PathResult::NotFound`].
/// Unknown endpoints are an error.
///
/// ### Example
/// ```rust
/// use waymatch::fixtures::square::{self, A, B, C};
/// use waymatch::route::{find_optimal_path, PathQuery, PathResult};
///
/// let network = square::network().unwrap();
/// let result = find_optimal_path(&network, &PathQuery::new(A, C)).unwrap();
///
/// assert_eq!(result, PathResult::Found { edges: vec![A, B, C], cost: 6.0 });
/// ```
#[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(network)))]
pub fn find_optimal_path<N: Network>(
    network: &N,
    query: &PathQuery,
) -> Result<PathResult, RouteError> {
    let objective = query.objective;
    let origin = network.edge(query.from)?;
    let destination = network.edge(query.to)?;

    let folds_internal = network.has_internal();
    let (target, appendix) = if folds_internal {
        resolve_target(network, query, destination)?
    } else {
        (destination, Appendix::default())
    };

    let mut heap = BinaryHeap::new();
    let mut steps = FxIndexMap::<EdgeId, Step>::default();
    let mut cache = InternalPathCache::default();

    if query.loops_back() {
        // The end lies behind the start on the same edge, so the origin must
        // be left and re-entered. It is not settled up front.
        let seed = if query.include_from_to_cost {
            (origin.length - query.from_position).max(0.0) / objective.speed(origin)
        } else {
            0.0
        };

        for successor in successors(network, query, origin.id) {
            let (cost, via) = transition_cost(network, query, origin, &successor, &mut cache)?;
            let leading = std::iter::once(origin.id).chain(via).collect();
            relax(&mut steps, &mut heap, successor.edge, seed + cost, None, leading);
        }
    } else {
        let seed = if query.include_from_to_cost {
            (origin.length - query.from_position).max(0.0) / objective.speed(origin)
        } else {
            0.0
        };

        relax(&mut steps, &mut heap, origin.id, seed, None, SmallVec::new());
    }

    let mut settled = FxHashSet::default();
    while let Some(Frontier { cost, edge }) = heap.pop() {
        if !settled.insert(edge) {
            continue;
        }

        if edge == target.id {
            let mut edges = backtrack(&steps, edge);

            if !appendix.edges.is_empty() {
                edges.extend(appendix.edges);
                return Ok(PathResult::Found {
                    edges,
                    cost: cost + appendix.cost,
                });
            }

            let remainder = (target.length - query.to_position).max(0.0) / objective.speed(target);
            let trim = match query.include_from_to_cost {
                true if query.to_position > 0.0 => remainder,
                false if edges.len() > 1 => remainder,
                _ => 0.0,
            };

            trace!("Reached {} at cost {cost}, trimming {trim}", target.id);
            return Ok(PathResult::Found {
                edges,
                cost: (cost - trim).max(0.0),
            });
        }

        if cost > query.max_cost {
            debug!(
                "Search {} -> {} exceeded its maximum cost of {} at {cost}",
                query.from, query.to, query.max_cost
            );
            return Ok(PathResult::NotFound { cost });
        }

        let current = network.edge(edge)?;
        for successor in successors(network, query, edge) {
            if settled.contains(&successor.edge) {
                continue;
            }

            let (step_cost, via) = transition_cost(network, query, current, &successor, &mut cache)?;
            relax(&mut steps, &mut heap, successor.edge, cost + step_cost, Some(edge), via);
        }
    }

    debug!("Search {} -> {} exhausted the network", query.from, query.to);
    Ok(PathResult::NotFound {
        cost: f64::INFINITY,
    })
}

/// Walks back from an internal destination through its internal
/// predecessors while each has a unique predecessor, until a normal edge,
/// or the origin, is found. Internal cycles end the walk where they close.
fn resolve_target<'a, N: Network>(
    network: &'a N,
    query: &PathQuery,
    destination: &'a Edge,
) -> Result<(&'a Edge, Appendix), RouteError> {
    let mut target = destination;
    let mut appendix = Appendix::default();
    let mut walked = FxHashSet::default();

    while target.is_internal() && target.id != query.from && walked.insert(target.id) {
        let Ok(previous) = network.incoming(target.id).map(|(id, _)| id).exactly_one() else {
            break;
        };

        if walked.contains(&previous) {
            trace!("Internal cycle through {previous} ends the walk from {}", destination.id);
            break;
        }

        appendix.edges.push(target.id);
        appendix.cost += query.objective.cost(target);
        target = network.edge(previous)?;
    }

    appendix.edges.reverse();
    Ok((target, appendix))
}

fn successors<'a, N: Network>(
    network: &'a N,
    query: &PathQuery,
    edge: EdgeId,
) -> Vec<Successor<'a>> {
    let forward = network
        .allowed_outgoing(edge, query.vehicle_class)
        .map(|(next, connector)| Successor {
            edge: next,
            connector,
            transition: (edge, next),
        });

    let backward = query
        .ignore_direction
        .then(|| network.incoming(edge))
        .into_iter()
        .flatten()
        .map(|(previous, connector)| Successor {
            edge: previous,
            connector,
            transition: (previous, edge),
        });

    forward.chain(backward).collect()
}

/// The cost of moving from `current` onto the successor, and the internal
/// edges to report in between.
fn transition_cost<N: Network>(
    network: &N,
    query: &PathQuery,
    current: &Edge,
    successor: &Successor,
    cache: &mut InternalPathCache,
) -> Result<(f64, SmallVec<[EdgeId; 4]>), RouteError> {
    let next = network.edge(successor.edge)?;
    let mut cost = query.objective.cost(next);
    let mut via = SmallVec::new();

    if current.bidi == Some(successor.edge) {
        cost += query.reversal_penalty;
    }

    if network.has_internal() && !successor.connector.is_direct() {
        let (_, towards) = successor.transition;
        let internal = cache.query(successor.transition, || {
            cheapest_internal_path(
                network,
                successor.connector,
                towards,
                query.objective,
                query.vehicle_class,
            )
        });

        if let Some(path) = &*internal {
            cost += path.cost;
            if query.with_internal {
                via.extend(path.edges.iter().copied());
            }
        }
    }

    Ok((cost, via))
}

fn relax(
    steps: &mut FxIndexMap<EdgeId, Step>,
    heap: &mut BinaryHeap<Frontier>,
    edge: EdgeId,
    cost: f64,
    parent: Option<EdgeId>,
    leading: SmallVec<[EdgeId; 4]>,
) {
    let step = Step {
        cost,
        parent,
        leading,
    };

    match steps.entry(edge) {
        Entry::Vacant(entry) => {
            entry.insert(step);
        }
        Entry::Occupied(mut entry) => {
            if entry.get().cost <= cost {
                return;
            }
            entry.insert(step);
        }
    }

    heap.push(Frontier::new(cost, edge));
}

fn backtrack(steps: &FxIndexMap<EdgeId, Step>, last: EdgeId) -> Vec<EdgeId> {
    let mut path = vec![];
    let mut cursor = Some(last);

    while let Some(edge) = cursor {
        let Some(step) = steps.get(&edge) else {
            break;
        };

        path.push(edge);
        path.extend(step.leading.iter().rev());
        cursor = step.parent;
    }

    path.reverse();
    path
}
