//! Dijkstra shortest-path search over a transit graph.
//!
//! Uses segment `weight` as the edge cost. Ties are resolved the same way on
//! every run: the frontier pops the lowest (cost, node index) first,
//! neighbours are relaxed in segment insertion order, and a station's
//! predecessor only changes on a strictly cheaper path.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::domain::StationId;
use crate::graph::{NodeIdx, TransitGraph};

/// Why no route could be produced.
///
/// All variants are request-level outcomes: report them, don't retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Origin is not a station of the (rule-transformed) graph
    #[error("origin {0} is not in the graph")]
    OriginUnreachable(String),

    /// Destination is not a station of the (rule-transformed) graph
    #[error("destination {0} is not in the graph")]
    DestinationUnreachable(String),

    /// Both stations exist but nothing connects them
    #[error("no path between {origin} and {destination}")]
    NoPathFound { origin: String, destination: String },
}

/// A minimum-weight route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Stations from origin to destination, inclusive.
    pub path: Vec<StationId>,

    /// Sum of the weights of the traversed segments.
    pub weight: f64,
}

impl Route {
    pub fn origin(&self) -> &StationId {
        &self.path[0]
    }

    pub fn destination(&self) -> &StationId {
        &self.path[self.path.len() - 1]
    }

    /// Number of segments traversed.
    pub fn hops(&self) -> usize {
        self.path.len() - 1
    }
}

/// Frontier entry. Ordered so that `BinaryHeap` pops the cheapest first.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    node: NodeIdx,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Find the minimum-weight route from `origin` to `destination`.
pub fn find_path(
    graph: &TransitGraph,
    origin: &str,
    destination: &str,
) -> Result<Route, PathError> {
    let start = graph
        .index_of(origin)
        .ok_or_else(|| PathError::OriginUnreachable(origin.to_string()))?;
    let goal = graph
        .index_of(destination)
        .ok_or_else(|| PathError::DestinationUnreachable(destination.to_string()))?;

    let bound = graph.node_bound();
    let mut dist = vec![f64::INFINITY; bound];
    let mut prev: Vec<Option<NodeIdx>> = vec![None; bound];
    let mut settled = vec![false; bound];
    let mut heap = BinaryHeap::new();

    dist[start.index()] = 0.0;
    heap.push(Frontier {
        cost: 0.0,
        node: start,
    });

    let mut expanded = 0usize;
    while let Some(Frontier { cost, node }) = heap.pop() {
        if settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;
        expanded += 1;

        if node == goal {
            break;
        }

        for (next, segment) in graph.neighbours(node) {
            if settled[next.index()] {
                continue;
            }
            let candidate = cost + segment.weight();
            if candidate < dist[next.index()] {
                dist[next.index()] = candidate;
                prev[next.index()] = Some(node);
                heap.push(Frontier {
                    cost: candidate,
                    node: next,
                });
            }
        }
    }

    if !settled[goal.index()] {
        debug!(origin, destination, expanded, "no path");
        return Err(PathError::NoPathFound {
            origin: origin.to_string(),
            destination: destination.to_string(),
        });
    }

    let mut nodes = vec![goal];
    let mut cursor = goal;
    while let Some(p) = prev[cursor.index()] {
        nodes.push(p);
        cursor = p;
    }
    nodes.reverse();

    let path: Vec<StationId> = nodes
        .into_iter()
        .filter_map(|n| graph.station_at(n).map(|s| s.id().clone()))
        .collect();

    let weight = dist[goal.index()];
    debug!(origin, destination, weight, hops = path.len() - 1, expanded, "path found");

    Ok(Route { path, weight })
}
