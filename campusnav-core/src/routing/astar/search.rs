use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use geo::Point;
use hashbrown::HashMap;
use log::{debug, trace, warn};
use petgraph::graph::EdgeIndex;

use super::state::State;
use crate::geometry::point_distance;
use crate::loading::RoutingConfig;
use crate::model::{CampusGraph, Mode, TripContext};
use crate::routing::access::is_allowed;
use crate::{Meters, NodeId, Seconds};

/// Outcome of a single-mode search
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathResult {
    pub path: Vec<NodeId>,
    /// Edges traversed, `path.len() - 1` of them
    pub edges: Vec<EdgeIndex>,
    pub distance: Meters,
    pub time: Seconds,
    pub found: bool,
}

impl PathResult {
    pub fn not_found() -> Self {
        Self::default()
    }

    fn trivial(node: NodeId) -> Self {
        Self {
            path: vec![node],
            edges: Vec::new(),
            distance: 0.0,
            time: 0.0,
            found: true,
        }
    }
}

/// Snaps an arbitrary coordinate to the closest routable graph node
pub fn nearest_node(graph: &CampusGraph, point: &Point<f64>) -> Option<NodeId> {
    graph.nearest_node(point).map(|(node, _)| node)
}

/// Snaps both coordinates to the graph and searches between them
pub fn search_between(
    graph: &CampusGraph,
    from: &Point<f64>,
    to: &Point<f64>,
    mode: Mode,
    trip: &TripContext<'_>,
    config: &RoutingConfig,
) -> PathResult {
    match (nearest_node(graph, from), nearest_node(graph, to)) {
        (Some(start), Some(goal)) => astar(graph, start, goal, mode, trip, config),
        _ => PathResult::not_found(),
    }
}

/// A* over travel time in `mode`.
///
/// Edges rejected by the access rules are treated as absent. The heuristic
/// is the great-circle distance to the goal divided by the mode's speed.
/// Exceeding `config.max_iterations` expansions counts as "no path".
pub fn astar(
    graph: &CampusGraph,
    start: NodeId,
    goal: NodeId,
    mode: Mode,
    trip: &TripContext<'_>,
    config: &RoutingConfig,
) -> PathResult {
    let (Some(_), Some(goal_node)) = (graph.node(start), graph.node(goal)) else {
        warn!("Search requested for unknown node ({start:?} -> {goal:?})");
        return PathResult::not_found();
    };

    if start == goal {
        return PathResult::trivial(start);
    }

    if !graph.connected(start, goal) {
        debug!("No {mode} path: {start:?} and {goal:?} are in different components");
        return PathResult::not_found();
    }

    let speed = config.speed(mode);
    let goal_point = goal_node.geometry;
    let heuristic = |node: NodeId| -> Seconds {
        graph
            .node(node)
            .map_or(0.0, |n| point_distance(&n.geometry, &goal_point) / speed)
    };

    let mut costs: HashMap<NodeId, Seconds> = HashMap::new();
    let mut parents: HashMap<NodeId, (NodeId, EdgeIndex)> = HashMap::new();
    let mut closed = FixedBitSet::with_capacity(graph.node_count());
    let mut open = BinaryHeap::new();
    let mut sequence: u64 = 0;

    costs.insert(start, 0.0);
    open.push(State {
        estimate: heuristic(start),
        sequence,
        node: start,
    });

    let mut iterations = 0;

    while let Some(State { node, .. }) = open.pop() {
        if closed.contains(node.index()) {
            continue;
        }

        iterations += 1;
        if iterations > config.max_iterations {
            warn!(
                "{mode} search from {start:?} to {goal:?} exceeded {} iterations",
                config.max_iterations
            );
            return PathResult::not_found();
        }

        if node == goal {
            return reconstruct(graph, &parents, start, goal, costs[&goal]);
        }
        closed.insert(node.index());

        let cost = costs[&node];
        for (edge_id, next, edge) in graph.edges_from(node) {
            if closed.contains(next.index()) {
                continue;
            }
            if !is_allowed(&edge.modes, mode, trip) {
                trace!("Edge {edge_id:?} closed to {mode}");
                continue;
            }

            let next_cost = cost + edge.length / speed;
            let improved = costs.get(&next).is_none_or(|&best| next_cost < best);
            if improved {
                costs.insert(next, next_cost);
                parents.insert(next, (node, edge_id));
                sequence += 1;
                open.push(State {
                    estimate: next_cost + heuristic(next),
                    sequence,
                    node: next,
                });
            }
        }
    }

    debug!("No {mode} path from {start:?} to {goal:?} after {iterations} iterations");
    PathResult::not_found()
}

fn reconstruct(
    graph: &CampusGraph,
    parents: &HashMap<NodeId, (NodeId, EdgeIndex)>,
    start: NodeId,
    goal: NodeId,
    time: Seconds,
) -> PathResult {
    let mut path = vec![goal];
    let mut edges = Vec::new();
    let mut current = goal;

    while current != start {
        let Some(&(previous, edge)) = parents.get(&current) else {
            break;
        };
        path.push(previous);
        edges.push(edge);
        current = previous;
    }
    path.reverse();
    edges.reverse();

    let distance = edges
        .iter()
        .filter_map(|&edge| graph.edge(edge))
        .map(|edge| edge.length)
        .sum();

    PathResult {
        path,
        edges,
        distance,
        time,
        found: true,
    }
}
