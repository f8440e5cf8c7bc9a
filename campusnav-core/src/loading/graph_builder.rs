use geo::{Coord, LineString, Point};
use hashbrown::HashSet;
use itertools::Itertools;
use log::{info, warn};
use petgraph::{Directed, Graph};
use rstar::RTree;

use super::features::{LineFeature, PointFeature};
use crate::geometry::{LocalProjection, distance};
use crate::model::network::{IndexedPoint, components::node_key};
use crate::model::{CampusEdge, CampusGraph, CampusNode, ModeTag, NodeRole};
use crate::{Meters, NodeId};

/// Extra radius for the planar pre-filter of snap candidates
const SNAP_SLACK_M: f64 = 0.5;

/// Builds the routing graph from path segments and named points.
///
/// Every point feature becomes its own destination node. Line coordinates
/// snap to the nearest existing node (destinations included) within
/// `snap_tolerance`; consecutive distinct nodes are joined by a forward and
/// a backward edge.
pub fn build_graph(
    lines: &[LineFeature],
    points: &[PointFeature],
    snap_tolerance: Meters,
) -> CampusGraph {
    let projection = reference_projection(lines, points);
    let mut builder = GraphBuilder::new(snap_tolerance, projection);

    for point in points {
        builder.add_destination(point);
    }
    for line in lines {
        builder.add_line(line);
    }

    let graph = CampusGraph::new(builder.graph, projection);

    info!(
        "Built campus graph with {} nodes and {} edges from {} segments and {} points",
        graph.node_count(),
        graph.edge_count(),
        lines.len(),
        points.len()
    );
    let isolated = graph.isolated_nodes();
    if !isolated.is_empty() {
        let labels = isolated
            .iter()
            .filter_map(|&node| graph.node(node))
            .map(|node| node.name.as_deref().unwrap_or(&node.key))
            .join(", ");
        warn!(
            "{} nodes have no edges and are unreachable: {labels}",
            isolated.len()
        );
    }

    graph
}

fn reference_projection(lines: &[LineFeature], points: &[PointFeature]) -> LocalProjection {
    points
        .iter()
        .map(|point| point.coordinate)
        .chain(lines.iter().flat_map(|line| line.coordinates.iter().copied()))
        .next()
        .map(|coord| LocalProjection::new(coord.y))
        .unwrap_or_default()
}

struct GraphBuilder {
    graph: Graph<CampusNode, CampusEdge, Directed>,
    snap_index: RTree<IndexedPoint>,
    projection: LocalProjection,
    tolerance: Meters,
    keys: HashSet<String>,
}

impl GraphBuilder {
    fn new(tolerance: Meters, projection: LocalProjection) -> Self {
        Self {
            graph: Graph::new(),
            snap_index: RTree::new(),
            projection,
            tolerance,
            keys: HashSet::new(),
        }
    }

    fn add_destination(&mut self, point: &PointFeature) {
        self.insert_node(point.coordinate, NodeRole::Destination, Some(point.name.clone()));
    }

    fn add_line(&mut self, line: &LineFeature) {
        let modes = ModeTag::parse_all(&line.modes);
        let last = line.coordinates.len().saturating_sub(1);

        let resolved: Vec<(NodeId, Coord<f64>)> = line
            .coordinates
            .iter()
            .enumerate()
            .map(|(position, &coord)| {
                let role = if position == 0 || position == last {
                    NodeRole::Endpoint
                } else {
                    NodeRole::Intersection
                };
                (self.resolve(coord, role), coord)
            })
            .collect();

        for (&(from, from_coord), &(to, to_coord)) in resolved.iter().tuple_windows() {
            if from == to {
                continue;
            }
            self.add_segment_hop(from, to, [from_coord, to_coord], &modes, line);
        }
    }

    fn add_segment_hop(
        &mut self,
        from: NodeId,
        to: NodeId,
        coords: [Coord<f64>; 2],
        modes: &[ModeTag],
        line: &LineFeature,
    ) {
        let a = self.graph[from].geometry;
        let b = self.graph[to].geometry;
        let length = distance(a.y(), a.x(), b.y(), b.x());

        let forward = CampusEdge {
            length,
            modes: modes.to_vec(),
            surface: line.surface.clone(),
            geometry: LineString::from(coords.to_vec()),
            name: line.name.clone(),
        };
        let mut backward = forward.clone();
        backward.geometry = LineString::from(vec![coords[1], coords[0]]);

        self.graph.add_edge(from, to, forward);
        self.graph.add_edge(to, from, backward);
    }

    /// Returns the nearest node within tolerance, or a new node
    fn resolve(&mut self, coord: Coord<f64>, role: NodeRole) -> NodeId {
        match self.snap_candidate(coord) {
            Some(existing) => {
                let node = &mut self.graph[existing];
                // A reused endpoint joins several segments
                if node.role == NodeRole::Endpoint {
                    node.role = NodeRole::Intersection;
                }
                existing
            }
            None => self.insert_node(coord, role, None),
        }
    }

    fn snap_candidate(&self, coord: Coord<f64>) -> Option<NodeId> {
        let query = self.projection.project(coord.y, coord.x);
        let radius = self.tolerance + SNAP_SLACK_M;

        self.snap_index
            .locate_within_distance(query, radius * radius)
            .map(|candidate| {
                let node = &self.graph[candidate.node];
                (candidate.node, distance(coord.y, coord.x, node.lat(), node.lng()))
            })
            .filter(|&(_, d)| d <= self.tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map(|(node, _)| node)
    }

    fn insert_node(&mut self, coord: Coord<f64>, role: NodeRole, name: Option<String>) -> NodeId {
        let key = self.unique_key(node_key(coord.y, coord.x));
        let id = self.graph.add_node(CampusNode {
            key,
            geometry: Point::from(coord),
            role,
            name,
        });
        self.snap_index.insert(IndexedPoint {
            position: self.projection.project(coord.y, coord.x),
            node: id,
        });
        id
    }

    /// Destinations are not snapped against each other, so two of them may
    /// share coordinates
    fn unique_key(&mut self, key: String) -> String {
        if self.keys.insert(key.clone()) {
            return key;
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{key}#{suffix}");
            if self.keys.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}
