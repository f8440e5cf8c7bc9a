use geo::{Coord, Point};
use hashbrown::HashMap;
use petgraph::{
    Directed, Graph,
    graph::EdgeIndex,
    visit::{Bfs, EdgeRef},
};
use rstar::{AABB, PointDistance, RTree, RTreeObject};
use serde::Serialize;

use super::{CampusEdge, CampusNode};
use crate::geometry::{LocalProjection, point_distance};
use crate::{Meters, NodeId};

/// Planar distance added on top of great-circle bounds when querying the
/// projected index
const INDEX_SLACK_M: f64 = 1.0;

/// Node position in the spatial index, projected to local meters
#[derive(Debug, Clone, Copy)]
pub struct IndexedPoint {
    pub position: [f64; 2],
    pub node: NodeId,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Immutable routing graph.
///
/// Every path segment hop is stored as two directed edges with identical
/// length and tags.
#[derive(Debug, Clone)]
pub struct CampusGraph {
    pub(crate) graph: Graph<CampusNode, CampusEdge, Directed>,
    rtree: RTree<IndexedPoint>,
    projection: LocalProjection,
    keys: HashMap<String, NodeId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphDiagnostics {
    pub node_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    /// Nodes without any edge, unreachable from everywhere
    pub isolated_nodes: Vec<String>,
}

impl CampusGraph {
    /// Wraps a built graph and indexes its routable nodes.
    ///
    /// Nodes with at least one edge go into the nearest-node index; if the
    /// graph has no edges at all every node is indexed instead.
    pub(crate) fn new(
        graph: Graph<CampusNode, CampusEdge, Directed>,
        projection: LocalProjection,
    ) -> Self {
        let mut points: Vec<IndexedPoint> = graph
            .node_indices()
            .filter(|&node| graph.neighbors_undirected(node).next().is_some())
            .map(|node| index_point(&graph[node], node, &projection))
            .collect();

        if points.is_empty() {
            points = graph
                .node_indices()
                .map(|node| index_point(&graph[node], node, &projection))
                .collect();
        }

        let keys = graph
            .node_indices()
            .map(|node| (graph[node].key.clone(), node))
            .collect();

        Self {
            graph,
            rtree: RTree::bulk_load(points),
            projection,
            keys,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&CampusNode> {
        self.graph.node_weight(id)
    }

    pub fn edge(&self, id: EdgeIndex) -> Option<&CampusEdge> {
        self.graph.edge_weight(id)
    }

    pub fn node_by_key(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &CampusNode)> {
        self.graph
            .node_indices()
            .map(move |node| (node, &self.graph[node]))
    }

    /// Outgoing edges as `(edge id, target node, edge)`
    pub fn edges_from(
        &self,
        node: NodeId,
    ) -> impl Iterator<Item = (EdgeIndex, NodeId, &CampusEdge)> {
        self.graph
            .edges(node)
            .map(|edge| (edge.id(), edge.target(), edge.weight()))
    }

    pub fn edge_endpoints(&self, edge: EdgeIndex) -> Option<(NodeId, NodeId)> {
        self.graph.edge_endpoints(edge)
    }

    /// Finds the routable node with minimum great-circle distance to `point`.
    ///
    /// Ties resolve to the lowest node index.
    /// Non-finite coordinates resolve to nothing.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeId, Meters)> {
        if !point.x().is_finite() || !point.y().is_finite() {
            return None;
        }
        let query = self.projection.project(point.y(), point.x());
        let mut candidates = self.rtree.nearest_neighbor_iter_with_distance_2(&query);
        let (first, first_d2) = candidates.next()?;
        let bound = first_d2.sqrt() + INDEX_SLACK_M;

        let mut best = (first.node, self.distance_to(first.node, point));
        for (candidate, d2) in candidates {
            if d2.sqrt() > bound {
                break;
            }
            let distance = self.distance_to(candidate.node, point);
            if distance < best.1 || (distance == best.1 && candidate.node < best.0) {
                best = (candidate.node, distance);
            }
        }

        Some(best)
    }

    fn distance_to(&self, node: NodeId, point: &Point<f64>) -> Meters {
        point_distance(&self.graph[node].geometry, point)
    }

    /// Plain reachability check ignoring mode restrictions
    pub fn connected(&self, from: NodeId, to: NodeId) -> bool {
        if from == to {
            return true;
        }
        let mut bfs = Bfs::new(&self.graph, from);
        while let Some(node) = bfs.next(&self.graph) {
            if node == to {
                return true;
            }
        }
        false
    }

    pub fn coordinates(&self, path: &[NodeId]) -> Vec<Coord<f64>> {
        path.iter()
            .filter_map(|&node| self.node(node))
            .map(|node| node.geometry.into())
            .collect()
    }

    pub fn isolated_nodes(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .filter(|&node| self.graph.neighbors_undirected(node).next().is_none())
            .collect()
    }

    pub fn diagnostics(&self) -> GraphDiagnostics {
        GraphDiagnostics {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            component_count: petgraph::algo::connected_components(&self.graph),
            isolated_nodes: self
                .isolated_nodes()
                .into_iter()
                .map(|node| {
                    let node = &self.graph[node];
                    node.name.clone().unwrap_or_else(|| node.key.clone())
                })
                .collect(),
        }
    }
}

fn index_point(node: &CampusNode, id: NodeId, projection: &LocalProjection) -> IndexedPoint {
    IndexedPoint {
        position: projection.project(node.lat(), node.lng()),
        node: id,
    }
}
