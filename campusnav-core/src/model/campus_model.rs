use crate::loading::RoutingConfig;
use crate::routing::AccessPolicy;

use super::{CampusGraph, DestinationCatalog};

/// Routing parameters fixed at model creation
#[derive(Debug, Clone, Default)]
pub struct CampusModelMeta {
    pub routing: RoutingConfig,
    pub policy: AccessPolicy,
}

/// Built graph plus the destination catalog it is queried with.
///
/// Immutable after construction, so one instance can serve concurrent
/// queries without locking.
#[derive(Debug, Clone)]
pub struct CampusModel {
    pub graph: CampusGraph,
    pub catalog: DestinationCatalog,
    pub meta: CampusModelMeta,
}

impl CampusModel {
    pub fn new(graph: CampusGraph, catalog: DestinationCatalog, meta: CampusModelMeta) -> Self {
        Self {
            graph,
            catalog,
            meta,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn destination_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "CampusModel with {} nodes, {} edges and {} destinations",
            self.node_count(),
            self.edge_count(),
            self.destination_count()
        )
    }
}
