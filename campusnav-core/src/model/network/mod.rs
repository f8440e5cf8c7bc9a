//! Campus path network model

pub mod components;
pub mod graph;

pub use components::{CampusEdge, CampusNode, NodeRole};
pub use graph::{CampusGraph, GraphDiagnostics, IndexedPoint};
