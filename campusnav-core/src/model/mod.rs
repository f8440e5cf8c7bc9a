//! Data model for campus routing
//!
//! Contains the routing graph, transportation modes, edge access tags and
//! the destination catalog.

pub mod campus_model;
pub mod catalog;
pub mod mode;
pub mod network;
pub mod tags;

pub use campus_model::{CampusModel, CampusModelMeta};
pub use catalog::{Category, Destination, DestinationCatalog, TripContext};
pub use mode::{Mode, ModeTable, TagMode};
pub use network::{CampusEdge, CampusGraph, CampusNode, GraphDiagnostics, NodeRole};
pub use tags::{ConditionKind, ConditionalAccess, ModeTag};
