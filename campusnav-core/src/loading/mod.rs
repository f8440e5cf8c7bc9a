//! This module is responsible for loading the campus network and the
//! destination catalog and for building the routing model from them.

mod builder;
pub mod catalog;
mod config;
pub mod features;
mod graph_builder;

pub use builder::{build_campus_model, create_campus_model};
pub use catalog::{catalog_from_csv, catalog_from_json, load_catalog};
pub use config::{CampusModelConfig, RoutingConfig, SpeedTable};
pub use features::{LineFeature, NetworkFeatures, PointFeature, parse_network, read_network};
pub use graph_builder::build_graph;
