//! Campus network components - nodes and edges

use geo::{LineString, Point};
use serde::Serialize;

use crate::Meters;
use crate::model::tags::ModeTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Intersection,
    Endpoint,
    Destination,
}

/// Routing graph node
#[derive(Debug, Clone)]
pub struct CampusNode {
    /// Key derived from the node's coordinates, unique within one build
    pub key: String,
    /// Node coordinates (x = longitude, y = latitude)
    pub geometry: Point<f64>,
    pub role: NodeRole,
    pub name: Option<String>,
}

impl CampusNode {
    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lng(&self) -> f64 {
        self.geometry.x()
    }
}

/// Routing graph edge, one direction of a path segment hop
#[derive(Debug, Clone)]
pub struct CampusEdge {
    /// Great-circle length in meters
    pub length: Meters,
    pub modes: Vec<ModeTag>,
    pub surface: Option<String>,
    /// Source geometry, oriented in the edge's direction
    pub geometry: LineString<f64>,
    pub name: Option<String>,
}

/// Formats the coordinate-derived node key
pub(crate) fn node_key(lat: f64, lng: f64) -> String {
    format!("{lat:.7},{lng:.7}")
}
