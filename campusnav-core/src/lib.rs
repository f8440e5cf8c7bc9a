//! Routing engine for campus navigation across walking, two-wheeler and
//! four-wheeler networks.
//!
//! The crate turns a GeoJSON network of path segments into a routing graph,
//! searches it with a mode-aware A*, and composes vehicle and walking legs
//! into a single [`HybridRoute`](routing::HybridRoute).

pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// Dense index of a node inside the [`CampusGraph`](model::CampusGraph)
pub type NodeId = petgraph::graph::NodeIndex;
/// Distance in meters
pub type Meters = f64;
/// Travel time in seconds
pub type Seconds = f64;

/// Mean earth radius used by every distance calculation in the crate
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
/// Canonical coordinate snapping tolerance for graph construction
pub const DEFAULT_SNAP_TOLERANCE_M: Meters = 3.0;
/// Upper bound on A* node expansions for a single search
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
