//! Mode-aware path search and hybrid route planning

pub mod access;
pub mod astar;
pub mod itinerary;
pub mod planner;

pub use access::is_allowed;
pub use astar::{PathResult, astar, nearest_node, search_between};
pub use planner::{
    AccessPolicy, FALLBACK_COLOR, HybridRoute, LegStyle, RouteFailure, RouteLeg, RoutePlanner,
    RouteStrategy, WaypointOverride, plan_route,
};
