pub use crate::{DEFAULT_MAX_ITERATIONS, DEFAULT_SNAP_TOLERANCE_M};

// Re-export key components
pub use crate::loading::{
    CampusModelConfig, LineFeature, NetworkFeatures, PointFeature, RoutingConfig,
    build_campus_model, create_campus_model,
};
pub use crate::model::{
    CampusGraph, CampusModel, CampusModelMeta, Category, Destination, DestinationCatalog,
    GraphDiagnostics, Mode, TripContext,
};
pub use crate::routing::{
    AccessPolicy, HybridRoute, LegStyle, PathResult, RouteFailure, RouteLeg, RoutePlanner,
    RouteStrategy, plan_route,
};

// Core types
pub use crate::Error;
pub use crate::Meters;
pub use crate::NodeId;
pub use crate::Seconds;
