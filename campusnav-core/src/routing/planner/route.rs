//! Route legs and the assembled hybrid route

use serde::Serialize;

use crate::model::{CampusGraph, Mode};
use crate::routing::astar::PathResult;
use crate::{Meters, NodeId, Seconds};

/// Display color for legs produced by the walking rescue
pub const FALLBACK_COLOR: &str = "#EF6C00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegStyle {
    Solid,
    /// Walking offered because the requested mode had no route
    Fallback,
}

/// One contiguous single-mode part of a route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub mode: Mode,
    #[serde(skip)]
    pub nodes: Vec<NodeId>,
    /// `[longitude, latitude]` pairs
    pub coordinates: Vec<[f64; 2]>,
    pub distance_m: Meters,
    pub travel_time_s: Seconds,
    pub color: String,
    pub style: LegStyle,
    pub from_name: String,
    pub to_name: String,
    pub description: String,
}

impl RouteLeg {
    pub(crate) fn from_path(
        graph: &CampusGraph,
        mode: Mode,
        path: PathResult,
        from_name: &str,
        to_name: &str,
    ) -> Self {
        let coordinates = graph
            .coordinates(&path.path)
            .into_iter()
            .map(|coord| [coord.x, coord.y])
            .collect();

        let mut leg = Self {
            mode,
            nodes: path.path,
            coordinates,
            distance_m: path.distance,
            travel_time_s: path.time,
            color: mode.color().to_string(),
            style: LegStyle::Solid,
            from_name: from_name.to_string(),
            to_name: to_name.to_string(),
            description: String::new(),
        };
        leg.description = leg.instruction();
        leg
    }

    /// Restyles a walking leg as the rescue for `requested`
    pub(crate) fn into_fallback(mut self, requested: Mode) -> Self {
        self.style = LegStyle::Fallback;
        self.color = FALLBACK_COLOR.to_string();
        self.description = format!(
            "Fallback: no {requested} route available. {}",
            self.instruction()
        );
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.style == LegStyle::Fallback
    }

    fn instruction(&self) -> String {
        format!(
            "{} from {} to {} ({}, about {})",
            self.mode.verb(),
            self.from_name,
            self.to_name,
            format_distance(self.distance_m),
            format_minutes(self.travel_time_s)
        )
    }
}

/// Strategy that produced a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStrategy {
    /// Vehicle straight to an allow-listed destination
    Direct,
    /// Vehicle through a mandatory intermediate place
    ViaWaypoint,
    /// Vehicle to parking, then on foot
    ParkAndWalk,
    /// Single search in the requested mode
    DirectFallback,
    /// Walking after every strategy in the requested mode failed
    WalkingRescue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RouteFailure {
    InvalidGate { mode: Mode, gate: String },
    NoPath,
}

/// Final result of a route query.
///
/// "Not found" is an empty leg list with `found == false`, never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridRoute {
    pub legs: Vec<RouteLeg>,
    pub total_distance_m: Meters,
    pub total_travel_time_s: Seconds,
    pub found: bool,
    pub instructions: Vec<String>,
    pub strategy: Option<RouteStrategy>,
    pub failure: Option<RouteFailure>,
}

impl HybridRoute {
    pub fn from_legs(legs: Vec<RouteLeg>, strategy: RouteStrategy) -> Self {
        let total_distance_m = legs.iter().map(|leg| leg.distance_m).sum();
        let total_travel_time_s = legs.iter().map(|leg| leg.travel_time_s).sum();
        let found = !legs.is_empty() && legs.iter().all(|leg| !leg.nodes.is_empty());
        let instructions = legs.iter().map(|leg| leg.description.clone()).collect();

        Self {
            legs,
            total_distance_m,
            total_travel_time_s,
            found,
            instructions,
            strategy: found.then_some(strategy),
            failure: (!found).then_some(RouteFailure::NoPath),
        }
    }

    pub fn not_found(failure: RouteFailure, instructions: Vec<String>) -> Self {
        Self {
            legs: Vec::new(),
            total_distance_m: 0.0,
            total_travel_time_s: 0.0,
            found: false,
            instructions,
            strategy: None,
            failure: Some(failure),
        }
    }

    pub fn is_hybrid(&self) -> bool {
        self.legs.len() > 1
    }
}

pub(crate) fn format_distance(meters: Meters) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round())
    }
}

/// Rounded up to whole minutes, at least one
pub(crate) fn format_minutes(seconds: Seconds) -> String {
    let minutes = (seconds / 60.0).ceil().max(1.0);
    if minutes == 1.0 {
        "1 min".to_string()
    } else {
        format!("{minutes} min")
    }
}
