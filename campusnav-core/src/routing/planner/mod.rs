//! Hybrid route planning.
//!
//! Strategies run in a fixed order and the first success wins:
//! gate check, direct vehicle access, waypoint override, park-and-walk,
//! direct search in the requested mode, and finally a walking rescue.

mod policy;
mod route;

use geo::Point;
use log::{debug, info, warn};
use rayon::prelude::*;

pub use policy::{AccessPolicy, WaypointOverride};
pub use route::{FALLBACK_COLOR, HybridRoute, LegStyle, RouteFailure, RouteLeg, RouteStrategy};

use crate::model::{CampusModel, Destination, Mode, TripContext};
use crate::routing::astar::{astar, nearest_node};
use crate::{Error, NodeId};

/// Label used for a start coordinate that is not a named destination
const CURRENT_LOCATION: &str = "your location";

/// Plans one route against a shared model
pub fn plan_route(
    model: &CampusModel,
    start: Point<f64>,
    destination: &Destination,
    mode: Mode,
    start_destination: Option<&Destination>,
) -> HybridRoute {
    RoutePlanner::new(model).plan(start, destination, mode, start_destination)
}

/// Query-side view of a [`CampusModel`].
///
/// Holds no mutable state; any number of planners may share one model.
#[derive(Debug, Clone, Copy)]
pub struct RoutePlanner<'a> {
    model: &'a CampusModel,
}

/// Resolved start of a query
struct Origin<'a> {
    node: NodeId,
    destination: Option<&'a Destination>,
}

impl<'a> Origin<'a> {
    fn label(&self) -> &'a str {
        self.destination
            .map_or(CURRENT_LOCATION, |destination| destination.name.as_str())
    }
}

impl<'a> RoutePlanner<'a> {
    pub fn new(model: &'a CampusModel) -> Self {
        Self { model }
    }

    /// Plans a route from `start` to `destination`.
    ///
    /// Never fails: an impossible route is returned with `found == false`.
    pub fn plan(
        &self,
        start: Point<f64>,
        destination: &'a Destination,
        mode: Mode,
        start_destination: Option<&'a Destination>,
    ) -> HybridRoute {
        let policy = &self.model.meta.policy;

        if mode.is_vehicle()
            && let Some(gate) = start_destination
            && !policy.gate_allowed(mode, gate)
        {
            info!("Rejected {mode} route starting at {}", gate.name);
            let permitted = policy.permitted_gates(mode).join(" or ");
            return HybridRoute::not_found(
                RouteFailure::InvalidGate {
                    mode,
                    gate: gate.name.clone(),
                },
                vec![format!(
                    "{} entry is only permitted via {permitted}, not {}",
                    capitalize(&mode.to_string()),
                    gate.name
                )],
            );
        }

        let graph = &self.model.graph;
        let (Some(start_node), Some(goal)) = (
            nearest_node(graph, &start),
            nearest_node(graph, &destination.point()),
        ) else {
            warn!("Cannot snap route to {} onto the campus graph", destination.name);
            return HybridRoute::not_found(RouteFailure::NoPath, Vec::new());
        };
        let origin = Origin {
            node: start_node,
            destination: start_destination,
        };

        let direct_access = policy.has_direct_access(mode, destination);
        if direct_access {
            debug!("Trying direct {mode} access to {}", destination.name);
            if let Some(route) =
                self.single_leg(&origin, goal, destination, mode, RouteStrategy::Direct)
            {
                return route;
            }
        }

        let waypoint = policy.waypoint_for(mode, destination);
        if let Some(via) = waypoint {
            debug!("Trying {mode} route to {} via {via}", destination.name);
            match self.resolve_place(via) {
                Some((via_node, via_destination)) => {
                    if let Some(route) = self.two_legs(
                        &origin,
                        (via_node, via_destination),
                        (goal, destination),
                        (mode, mode),
                        RouteStrategy::ViaWaypoint,
                    ) {
                        return route;
                    }
                }
                None => warn!("Waypoint '{via}' is not in the destination catalog"),
            }
        }

        if mode.is_vehicle() && !direct_access && waypoint.is_none() {
            if let Some(route) = self.park_and_walk(&origin, goal, destination, mode) {
                return route;
            }
        }

        // Same search as the direct access attempt, which already failed
        if !direct_access {
            debug!("Trying direct {mode} search to {}", destination.name);
            if let Some(route) =
                self.single_leg(&origin, goal, destination, mode, RouteStrategy::DirectFallback)
            {
                return route;
            }
        }

        if mode != Mode::Walking {
            debug!("Trying walking rescue to {}", destination.name);
            if let Some(leg) = self.leg(&origin, goal, destination, Mode::Walking) {
                return HybridRoute::from_legs(
                    vec![leg.into_fallback(mode)],
                    RouteStrategy::WalkingRescue,
                );
            }
        }

        info!(
            "No route from {} to {} for {mode}",
            origin.label(),
            destination.name
        );
        HybridRoute::not_found(RouteFailure::NoPath, Vec::new())
    }

    /// Plans routes from one start to many destinations in parallel
    pub fn plan_many(
        &self,
        start: Point<f64>,
        destinations: &[&'a Destination],
        mode: Mode,
        start_destination: Option<&'a Destination>,
    ) -> Vec<HybridRoute> {
        destinations
            .par_iter()
            .map(|&destination| self.plan(start, destination, mode, start_destination))
            .collect()
    }

    /// Resolves catalog ids, then plans
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDestination`] if either id is not in the
    /// catalog
    pub fn plan_by_id(
        &self,
        start: Point<f64>,
        destination_id: &str,
        mode: Mode,
        start_destination_id: Option<&str>,
    ) -> Result<HybridRoute, Error> {
        let catalog = &self.model.catalog;
        let destination = catalog
            .get(destination_id)
            .ok_or_else(|| Error::UnknownDestination(destination_id.to_string()))?;
        let start_destination = start_destination_id
            .map(|id| {
                catalog
                    .get(id)
                    .ok_or_else(|| Error::UnknownDestination(id.to_string()))
            })
            .transpose()?;

        Ok(self.plan(start, destination, mode, start_destination))
    }

    fn park_and_walk(
        &self,
        origin: &Origin<'a>,
        goal: NodeId,
        destination: &'a Destination,
        mode: Mode,
    ) -> Option<HybridRoute> {
        let parking_name = self.model.meta.policy.parking_for(mode)?;
        let Some((parking_node, parking)) = self.resolve_place(parking_name) else {
            warn!("Parking '{parking_name}' for {mode} is not in the destination catalog");
            return None;
        };
        if parking_node == goal {
            return None;
        }

        debug!(
            "Trying {mode} to {} then walking to {}",
            parking.name, destination.name
        );
        self.two_legs(
            origin,
            (parking_node, parking),
            (goal, destination),
            (mode, Mode::Walking),
            RouteStrategy::ParkAndWalk,
        )
    }

    fn single_leg(
        &self,
        origin: &Origin<'a>,
        goal: NodeId,
        destination: &'a Destination,
        mode: Mode,
        strategy: RouteStrategy,
    ) -> Option<HybridRoute> {
        self.leg(origin, goal, destination, mode)
            .map(|leg| HybridRoute::from_legs(vec![leg], strategy))
    }

    /// Both legs must succeed, partial routes are discarded
    fn two_legs(
        &self,
        origin: &Origin<'a>,
        (via_node, via): (NodeId, &'a Destination),
        (goal, destination): (NodeId, &'a Destination),
        (first_mode, second_mode): (Mode, Mode),
        strategy: RouteStrategy,
    ) -> Option<HybridRoute> {
        let first = self.leg(origin, via_node, via, first_mode)?;
        let transfer = Origin {
            node: via_node,
            destination: Some(via),
        };
        let second = self.leg(&transfer, goal, destination, second_mode)?;
        Some(HybridRoute::from_legs(vec![first, second], strategy))
    }

    fn leg(
        &self,
        origin: &Origin<'a>,
        goal: NodeId,
        destination: &'a Destination,
        mode: Mode,
    ) -> Option<RouteLeg> {
        let trip = TripContext::new(origin.destination, Some(destination));
        let result = astar(
            &self.model.graph,
            origin.node,
            goal,
            mode,
            &trip,
            &self.model.meta.routing,
        );
        if !result.found {
            return None;
        }
        Some(RouteLeg::from_path(
            &self.model.graph,
            mode,
            result,
            origin.label(),
            &destination.name,
        ))
    }

    fn resolve_place(&self, name: &str) -> Option<(NodeId, &'a Destination)> {
        let destination = self.model.catalog.find_by_name(name)?;
        let node = nearest_node(&self.model.graph, &destination.point())?;
        Some((node, destination))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
