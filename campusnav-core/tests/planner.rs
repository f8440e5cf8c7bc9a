mod common;

use campusnav_core::prelude::*;
use campusnav_core::routing::{FALLBACK_COLOR, WaypointOverride};
use common::{assert_close, at, campus_model, campus_model_with, point};

fn destination<'a>(model: &'a CampusModel, id: &str) -> &'a Destination {
    model.catalog.get(id).expect("fixture destination")
}

#[test]
fn four_wheeler_from_gate_2_is_rejected_for_every_destination() {
    let model = campus_model();
    let planner = RoutePlanner::new(&model);
    let gate_2 = destination(&model, "gate-2");

    for target in model.catalog.iter() {
        let route = planner.plan(point(400.0, 0.0), target, Mode::FourWheeler, Some(gate_2));
        assert!(!route.found, "route to {} should be rejected", target.name);
        assert!(route.legs.is_empty());
        assert_eq!(route.total_distance_m, 0.0);
        assert_eq!(
            route.failure,
            Some(RouteFailure::InvalidGate {
                mode: Mode::FourWheeler,
                gate: "Gate 2".to_string(),
            })
        );
        assert_eq!(route.instructions.len(), 1);
        assert!(route.instructions[0].contains("Gate 1"));
    }
}

#[test]
fn four_wheeler_from_non_gate_start_is_rejected() {
    let model = campus_model();
    let library = destination(&model, "library");
    let parking = destination(&model, "main-parking");

    let route = plan_route(&model, point(100.0, 300.0), parking, Mode::FourWheeler, Some(library));
    assert!(!route.found);
    assert!(route.legs.is_empty());
}

#[test]
fn walking_ignores_gate_rules() {
    let model = campus_model();
    let library = destination(&model, "library");
    let gate_2 = destination(&model, "gate-2");

    let route = plan_route(&model, point(400.0, 0.0), library, Mode::Walking, Some(gate_2));
    assert!(route.found);
    assert_eq!(route.legs.len(), 1);
    assert_eq!(route.legs[0].mode, Mode::Walking);
    assert_eq!(route.strategy, Some(RouteStrategy::DirectFallback));
}

#[test]
fn two_wheeler_to_architecture_parking_goes_via_devadhan_parking() {
    let model = campus_model();
    let gate_2 = destination(&model, "gate-2");
    let architecture = destination(&model, "architecture-parking");

    let route = plan_route(&model, point(400.0, 0.0), architecture, Mode::TwoWheeler, Some(gate_2));

    assert!(route.found);
    assert_eq!(route.strategy, Some(RouteStrategy::ViaWaypoint));
    assert_eq!(route.legs.len(), 2);
    assert!(route.legs.iter().all(|leg| leg.mode == Mode::TwoWheeler));

    let devadhan = at(400.0, 200.0);
    assert_eq!(*route.legs[0].coordinates.last().unwrap(), devadhan);
    assert_eq!(route.legs[1].coordinates[0], devadhan);
    assert_eq!(route.legs[0].to_name, "Devadhan Block Parking");
    assert_eq!(route.legs[1].from_name, "Devadhan Block Parking");

    assert_close(route.legs[0].distance_m, 200.0, 1.0);
    assert_close(route.legs[1].distance_m, 200.0, 1.0);
}

#[test]
fn four_wheeler_direct_access_uses_parking_lane() {
    let model = campus_model();
    let gate_1 = destination(&model, "gate-1");
    let architecture = destination(&model, "architecture-parking");

    let route = plan_route(&model, point(0.0, 0.0), architecture, Mode::FourWheeler, Some(gate_1));

    assert!(route.found);
    assert_eq!(route.strategy, Some(RouteStrategy::Direct));
    assert_eq!(route.legs.len(), 1);
    assert!(route.legs[0].coordinates.contains(&at(500.0, 400.0)));
    assert!(!route.legs[0].coordinates.contains(&at(400.0, 200.0)));
    assert_close(route.total_distance_m, 1000.0, 2.0);
}

#[test]
fn four_wheeler_to_library_parks_then_walks() {
    let model = campus_model();
    let gate_1 = destination(&model, "gate-1");
    let library = destination(&model, "library");

    let route = plan_route(&model, point(0.0, 0.0), library, Mode::FourWheeler, Some(gate_1));

    assert!(route.found);
    assert!(route.is_hybrid());
    assert_eq!(route.strategy, Some(RouteStrategy::ParkAndWalk));
    let [drive, walk] = route.legs.as_slice() else {
        panic!("expected two legs, got {}", route.legs.len());
    };
    assert_eq!(drive.mode, Mode::FourWheeler);
    assert_eq!(walk.mode, Mode::Walking);
    assert_eq!(drive.to_name, "Main Parking");
    assert_eq!(drive.coordinates.last(), walk.coordinates.first());

    assert_eq!(route.total_distance_m, drive.distance_m + walk.distance_m);
    assert_eq!(route.total_travel_time_s, drive.travel_time_s + walk.travel_time_s);
    assert_close(drive.distance_m, 200.0, 1.0);
    assert_close(walk.distance_m, 200.0, 1.0);
    assert_eq!(route.instructions.len(), 2);
    assert!(route.instructions[0].starts_with("Drive from Gate 1 to Main Parking"));
    assert!(route.instructions[1].starts_with("Walk from Main Parking to Library"));
}

#[test]
fn two_wheeler_to_library_parks_at_devadhan() {
    let model = campus_model();
    let gate_2 = destination(&model, "gate-2");
    let library = destination(&model, "library");

    let route = plan_route(&model, point(400.0, 0.0), library, Mode::TwoWheeler, Some(gate_2));

    assert!(route.found);
    assert_eq!(route.legs.len(), 2);
    assert_eq!(route.legs[0].mode, Mode::TwoWheeler);
    assert_eq!(route.legs[1].mode, Mode::Walking);
    assert_eq!(route.legs[1].coordinates[0], at(400.0, 200.0));
    // Block Lane then Architecture Walk beats going back round the ring road
    assert_close(route.legs[1].distance_m, 200.0 + 100.0 * 10f64.sqrt(), 2.0);
}

#[test]
fn walking_rescue_is_marked_as_fallback() {
    let model = campus_model_with(AccessPolicy::unrestricted());
    let library = destination(&model, "library");

    let route = plan_route(&model, point(0.0, 0.0), library, Mode::FourWheeler, None);

    assert!(route.found);
    assert_eq!(route.strategy, Some(RouteStrategy::WalkingRescue));
    assert_eq!(route.legs.len(), 1);
    let leg = &route.legs[0];
    assert_eq!(leg.mode, Mode::Walking);
    assert_eq!(leg.style, LegStyle::Fallback);
    assert_eq!(leg.color, FALLBACK_COLOR);
    assert!(leg.description.to_lowercase().contains("fallback"));
    assert!(route.instructions[0].to_lowercase().contains("fallback"));
}

#[test]
fn failed_direct_access_goes_straight_to_walking_rescue() {
    let mut policy = AccessPolicy::unrestricted();
    policy.direct_access.four_wheeler = vec!["Library".to_string()];
    let model = campus_model_with(policy);
    let library = destination(&model, "library");

    let route = plan_route(&model, point(0.0, 0.0), library, Mode::FourWheeler, None);

    assert!(route.found);
    assert_eq!(route.strategy, Some(RouteStrategy::WalkingRescue));
    assert_eq!(route.legs.len(), 1);
    assert_eq!(route.legs[0].mode, Mode::Walking);
    assert!(route.legs[0].is_fallback());
}

#[test]
fn waypoint_route_with_unreachable_second_leg_is_discarded() {
    let mut policy = AccessPolicy::unrestricted();
    policy.waypoint_overrides.push(WaypointOverride {
        mode: Mode::FourWheeler,
        destination: "Library".to_string(),
        via: "Main Parking".to_string(),
    });
    let model = campus_model_with(policy);
    let library = destination(&model, "library");

    // Driving to Main Parking works, driving on to the Library does not
    let route = plan_route(&model, point(0.0, 0.0), library, Mode::FourWheeler, None);

    assert!(route.found);
    assert_ne!(route.strategy, Some(RouteStrategy::ViaWaypoint));
    assert_eq!(route.strategy, Some(RouteStrategy::WalkingRescue));
    assert_eq!(route.legs.len(), 1);
    assert_eq!(route.legs[0].mode, Mode::Walking);
    assert!(route.legs.iter().all(|leg| leg.mode != Mode::FourWheeler));
}

#[test]
fn park_and_walk_with_unreachable_walking_leg_is_discarded() {
    let model = campus_model();
    let gate_1 = destination(&model, "gate-1");
    let sports = destination(&model, "sports");

    // Gate 1 to Main Parking drives fine, but the sports track is a separate island
    let route = plan_route(&model, point(0.0, 0.0), sports, Mode::FourWheeler, Some(gate_1));

    assert!(!route.found);
    assert!(route.legs.is_empty());
    assert_eq!(route.strategy, None);
    assert_eq!(route.total_distance_m, 0.0);
    assert_eq!(route.failure, Some(RouteFailure::NoPath));
}

#[test]
fn non_finite_start_is_not_found() {
    let model = campus_model();
    let library = destination(&model, "library");

    for start in [
        geo::Point::new(f64::NAN, common::BASE_LAT),
        geo::Point::new(common::BASE_LNG, f64::INFINITY),
    ] {
        let route = plan_route(&model, start, library, Mode::Walking, None);
        assert!(!route.found);
        assert!(route.legs.is_empty());
        assert_eq!(route.failure, Some(RouteFailure::NoPath));
    }
}

#[test]
fn conditional_lane_opens_for_matching_trip() {
    let model = campus_model_with(AccessPolicy::unrestricted());
    let hostel = destination(&model, "girls-hostel");
    let library = destination(&model, "library");

    let to_hostel = plan_route(&model, point(0.0, 0.0), hostel, Mode::FourWheeler, None);
    assert!(to_hostel.found);
    assert_eq!(to_hostel.legs[0].mode, Mode::FourWheeler);
    assert_eq!(to_hostel.strategy, Some(RouteStrategy::DirectFallback));

    // Same lane, but the trip does not touch the hostel
    let graph = &model.graph;
    let start = graph.nearest_node(&point(100.0, 100.0)).unwrap().0;
    let lane_end = graph.nearest_node(&point(0.0, 300.0)).unwrap().0;
    let trip = TripContext::new(None, Some(library));
    let result = campusnav_core::routing::astar(
        graph,
        start,
        lane_end,
        Mode::FourWheeler,
        &trip,
        &model.meta.routing,
    );
    assert!(!result.found);
}

#[test]
fn disconnected_destination_is_not_found() {
    let model = campus_model();
    let sports = destination(&model, "sports");

    for mode in Mode::ALL {
        let route = plan_route(&model, point(0.0, 0.0), sports, mode, None);
        assert!(!route.found);
        assert!(route.legs.is_empty());
        assert_eq!(route.total_travel_time_s, 0.0);
        assert_eq!(route.failure, Some(RouteFailure::NoPath));
    }
}

#[test]
fn plan_many_matches_sequential_planning() {
    let model = campus_model();
    let planner = RoutePlanner::new(&model);
    let gate_2 = destination(&model, "gate-2");
    let targets: Vec<&Destination> = model.catalog.iter().collect();

    let parallel = planner.plan_many(point(400.0, 0.0), &targets, Mode::TwoWheeler, Some(gate_2));
    assert_eq!(parallel.len(), targets.len());
    for (route, target) in parallel.iter().zip(&targets) {
        let sequential = planner.plan(point(400.0, 0.0), *target, Mode::TwoWheeler, Some(gate_2));
        assert_eq!(route, &sequential);
    }
}

#[test]
fn plan_by_id_reports_unknown_destinations() {
    let model = campus_model();
    let planner = RoutePlanner::new(&model);

    let route = planner
        .plan_by_id(point(0.0, 0.0), "library", Mode::Walking, Some("gate-1"))
        .unwrap();
    assert!(route.found);

    assert!(matches!(
        planner.plan_by_id(point(0.0, 0.0), "observatory", Mode::Walking, None),
        Err(Error::UnknownDestination(id)) if id == "observatory"
    ));
    assert!(matches!(
        planner.plan_by_id(point(0.0, 0.0), "library", Mode::Walking, Some("gate-9")),
        Err(Error::UnknownDestination(_))
    ));
}

#[test]
fn route_exports_to_geojson() {
    let model = campus_model();
    let gate_1 = destination(&model, "gate-1");
    let library = destination(&model, "library");
    let route = plan_route(&model, point(0.0, 0.0), library, Mode::FourWheeler, Some(gate_1));

    let collection = route.to_geojson().unwrap();
    assert_eq!(collection.features.len(), route.legs.len());
    let walk = &collection.features[1];
    assert_eq!(walk.property("mode").unwrap(), "walking");
    assert_eq!(walk.property("color").unwrap(), Mode::Walking.color());
}
