#![allow(dead_code)]

use campusnav_core::loading::{build_campus_model, catalog_from_json, parse_network};
use campusnav_core::prelude::*;
use geo::Point;
use serde_json::{Value, json};

pub const BASE_LNG: f64 = 77.43;
pub const BASE_LAT: f64 = 12.86;
const METERS_PER_DEGREE: f64 = 111_194.926_644_558_73;

/// `[lng, lat]` of a point `east` / `north` meters away from the base
pub fn at(east: f64, north: f64) -> [f64; 2] {
    let lat = BASE_LAT + north / METERS_PER_DEGREE;
    let lng = BASE_LNG + east / (METERS_PER_DEGREE * BASE_LAT.to_radians().cos());
    [lng, lat]
}

pub fn point(east: f64, north: f64) -> Point<f64> {
    let [lng, lat] = at(east, north);
    Point::new(lng, lat)
}

fn line(points: &[(f64, f64)], modes: &[&str], name: &str) -> Value {
    let coordinates: Vec<[f64; 2]> = points.iter().map(|&(e, n)| at(e, n)).collect();
    json!({
        "type": "Feature",
        "geometry": {"type": "LineString", "coordinates": coordinates},
        "properties": {"modes": modes, "name": name, "surface": "asphalt"}
    })
}

fn place(id: &str, name: &str, east: f64, north: f64, category: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "coordinates": at(east, north),
        "type": "building",
        "category": category,
    })
}

/// Small campus:
///
/// ```text
///  (0,300) Girls Hostel    (100,300) Library ---------- (400,400) Architecture Block Parking
///     |  if Girls Hostel -> 4     | W                      |  W,2            | 4P lane up x=500
///  (0,100) ------------ (100,100) Main Parking          (400,200) Devadhan Block Parking
///                                 | W,4                    |  W,2
///  (0,0) Gate 1 ------- (100,0) ------------- W,4 ------ (400,0) Gate 2 --- 4P --- (500,0)
/// ```
pub fn campus_network() -> String {
    json!({
        "type": "FeatureCollection",
        "features": [
            line(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)], &["W", "4"], "Main Road"),
            line(&[(100.0, 0.0), (400.0, 0.0)], &["W", "4"], "Ring Road"),
            line(&[(400.0, 0.0), (400.0, 200.0)], &["W", "2"], "Two Wheeler Lane"),
            line(&[(400.0, 200.0), (400.0, 400.0)], &["W", "2"], "Block Lane"),
            line(&[(100.0, 100.0), (100.0, 300.0)], &["W"], "Library Walk"),
            line(&[(400.0, 400.0), (100.0, 300.0)], &["W"], "Architecture Walk"),
            line(
                &[(400.0, 0.0), (500.0, 0.0), (500.0, 400.0), (400.0, 400.0)],
                &["W", "4P"],
                "Parking Access",
            ),
            line(
                &[(100.0, 100.0), (0.0, 100.0), (0.0, 300.0)],
                &["W", "if Girls Hostel -> 4"],
                "Hostel Drive",
            ),
            line(&[(1000.0, 1000.0), (1050.0, 1000.0)], &["W"], "Sports Track"),
        ]
    })
    .to_string()
}

pub fn campus_catalog() -> String {
    json!([
        place("gate-1", "Gate 1", 0.0, 0.0, "entrance"),
        place("gate-2", "Gate 2", 400.0, 0.0, "entrance"),
        place("main-parking", "Main Parking", 100.0, 100.0, "parking"),
        place("devadhan-parking", "Devadhan Block Parking", 400.0, 200.0, "parking"),
        place("architecture-parking", "Architecture Block Parking", 400.0, 400.0, "parking"),
        place("library", "Library", 100.0, 300.0, "academic"),
        place("girls-hostel", "Girls Hostel", 0.0, 300.0, "hostel"),
        place("sports", "Sports Complex", 1020.0, 1005.0, "sports"),
    ])
    .to_string()
}

pub fn campus_model_with(policy: AccessPolicy) -> CampusModel {
    let features = parse_network(&campus_network()).expect("fixture network parses");
    let catalog = catalog_from_json(&campus_catalog()).expect("fixture catalog parses");
    let meta = CampusModelMeta {
        routing: RoutingConfig::default(),
        policy,
    };
    build_campus_model(&features, catalog, DEFAULT_SNAP_TOLERANCE_M, meta)
}

pub fn campus_model() -> CampusModel {
    campus_model_with(AccessPolicy::default())
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
