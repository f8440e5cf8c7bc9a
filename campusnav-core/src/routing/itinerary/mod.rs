//! Export of planned routes for map rendering

mod to_geojson;
