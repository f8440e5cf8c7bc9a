use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::Error;
use crate::routing::planner::{HybridRoute, RouteLeg};

impl HybridRoute {
    /// Converts the route to a `GeoJSON` `FeatureCollection`, one feature per leg
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .legs
            .iter()
            .enumerate()
            .map(|(idx, leg)| leg.to_feature(idx))
            .collect::<Result<Vec<_>, _>>()?;

        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert("found".to_string(), json!(self.found));
        foreign_members.insert("total_distance_m".to_string(), json!(self.total_distance_m));
        foreign_members.insert(
            "total_travel_time_s".to_string(),
            json!(self.total_travel_time_s),
        );
        foreign_members.insert("instructions".to_string(), json!(self.instructions));

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: Some(foreign_members),
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(Error::from)
    }
}

impl RouteLeg {
    fn to_feature(&self, leg_idx: usize) -> Result<Feature, Error> {
        let coords: Vec<Coord<f64>> = self
            .coordinates
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect();

        let geometry = match coords.as_slice() {
            [single] => Geometry::new(GeoJsonValue::from(&Point::from(*single))),
            _ => Geometry::new(GeoJsonValue::from(&LineString::new(coords))),
        };

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "leg_index": leg_idx,
                "mode": self.mode,
                "color": self.color,
                "style": self.style,
                "distance_m": self.distance_m,
                "time_s": self.travel_time_s,
                "from_name": self.from_name,
                "to_name": self.to_name,
                "description": self.description,
            }
        });

        serde_json::from_value::<Feature>(value)
            .map_err(geojson::Error::from)
            .map_err(Error::from)
    }
}
