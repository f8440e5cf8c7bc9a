//! GeoJSON ingestion of the campus path network

use std::fs;
use std::path::Path;

use geo::{Coord, Geometry, LineString};
use geojson::{Feature, FeatureCollection, GeoJson};
use log::{debug, info, warn};
use serde_json::Value as JsonValue;

use crate::Error;

/// Path segment polyline with its access tags
#[derive(Debug, Clone, PartialEq)]
pub struct LineFeature {
    /// Ordered coordinates (x = longitude, y = latitude)
    pub coordinates: Vec<Coord<f64>>,
    /// Raw mode tags, parsed during graph construction
    pub modes: Vec<String>,
    pub surface: Option<String>,
    pub name: Option<String>,
}

impl LineFeature {
    pub fn new<S: Into<String>>(
        coordinates: Vec<Coord<f64>>,
        modes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            coordinates,
            modes: modes.into_iter().map(Into::into).collect(),
            surface: None,
            name: None,
        }
    }
}

/// Named point that becomes a destination node
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    pub coordinate: Coord<f64>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkFeatures {
    pub lines: Vec<LineFeature>,
    pub points: Vec<PointFeature>,
}

/// Reads a GeoJSON file with the network
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a feature collection
pub fn read_network(path: &Path) -> Result<NetworkFeatures, Error> {
    let text = fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    let features = parse_network(&text)?;
    info!(
        "Read {} path segments and {} named points from {}",
        features.lines.len(),
        features.points.len(),
        path.display()
    );
    Ok(features)
}

/// Parses a GeoJSON `FeatureCollection`.
///
/// Unsupported geometries and malformed features are skipped.
///
/// # Errors
///
/// Returns an error if the text is not GeoJSON or not a feature collection
pub fn parse_network(text: &str) -> Result<NetworkFeatures, Error> {
    let geojson: GeoJson = text.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;
    Ok(NetworkFeatures::from(collection))
}

impl From<FeatureCollection> for NetworkFeatures {
    fn from(collection: FeatureCollection) -> Self {
        let mut network = NetworkFeatures::default();
        for feature in collection.features {
            network.push_feature(feature);
        }
        network
    }
}

impl NetworkFeatures {
    fn push_feature(&mut self, mut feature: Feature) {
        let name = string_property(&feature, "name");
        let Some(geometry) = feature.geometry.take() else {
            debug!("Skipping feature without geometry ({name:?})");
            return;
        };
        let geometry = match Geometry::<f64>::try_from(geometry) {
            Ok(geometry) => geometry,
            Err(e) => {
                warn!("Skipping feature with invalid geometry ({name:?}): {e}");
                return;
            }
        };

        match geometry {
            Geometry::Point(point) => match name {
                Some(name) => self.points.push(PointFeature {
                    coordinate: point.into(),
                    name,
                }),
                None => warn!("Skipping unnamed point at {:?}", point.x_y()),
            },
            Geometry::LineString(line) => self.push_line(&feature, line, name),
            Geometry::MultiLineString(lines) => {
                for line in lines {
                    self.push_line(&feature, line, name.clone());
                }
            }
            other => debug!("Skipping unsupported geometry {other:?}"),
        }
    }

    fn push_line(&mut self, feature: &Feature, line: LineString<f64>, name: Option<String>) {
        if line.0.len() < 2 {
            warn!("Skipping path segment with fewer than two positions ({name:?})");
            return;
        }
        self.lines.push(LineFeature {
            coordinates: line.0,
            modes: mode_tags(feature.property("modes")),
            surface: string_property(feature, "surface"),
            name,
        });
    }
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Mode tags as a JSON array of strings or a comma separated string
fn mode_tags(value: Option<&JsonValue>) -> Vec<String> {
    match value {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(JsonValue::as_str)
            .map(str::to_string)
            .collect(),
        Some(JsonValue::String(list)) => list.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}
