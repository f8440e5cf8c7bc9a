//! Destination catalog loading (JSON or CSV)

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::Error;
use crate::model::{Category, Destination, DestinationCatalog};

/// Loads the catalog, picking the format from the file extension
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains invalid records
pub fn load_catalog(path: &Path) -> Result<DestinationCatalog, Error> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let catalog = match extension.as_deref() {
        Some("csv") => catalog_from_csv(open(path)?)?,
        Some("json") | Some("geojson") => catalog_from_json(&fs::read_to_string(path)?)?,
        _ => {
            return Err(Error::InvalidData(format!(
                "Unsupported catalog format: {}",
                path.display()
            )));
        }
    };

    log::info!(
        "Loaded {} destinations from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        ))
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    List(Vec<Destination>),
    Wrapped { destinations: Vec<Destination> },
}

/// Parses a JSON array of destination records, or an object with a
/// `destinations` array
///
/// # Errors
///
/// Returns an error on malformed JSON or duplicate ids
pub fn catalog_from_json(text: &str) -> Result<DestinationCatalog, Error> {
    let destinations = match serde_json::from_str::<JsonCatalog>(text)? {
        JsonCatalog::List(destinations) | JsonCatalog::Wrapped { destinations } => destinations,
    };
    DestinationCatalog::new(destinations)
}

#[derive(Debug, Deserialize)]
struct CsvDestination {
    id: String,
    name: String,
    lng: f64,
    lat: f64,
    #[serde(rename = "type", default)]
    kind: String,
    category: String,
}

impl TryFrom<CsvDestination> for Destination {
    type Error = Error;

    fn try_from(row: CsvDestination) -> Result<Self, Self::Error> {
        Ok(Destination {
            category: row.category.parse::<Category>()?,
            id: row.id,
            name: row.name,
            coordinates: [row.lng, row.lat],
            kind: row.kind,
        })
    }
}

/// Parses CSV with the header `id,name,lng,lat,type,category`
///
/// # Errors
///
/// Returns an error on malformed rows, unknown categories or duplicate ids
pub fn catalog_from_csv<R: Read>(reader: R) -> Result<DestinationCatalog, Error> {
    let destinations = csv::Reader::from_reader(reader)
        .deserialize::<CsvDestination>()
        .map(|row| Destination::try_from(row?))
        .collect::<Result<Vec<_>, Error>>()?;
    DestinationCatalog::new(destinations)
}
