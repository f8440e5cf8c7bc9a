//! Named destinations and the per-trip context derived from them

use std::fmt;
use std::str::FromStr;

use geo::Point;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entrance,
    Parking,
    Academic,
    Hostel,
    Dining,
    Sports,
    Facility,
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entrance" | "gate" => Ok(Category::Entrance),
            "parking" => Ok(Category::Parking),
            "academic" => Ok(Category::Academic),
            "hostel" => Ok(Category::Hostel),
            "dining" => Ok(Category::Dining),
            "sports" => Ok(Category::Sports),
            "facility" => Ok(Category::Facility),
            other => Err(Error::InvalidData(format!("Unknown category '{other}'"))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Entrance => "entrance",
            Category::Parking => "parking",
            Category::Academic => "academic",
            Category::Hostel => "hostel",
            Category::Dining => "dining",
            Category::Sports => "sports",
            Category::Facility => "facility",
        };
        f.write_str(label)
    }
}

/// Named point of interest on campus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
    #[serde(rename = "type", default)]
    pub kind: String,
    pub category: Category,
}

impl Destination {
    pub fn lng(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.lng(), self.lat())
    }

    /// Case-insensitive equality on the display name
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

/// Read-only registry of destinations, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct DestinationCatalog {
    destinations: Vec<Destination>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl DestinationCatalog {
    /// # Errors
    ///
    /// Returns an error when two records share an id
    pub fn new(destinations: Vec<Destination>) -> Result<Self, Error> {
        let mut by_id = HashMap::with_capacity(destinations.len());
        let mut by_name = HashMap::with_capacity(destinations.len());

        for (idx, destination) in destinations.iter().enumerate() {
            if by_id.insert(destination.id.clone(), idx).is_some() {
                return Err(Error::InvalidData(format!(
                    "Duplicate destination id '{}'",
                    destination.id
                )));
            }
            // First record wins on duplicate names
            by_name
                .entry(normalize_name(&destination.name))
                .or_insert(idx);
        }

        Ok(Self {
            destinations,
            by_id,
            by_name,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.by_id.get(id).map(|&idx| &self.destinations[idx])
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Destination> {
        self.by_name
            .get(&normalize_name(name))
            .map(|&idx| &self.destinations[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Destination> {
        self.destinations
            .iter()
            .filter(move |d| d.category == category)
    }

    pub fn gates(&self) -> impl Iterator<Item = &Destination> {
        self.by_category(Category::Entrance)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Start and end destinations of the trip a search runs for.
///
/// Conditional edge rules are evaluated against these names.
#[derive(Debug, Clone, Copy, Default)]
pub struct TripContext<'a> {
    pub start: Option<&'a Destination>,
    pub end: Option<&'a Destination>,
}

impl<'a> TripContext<'a> {
    pub fn new(start: Option<&'a Destination>, end: Option<&'a Destination>) -> Self {
        Self { start, end }
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &'a Destination> {
        self.start.into_iter().chain(self.end)
    }

    /// True if either endpoint's name contains `needle` (case-insensitive)
    pub fn any_name_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.endpoints()
            .any(|d| d.name.to_lowercase().contains(&needle))
    }
}
