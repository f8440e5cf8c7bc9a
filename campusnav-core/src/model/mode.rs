//! Transportation modes and the edge-tag vocabulary built on them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Mode a route (or a single leg) is travelled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Walking,
    TwoWheeler,
    FourWheeler,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Walking, Mode::TwoWheeler, Mode::FourWheeler];

    /// Default traversal speed in meters per second
    pub fn default_speed(self) -> f64 {
        match self {
            Mode::Walking => 1.4,
            Mode::TwoWheeler => 6.94,
            Mode::FourWheeler => 5.56,
        }
    }

    pub fn is_vehicle(self) -> bool {
        !matches!(self, Mode::Walking)
    }

    /// Stable display color for legs travelled in this mode
    pub fn color(self) -> &'static str {
        match self {
            Mode::Walking => "#2E7D32",
            Mode::TwoWheeler => "#1565C0",
            Mode::FourWheeler => "#C62828",
        }
    }

    pub(crate) fn verb(self) -> &'static str {
        match self {
            Mode::Walking => "Walk",
            Mode::TwoWheeler => "Ride",
            Mode::FourWheeler => "Drive",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Walking => "walking",
            Mode::TwoWheeler => "two_wheeler",
            Mode::FourWheeler => "four_wheeler",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::Walking => "walking",
            Mode::TwoWheeler => "two-wheeler",
            Mode::FourWheeler => "four-wheeler",
        };
        f.write_str(label)
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" | "walk" | "w" => Ok(Mode::Walking),
            "two_wheeler" | "two-wheeler" | "twowheeler" | "2w" | "2" => Ok(Mode::TwoWheeler),
            "four_wheeler" | "four-wheeler" | "fourwheeler" | "4w" | "4" | "car" => {
                Ok(Mode::FourWheeler)
            }
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

/// Mode vocabulary used on edges.
///
/// Superset of [`Mode`]: four-wheeler edges may be restricted to parking
/// access or pickup/drop-off traffic. Those variants are never requested
/// directly, a [`Mode::FourWheeler`] query may use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagMode {
    Walking,
    TwoWheeler,
    FourWheeler,
    FourWheelerParking,
    FourWheelerPickup,
}

impl TagMode {
    /// Parses a short code (`W`, `2`, `4`, `4P`, `4PU`) or a long name
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        match code.to_ascii_uppercase().as_str() {
            "W" | "WALKING" | "WALK" => Some(TagMode::Walking),
            "2" | "2W" | "TWO_WHEELER" | "TWO-WHEELER" => Some(TagMode::TwoWheeler),
            "4" | "4W" | "FOUR_WHEELER" | "FOUR-WHEELER" => Some(TagMode::FourWheeler),
            "4P" | "FOUR_WHEELER_PARKING" => Some(TagMode::FourWheelerParking),
            "4PU" | "FOUR_WHEELER_PICKUP" => Some(TagMode::FourWheelerPickup),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            TagMode::Walking => "W",
            TagMode::TwoWheeler => "2",
            TagMode::FourWheeler => "4",
            TagMode::FourWheelerParking => "4P",
            TagMode::FourWheelerPickup => "4PU",
        }
    }

    pub fn is_four_wheeler_variant(self) -> bool {
        matches!(
            self,
            TagMode::FourWheelerParking | TagMode::FourWheelerPickup
        )
    }

    /// Exact correspondence with a requested mode
    pub fn is_exactly(self, mode: Mode) -> bool {
        TagMode::from(mode) == self
    }

    /// Exact match, or a four-wheeler sub-variant when four-wheeler is requested
    pub fn admits(self, mode: Mode) -> bool {
        self.is_exactly(mode) || (mode == Mode::FourWheeler && self.is_four_wheeler_variant())
    }
}

impl From<Mode> for TagMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Walking => TagMode::Walking,
            Mode::TwoWheeler => TagMode::TwoWheeler,
            Mode::FourWheeler => TagMode::FourWheeler,
        }
    }
}

/// One value per requestable [`Mode`], laid out for readable configuration files
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeTable<T: Default> {
    pub walking: T,
    pub two_wheeler: T,
    pub four_wheeler: T,
}

impl<T: Default> ModeTable<T> {
    pub fn new(walking: T, two_wheeler: T, four_wheeler: T) -> Self {
        Self {
            walking,
            two_wheeler,
            four_wheeler,
        }
    }

    pub fn get(&self, mode: Mode) -> &T {
        match mode {
            Mode::Walking => &self.walking,
            Mode::TwoWheeler => &self.two_wheeler,
            Mode::FourWheeler => &self.four_wheeler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("walking".parse::<Mode>().unwrap(), Mode::Walking);
        assert_eq!("Two_Wheeler".parse::<Mode>().unwrap(), Mode::TwoWheeler);
        assert_eq!("4W".parse::<Mode>().unwrap(), Mode::FourWheeler);
        assert!("hovercraft".parse::<Mode>().is_err());
    }

    #[test]
    fn test_tag_codes() {
        assert_eq!(TagMode::parse("w"), Some(TagMode::Walking));
        assert_eq!(TagMode::parse("4P"), Some(TagMode::FourWheelerParking));
        assert_eq!(TagMode::parse("4pu"), Some(TagMode::FourWheelerPickup));
        assert_eq!(TagMode::parse("bus"), None);
        for tag in [
            TagMode::Walking,
            TagMode::TwoWheeler,
            TagMode::FourWheeler,
            TagMode::FourWheelerParking,
            TagMode::FourWheelerPickup,
        ] {
            assert_eq!(TagMode::parse(tag.code()), Some(tag));
        }
    }

    #[test]
    fn test_sub_variants_admit_only_four_wheeler() {
        assert!(TagMode::FourWheelerParking.admits(Mode::FourWheeler));
        assert!(TagMode::FourWheelerPickup.admits(Mode::FourWheeler));
        assert!(!TagMode::FourWheelerParking.admits(Mode::TwoWheeler));
        assert!(!TagMode::FourWheelerParking.is_exactly(Mode::FourWheeler));
    }

    #[test]
    fn test_mode_table_lookup() {
        let table = ModeTable::new(1, 2, 4);
        assert_eq!(*table.get(Mode::Walking), 1);
        assert_eq!(*table.get(Mode::TwoWheeler), 2);
        assert_eq!(*table.get(Mode::FourWheeler), 4);
    }

    #[test]
    fn test_speeds_are_positive() {
        for mode in Mode::ALL {
            assert!(mode.default_speed() > 0.0);
        }
    }
}
