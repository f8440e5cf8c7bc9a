//! Place-specific access rules, kept as configuration data

use serde::{Deserialize, Serialize};

use crate::model::{Destination, Mode, ModeTable};

/// Route leg that must pass through a named place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointOverride {
    pub mode: Mode,
    /// Destination name the override applies to
    pub destination: String,
    /// Name of the place to pass through
    pub via: String,
}

/// Campus access rules for the hybrid planner.
///
/// All names are matched case-insensitively against catalog destination
/// names. An empty gate list leaves the mode unrestricted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessPolicy {
    /// Entrances a mode may start from
    pub entry_gates: ModeTable<Vec<String>>,
    /// Destinations a vehicle may drive right up to
    pub direct_access: ModeTable<Vec<String>>,
    pub waypoint_overrides: Vec<WaypointOverride>,
    /// Where a vehicle is left before walking the rest of the way
    pub parking: ModeTable<Option<String>>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        let names = |names: &[&str]| names.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();

        Self {
            entry_gates: ModeTable::new(
                names(&["Gate 1", "Gate 2"]),
                names(&["Gate 2"]),
                names(&["Gate 1"]),
            ),
            direct_access: ModeTable::new(
                Vec::new(),
                names(&["Devadhan Block Parking"]),
                names(&["Main Parking", "Architecture Block Parking"]),
            ),
            waypoint_overrides: vec![WaypointOverride {
                mode: Mode::TwoWheeler,
                destination: "Architecture Block Parking".to_string(),
                via: "Devadhan Block Parking".to_string(),
            }],
            parking: ModeTable::new(
                None,
                Some("Devadhan Block Parking".to_string()),
                Some("Main Parking".to_string()),
            ),
        }
    }
}

impl AccessPolicy {
    /// Policy without any place rules: every strategy falls through to a
    /// direct search
    pub fn unrestricted() -> Self {
        Self {
            entry_gates: ModeTable::default(),
            direct_access: ModeTable::default(),
            waypoint_overrides: Vec::new(),
            parking: ModeTable::default(),
        }
    }

    /// Whether `mode` may enter campus through `gate`
    pub fn gate_allowed(&self, mode: Mode, gate: &Destination) -> bool {
        let gates = self.entry_gates.get(mode);
        gates.is_empty() || gates.iter().any(|name| gate.is_named(name))
    }

    pub fn permitted_gates(&self, mode: Mode) -> &[String] {
        self.entry_gates.get(mode)
    }

    pub fn has_direct_access(&self, mode: Mode, destination: &Destination) -> bool {
        mode.is_vehicle()
            && self
                .direct_access
                .get(mode)
                .iter()
                .any(|name| destination.is_named(name))
    }

    pub fn waypoint_for(&self, mode: Mode, destination: &Destination) -> Option<&str> {
        self.waypoint_overrides
            .iter()
            .find(|rule| rule.mode == mode && destination.is_named(&rule.destination))
            .map(|rule| rule.via.as_str())
    }

    pub fn parking_for(&self, mode: Mode) -> Option<&str> {
        if !mode.is_vehicle() {
            return None;
        }
        self.parking.get(mode).as_deref()
    }

    /// Every place name the policy mentions
    pub fn referenced_names(&self) -> impl Iterator<Item = &str> {
        Mode::ALL
            .into_iter()
            .flat_map(move |mode| {
                self.entry_gates
                    .get(mode)
                    .iter()
                    .chain(self.direct_access.get(mode))
                    .chain(self.parking.get(mode))
            })
            .chain(
                self.waypoint_overrides
                    .iter()
                    .flat_map(|rule| [&rule.destination, &rule.via]),
            )
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn place(name: &str, category: Category) -> Destination {
        Destination {
            id: name.to_lowercase(),
            name: name.to_string(),
            coordinates: [0.0, 0.0],
            kind: String::new(),
            category,
        }
    }

    #[test]
    fn test_default_gate_rules() {
        let policy = AccessPolicy::default();
        let gate_1 = place("Gate 1", Category::Entrance);
        let gate_2 = place("gate 2", Category::Entrance);

        assert!(policy.gate_allowed(Mode::FourWheeler, &gate_1));
        assert!(!policy.gate_allowed(Mode::FourWheeler, &gate_2));
        assert!(policy.gate_allowed(Mode::TwoWheeler, &gate_2));
        assert!(!policy.gate_allowed(Mode::TwoWheeler, &gate_1));
        assert!(policy.gate_allowed(Mode::Walking, &gate_1));
        assert!(policy.gate_allowed(Mode::Walking, &gate_2));
    }

    #[test]
    fn test_unrestricted_policy_allows_any_gate() {
        let policy = AccessPolicy::unrestricted();
        let hostel = place("Girls Hostel", Category::Hostel);
        assert!(policy.gate_allowed(Mode::FourWheeler, &hostel));
        assert!(policy.parking_for(Mode::FourWheeler).is_none());
    }

    #[test]
    fn test_direct_access_and_overrides() {
        let policy = AccessPolicy::default();
        let architecture = place("Architecture Block Parking", Category::Parking);

        assert!(policy.has_direct_access(Mode::FourWheeler, &architecture));
        assert!(!policy.has_direct_access(Mode::TwoWheeler, &architecture));
        assert_eq!(
            policy.waypoint_for(Mode::TwoWheeler, &architecture),
            Some("Devadhan Block Parking")
        );
        assert_eq!(policy.waypoint_for(Mode::FourWheeler, &architecture), None);
        assert_eq!(policy.parking_for(Mode::Walking), None);
        assert_eq!(policy.parking_for(Mode::FourWheeler), Some("Main Parking"));
    }

    #[test]
    fn test_referenced_names() {
        let policy = AccessPolicy::default();
        let names: Vec<&str> = policy.referenced_names().collect();
        assert!(names.contains(&"Gate 1"));
        assert!(names.contains(&"Devadhan Block Parking"));
        assert!(names.contains(&"Architecture Block Parking"));
    }
}
