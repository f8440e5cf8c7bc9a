//! Access tags attached to edges.
//!
//! Raw tag strings from the network file are parsed once, at graph build
//! time. Conditional tags have the shape `if <condition> -> <mode>`.

use std::fmt;

use serde::Serialize;

use super::catalog::TripContext;
use super::mode::TagMode;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModeTag {
    /// Plain mode code, e.g. `W` or `4P`
    Mode { mode: TagMode },
    /// `if <condition> -> <mode>`
    Conditional(ConditionalAccess),
    /// Anything unrecognised, kept verbatim
    Other { raw: String },
}

impl ModeTag {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Some(conditional) = ConditionalAccess::parse(trimmed) {
            return ModeTag::Conditional(conditional);
        }

        match TagMode::parse(trimmed) {
            Some(mode) => ModeTag::Mode { mode },
            None => ModeTag::Other {
                raw: trimmed.to_string(),
            },
        }
    }

    pub fn parse_all<I, S>(raw: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(|tag| tag.as_ref().trim().to_string())
            .filter(|tag| !tag.is_empty())
            .map(|tag| Self::parse(&tag))
            .collect()
    }

    pub fn tag_mode(&self) -> Option<TagMode> {
        match self {
            ModeTag::Mode { mode } => Some(*mode),
            _ => None,
        }
    }

    /// Whether the tag names walking, either as the `W` code or as a
    /// free-form tag containing `W`
    pub fn mentions_walking(&self) -> bool {
        match self {
            ModeTag::Mode { mode } => *mode == TagMode::Walking,
            ModeTag::Conditional(conditional) => conditional.allowed == TagMode::Walking,
            ModeTag::Other { raw } => raw.contains('W'),
        }
    }
}

impl fmt::Display for ModeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeTag::Mode { mode } => f.write_str(mode.code()),
            ModeTag::Conditional(conditional) => write!(
                f,
                "if {} -> {}",
                conditional.condition,
                conditional.allowed.code()
            ),
            ModeTag::Other { raw } => f.write_str(raw),
        }
    }
}

/// Edge traversal granted to `allowed` only for trips matching `condition`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalAccess {
    pub condition: ConditionKind,
    pub allowed: TagMode,
}

impl ConditionalAccess {
    fn parse(raw: &str) -> Option<Self> {
        let lower = raw.to_ascii_lowercase();
        if !lower.starts_with("if ") {
            return None;
        }
        let (condition, mode) = raw[3..].split_once("->")?;
        let allowed = match TagMode::parse(mode) {
            Some(allowed) => allowed,
            None => {
                log::warn!("Conditional tag '{raw}' names unknown mode '{}'", mode.trim());
                return None;
            }
        };

        Some(Self {
            condition: ConditionKind::parse(condition),
            allowed,
        })
    }
}

/// Closed set of place conditions known to the campus network, plus a
/// generic name-containment fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "place", content = "value", rename_all = "snake_case")]
pub enum ConditionKind {
    ArchitectureBlockParking,
    MensHostelPickup(char),
    DevadanBlockParking,
    GirlsHostel,
    Block1Entrance1,
    NameContains(String),
}

impl ConditionKind {
    pub fn parse(text: &str) -> Self {
        let key = normalize(text);
        match key.as_str() {
            "architecture block parking" | "architecture parking" => {
                return ConditionKind::ArchitectureBlockParking;
            }
            "devadan block parking"
            | "devadhan block parking"
            | "devadan parking"
            | "devadhan parking" => return ConditionKind::DevadanBlockParking,
            "girls hostel" => return ConditionKind::GirlsHostel,
            "block 1 entrance 1" => return ConditionKind::Block1Entrance1,
            _ => {}
        }

        if let Some(rest) = key.strip_prefix("mens hostel block ") {
            let block = rest.strip_suffix(" pickup").unwrap_or(rest);
            if let [letter @ b'a'..=b'd'] = block.as_bytes() {
                return ConditionKind::MensHostelPickup(char::from(*letter).to_ascii_uppercase());
            }
        }

        ConditionKind::NameContains(text.trim().to_string())
    }

    /// Evaluates the condition against the trip's start and end names
    pub fn matches(&self, trip: &TripContext<'_>) -> bool {
        if let ConditionKind::NameContains(text) = self {
            return trip.any_name_contains(text);
        }

        let needles = self.needles();
        trip.endpoints().any(|destination| {
            let name = normalize(&destination.name);
            needles.iter().any(|needle| name.contains(needle.as_str()))
        })
    }

    fn needles(&self) -> Vec<String> {
        let fixed: &[&str] = match self {
            ConditionKind::ArchitectureBlockParking => {
                &["architecture block parking", "architecture parking"]
            }
            ConditionKind::DevadanBlockParking => &[
                "devadan block parking",
                "devadhan block parking",
                "devadan parking",
                "devadhan parking",
            ],
            ConditionKind::GirlsHostel => &["girls hostel"],
            ConditionKind::Block1Entrance1 => &["block 1 entrance 1"],
            ConditionKind::MensHostelPickup(block) => {
                return vec![format!(
                    "mens hostel block {}",
                    block.to_ascii_lowercase()
                )];
            }
            ConditionKind::NameContains(text) => return vec![normalize(text)],
        };
        fixed.iter().map(|s| (*s).to_string()).collect()
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionKind::ArchitectureBlockParking => f.write_str("Architecture Block Parking"),
            ConditionKind::MensHostelPickup(block) => {
                write!(f, "Men's Hostel Block {block} Pickup")
            }
            ConditionKind::DevadanBlockParking => f.write_str("Devadan Block Parking"),
            ConditionKind::GirlsHostel => f.write_str("Girls Hostel"),
            ConditionKind::Block1Entrance1 => f.write_str("Block 1 Entrance 1"),
            ConditionKind::NameContains(text) => f.write_str(text),
        }
    }
}

/// Lowercase, drop apostrophes, collapse whitespace
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace(['\'', '\u{2019}'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
