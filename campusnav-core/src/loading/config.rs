use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::Mode;
use crate::routing::AccessPolicy;
use crate::{DEFAULT_MAX_ITERATIONS, DEFAULT_SNAP_TOLERANCE_M, Error, Meters};

/// Configuration for building a [`CampusModel`](crate::model::CampusModel)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusModelConfig {
    /// GeoJSON feature collection with path segments and named points
    pub network_path: PathBuf,
    /// Destination catalog, `.json` or `.csv`
    pub catalog_path: PathBuf,
    /// Coordinates closer than this are merged into one node
    #[serde(default = "default_snap_tolerance")]
    pub snap_tolerance_m: Meters,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub policy: AccessPolicy,
}

impl CampusModelConfig {
    pub fn new(network_path: impl AsRef<Path>, catalog_path: impl AsRef<Path>) -> Self {
        Self {
            network_path: network_path.as_ref().to_path_buf(),
            catalog_path: catalog_path.as_ref().to_path_buf(),
            snap_tolerance_m: DEFAULT_SNAP_TOLERANCE_M,
            routing: RoutingConfig::default(),
            policy: AccessPolicy::default(),
        }
    }

    /// Checks values that do not depend on the file system
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive snap tolerance or invalid routing
    /// parameters
    pub fn validate(&self) -> Result<(), Error> {
        if !self.snap_tolerance_m.is_finite() || self.snap_tolerance_m <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "snap_tolerance_m must be a positive number, got {}",
                self.snap_tolerance_m
            )));
        }
        if !(2.0..=5.0).contains(&self.snap_tolerance_m) {
            log::warn!(
                "Snap tolerance of {} m is outside the usual 2-5 m range",
                self.snap_tolerance_m
            );
        }
        self.routing.validate()
    }
}

fn default_snap_tolerance() -> Meters {
    DEFAULT_SNAP_TOLERANCE_M
}

/// Search parameters shared by every query against a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub speeds: SpeedTable,
    /// Node expansions after which a search gives up
    pub max_iterations: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            speeds: SpeedTable::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RoutingConfig {
    /// Traversal speed in meters per second
    pub fn speed(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Walking => self.speeds.walking,
            Mode::TwoWheeler => self.speeds.two_wheeler,
            Mode::FourWheeler => self.speeds.four_wheeler,
        }
    }

    /// # Errors
    ///
    /// Returns an error if any speed is not a positive finite number or the
    /// iteration cap is zero
    pub fn validate(&self) -> Result<(), Error> {
        for mode in Mode::ALL {
            let speed = self.speed(mode);
            if !speed.is_finite() || speed <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "speed for {mode} must be positive, got {speed}"
                )));
            }
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_iterations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-mode speeds in meters per second
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedTable {
    #[serde(default = "walking_speed")]
    pub walking: f64,
    #[serde(default = "two_wheeler_speed")]
    pub two_wheeler: f64,
    #[serde(default = "four_wheeler_speed")]
    pub four_wheeler: f64,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            walking: walking_speed(),
            two_wheeler: two_wheeler_speed(),
            four_wheeler: four_wheeler_speed(),
        }
    }
}

fn walking_speed() -> f64 {
    Mode::Walking.default_speed()
}

fn two_wheeler_speed() -> f64 {
    Mode::TwoWheeler.default_speed()
}

fn four_wheeler_speed() -> f64 {
    Mode::FourWheeler.default_speed()
}
