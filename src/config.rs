//! Routing configuration
//!
//! Travel times are derived from straight-line segment lengths and a speed per
//! road type. The built-in table can be overridden from a TOML file:
//!
//! ```toml
//! [speeds]
//! highway = 90.0
//! local_road = 25.0
//! ```
//!
//! Keys left out keep their default value.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Speed in map units per minute, by road type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTable {
    pub highway: f64,
    pub main_road: f64,
    pub secondary_road: f64,
    pub local_road: f64,
    /// Used for road types not listed above
    pub other: f64,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            highway: 80.0,
            main_road: 50.0,
            secondary_road: 40.0,
            local_road: 30.0,
            other: 30.0,
        }
    }
}

impl SpeedTable {
    pub fn speed_for(&self, road_type: &str) -> f64 {
        match road_type {
            "highway" => self.highway,
            "main_road" => self.main_road,
            "secondary_road" => self.secondary_road,
            "local_road" => self.local_road,
            _ => self.other,
        }
    }

    fn validate(&self) -> Result<()> {
        let entries = [
            ("highway", self.highway),
            ("main_road", self.main_road),
            ("secondary_road", self.secondary_road),
            ("local_road", self.local_road),
            ("other", self.other),
        ];
        for (name, speed) in entries {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(Error::InvalidInput(format!(
                    "speed for {name} must be a positive number, got {speed}"
                )));
            }
        }
        Ok(())
    }
}

/// Top-level configuration of butterfly-nav
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub speeds: SpeedTable,
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(text)?;
        config.speeds.validate()?;
        Ok(config)
    }
}
