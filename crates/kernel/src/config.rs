//! Flight configuration, loaded from YAML.
//!
//! Every field has a default, so an empty document is a valid config:
//! ```yaml
//! constants:
//!   max_thrust: 5.0
//! bindings:
//!   ArrowUp: thrust-up
//!   ArrowDown: thrust-down
//! frame:
//!   delta: 0.01
//!   start_position: [0.0, 0.25, 2.0]
//! ```

use flightsim_input::KeyBindings;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::FlightConstants;
use crate::error::FlightError;

/// Frame loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Simulated seconds per frame.
    pub delta: f32,
    /// Where the body sits before the first frame.
    pub start_position: Vec3,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            delta: 0.01,
            start_position: Vec3::new(0.0, 0.25, 2.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub constants: FlightConstants,
    pub bindings: KeyBindings,
    pub frame: FrameConfig,
}

impl FlightConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FlightError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlightError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded flight config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, FlightError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), FlightError> {
        self.constants.validate()?;
        self.bindings.validate()?;
        if !self.frame.delta.is_finite() || self.frame.delta < 0.0 {
            return Err(FlightError::InvalidConfig(format!(
                "frame delta must be a non-negative number, got {}",
                self.frame.delta
            )));
        }
        if !self.frame.start_position.is_finite() {
            return Err(FlightError::InvalidConfig(
                "start position must be finite".into(),
            ));
        }
        Ok(())
    }
}
