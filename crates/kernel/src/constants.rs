use serde::{Deserialize, Serialize};

use crate::error::FlightError;

/// Tuning constants for the flight model.
///
/// Units are loose: time is in seconds, everything else is in "toy" units
/// picked so that the default aircraft takes off at a speed of roughly 10.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConstants {
    /// Constant vertical velocity contribution. Negative pulls down.
    pub gravity: f32,
    pub air_density: f32,
    pub frame_area: f32,
    pub drag_coefficient: f32,
    pub lift_coefficient: f32,
    pub max_thrust: f32,
    /// Angular rate multiplier for pitch, yaw and roll inputs.
    pub roll_speed: f32,
    /// Lowest vertical position the body may occupy.
    pub ground_height: f32,
    /// Braking only applies above this speed.
    pub brake_threshold: f32,
    /// Speed removed per frame while braking on the ground.
    pub brake_decrement: f32,
    /// Gain of the autonomous correction applied while climbing.
    pub roll_correction_gain: f32,
    /// Yaw input is divided by this before it is applied.
    pub yaw_damping: f32,
    /// Threshold for the change notification.
    pub change_epsilon: f32,
}

impl Default for FlightConstants {
    fn default() -> Self {
        Self {
            gravity: -0.75,
            air_density: 1.225,
            frame_area: 1.5,
            drag_coefficient: 0.027,
            lift_coefficient: 0.008,
            max_thrust: 3.5,
            roll_speed: 0.75,
            ground_height: 0.125,
            brake_threshold: 0.003,
            brake_decrement: 0.01,
            roll_correction_gain: 0.005,
            yaw_damping: 7.5,
            change_epsilon: 0.000_001,
        }
    }
}

impl FlightConstants {
    /// Thrust gained or lost per frame while a thrust key is held.
    pub fn acceleration_constant(&self) -> f32 {
        self.max_thrust / 100.0
    }

    /// Quadratic drag: `½ ρ Cd A v²`.
    pub fn drag(&self, speed: f32) -> f32 {
        0.5 * self.air_density * self.drag_coefficient * self.frame_area * speed * speed
    }

    /// Quadratic lift: `½ ρ Cl A v²`. Angle of attack is not modelled.
    pub fn lift(&self, speed: f32) -> f32 {
        0.5 * self.air_density * self.lift_coefficient * self.frame_area * speed * speed
    }

    pub fn validate(&self) -> Result<(), FlightError> {
        let fields = [
            ("gravity", self.gravity),
            ("air_density", self.air_density),
            ("frame_area", self.frame_area),
            ("drag_coefficient", self.drag_coefficient),
            ("lift_coefficient", self.lift_coefficient),
            ("max_thrust", self.max_thrust),
            ("roll_speed", self.roll_speed),
            ("ground_height", self.ground_height),
            ("brake_threshold", self.brake_threshold),
            ("brake_decrement", self.brake_decrement),
            ("roll_correction_gain", self.roll_correction_gain),
            ("yaw_damping", self.yaw_damping),
            ("change_epsilon", self.change_epsilon),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FlightError::InvalidConfig(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if self.max_thrust <= 0.0 {
            return Err(FlightError::InvalidConfig(format!(
                "max_thrust must be positive, got {}",
                self.max_thrust
            )));
        }
        if self.yaw_damping <= 0.0 {
            return Err(FlightError::InvalidConfig(format!(
                "yaw_damping must be positive, got {}",
                self.yaw_damping
            )));
        }
        let non_negative = [
            ("air_density", self.air_density),
            ("frame_area", self.frame_area),
            ("drag_coefficient", self.drag_coefficient),
            ("lift_coefficient", self.lift_coefficient),
            ("brake_threshold", self.brake_threshold),
            ("brake_decrement", self.brake_decrement),
            ("change_epsilon", self.change_epsilon),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(FlightError::InvalidConfig(format!(
                "{name} must not be negative, got {value}"
            )));
        }
        Ok(())
    }
}
