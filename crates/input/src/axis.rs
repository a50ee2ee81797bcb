use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named binary input channel.
///
/// The strafe axes (`Up`, `Down`, `Left`, `Right`, `Back`) are part of the
/// control state but have no key in the default bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlAxis {
    ThrustUp,
    ThrustDown,
    Up,
    Down,
    Left,
    Right,
    Back,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
    Braking,
}

impl ControlAxis {
    pub const ALL: [ControlAxis; 14] = [
        Self::ThrustUp,
        Self::ThrustDown,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Back,
        Self::PitchUp,
        Self::PitchDown,
        Self::YawLeft,
        Self::YawRight,
        Self::RollLeft,
        Self::RollRight,
        Self::Braking,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ThrustUp => "thrust-up",
            Self::ThrustDown => "thrust-down",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Back => "back",
            Self::PitchUp => "pitch-up",
            Self::PitchDown => "pitch-down",
            Self::YawLeft => "yaw-left",
            Self::YawRight => "yaw-right",
            Self::RollLeft => "roll-left",
            Self::RollRight => "roll-right",
            Self::Braking => "braking",
        }
    }
}

impl fmt::Display for ControlAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|axis| axis.name() == s)
            .ok_or_else(|| format!("unknown control axis '{s}'"))
    }
}

/// Held/released state of every control axis.
///
/// Mutated by key events, read once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub thrust_up: bool,
    pub thrust_down: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub back: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub braking: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, axis: ControlAxis) -> &mut bool {
        match axis {
            ControlAxis::ThrustUp => &mut self.thrust_up,
            ControlAxis::ThrustDown => &mut self.thrust_down,
            ControlAxis::Up => &mut self.up,
            ControlAxis::Down => &mut self.down,
            ControlAxis::Left => &mut self.left,
            ControlAxis::Right => &mut self.right,
            ControlAxis::Back => &mut self.back,
            ControlAxis::PitchUp => &mut self.pitch_up,
            ControlAxis::PitchDown => &mut self.pitch_down,
            ControlAxis::YawLeft => &mut self.yaw_left,
            ControlAxis::YawRight => &mut self.yaw_right,
            ControlAxis::RollLeft => &mut self.roll_left,
            ControlAxis::RollRight => &mut self.roll_right,
            ControlAxis::Braking => &mut self.braking,
        }
    }

    /// Set one axis held or released. Returns the previous state.
    pub fn set(&mut self, axis: ControlAxis, held: bool) -> bool {
        std::mem::replace(self.slot_mut(axis), held)
    }

    pub fn is_held(&self, axis: ControlAxis) -> bool {
        match axis {
            ControlAxis::ThrustUp => self.thrust_up,
            ControlAxis::ThrustDown => self.thrust_down,
            ControlAxis::Up => self.up,
            ControlAxis::Down => self.down,
            ControlAxis::Left => self.left,
            ControlAxis::Right => self.right,
            ControlAxis::Back => self.back,
            ControlAxis::PitchUp => self.pitch_up,
            ControlAxis::PitchDown => self.pitch_down,
            ControlAxis::YawLeft => self.yaw_left,
            ControlAxis::YawRight => self.yaw_right,
            ControlAxis::RollLeft => self.roll_left,
            ControlAxis::RollRight => self.roll_right,
            ControlAxis::Braking => self.braking,
        }
    }

    /// The axis as a number in {0, 1}.
    pub fn value(&self, axis: ControlAxis) -> f32 {
        if self.is_held(axis) { 1.0 } else { 0.0 }
    }

    /// Signed difference of an opposing pair: `positive - negative`.
    pub fn pair(&self, positive: ControlAxis, negative: ControlAxis) -> f32 {
        self.value(positive) - self.value(negative)
    }

    /// Axes currently held, in declaration order.
    pub fn held(&self) -> Vec<ControlAxis> {
        ControlAxis::ALL
            .into_iter()
            .filter(|axis| self.is_held(*axis))
            .collect()
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Release every axis.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
