use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Anything the flight controller can drive: a position and an orientation
/// owned by the caller (usually a scene graph node).
///
/// Only the accessors are required; local translation and orientation
/// composition are provided in terms of them.
pub trait RigidBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn orientation(&self) -> Quat;
    fn set_orientation(&mut self, orientation: Quat);

    /// Move along the body's own axes, i.e. `offset` is rotated by the
    /// current orientation before it is added to the position.
    fn translate_local(&mut self, offset: Vec3) {
        let world = self.orientation() * offset;
        self.set_position(self.position() + world);
    }

    /// Post-multiply the orientation by `rotation` (a rotation about the
    /// body's local axes).
    fn compose_rotation(&mut self, rotation: Quat) {
        self.set_orientation(self.orientation() * rotation);
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform placed at `position`.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Unit vector the body faces. Bodies fly towards their local -Z.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl RigidBody for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn orientation(&self) -> Quat {
        self.rotation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.rotation = orientation;
    }
}
