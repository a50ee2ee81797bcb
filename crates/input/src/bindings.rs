use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::axis::ControlAxis;

/// Errors from editing a key binding table.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("key code must not be empty")]
    EmptyCode,
}

/// Fixed table from platform key code (`"KeyC"`, `"Space"`, ...) to control axis.
///
/// Serializes as a plain map so it can live in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    table: BTreeMap<String, ControlAxis>,
}

impl Default for KeyBindings {
    /// The flight layout: C/V thrust, W/S pitch, Q/E yaw, A/D roll, Space brakes.
    fn default() -> Self {
        let table = [
            ("KeyC", ControlAxis::ThrustUp),
            ("KeyV", ControlAxis::ThrustDown),
            ("KeyS", ControlAxis::PitchUp),
            ("KeyW", ControlAxis::PitchDown),
            ("KeyQ", ControlAxis::YawLeft),
            ("KeyE", ControlAxis::YawRight),
            ("KeyA", ControlAxis::RollLeft),
            ("KeyD", ControlAxis::RollRight),
            ("Space", ControlAxis::Braking),
        ]
        .into_iter()
        .map(|(code, axis)| (code.to_owned(), axis))
        .collect();
        Self { table }
    }
}

impl KeyBindings {
    /// A table with no bindings at all.
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Axis bound to `code`, if any.
    pub fn axis_for(&self, code: &str) -> Option<ControlAxis> {
        self.table.get(code).copied()
    }

    /// Bind `code` to `axis`, returning the axis it was previously bound to.
    pub fn bind(
        &mut self,
        code: impl Into<String>,
        axis: ControlAxis,
    ) -> Result<Option<ControlAxis>, BindingError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(BindingError::EmptyCode);
        }
        tracing::debug!(%code, %axis, "key bound");
        Ok(self.table.insert(code, axis))
    }

    pub fn unbind(&mut self, code: &str) -> Option<ControlAxis> {
        self.table.remove(code)
    }

    /// All key codes bound to `axis`.
    pub fn codes_for(&self, axis: ControlAxis) -> Vec<&str> {
        self.table
            .iter()
            .filter(|(_, bound)| **bound == axis)
            .map(|(code, _)| code.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ControlAxis)> {
        self.table.iter().map(|(code, axis)| (code.as_str(), *axis))
    }

    /// Check every code in a deserialized table.
    pub fn validate(&self) -> Result<(), BindingError> {
        if self.table.keys().any(|code| code.trim().is_empty()) {
            return Err(BindingError::EmptyCode);
        }
        Ok(())
    }
}
