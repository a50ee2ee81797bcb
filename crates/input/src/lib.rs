//! Input: platform key codes mapped to named binary control axes.
//!
//! # Invariants
//! - Every axis is either held (1) or released (0); there is no repeat or debounce.
//! - Unknown key codes never reach the control state.

mod axis;
mod bindings;

pub use axis::{ControlAxis, ControlState};
pub use bindings::{BindingError, KeyBindings};
