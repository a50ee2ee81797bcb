//! Flight Kernel: the flight dynamics integrator and the loop that drives it.
//!
//! # Invariants
//! - Thrust stays within `[0, max_thrust]` after every update.
//! - Vertical velocity is recomputed from lift and gravity each frame, never integrated.
//! - The body never ends a frame below the ground height: the clamp runs again
//!   after the frame's motion is applied.
//! - All mutation happens on one thread, once per frame.

pub mod config;
pub mod constants;
pub mod controller;
pub mod driver;
pub mod error;
pub mod hud;
pub mod listeners;
pub mod script;

pub use config::{FlightConfig, FrameConfig};
pub use constants::FlightConstants;
pub use controller::{FlightDynamicsController, FrameReport};
pub use driver::FrameDriver;
pub use error::FlightError;
pub use hud::{Hud, HudReading};
pub use listeners::{ChangeListeners, ListenerId};
pub use script::{FlightScript, ScriptEvent};
